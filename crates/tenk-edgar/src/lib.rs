#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tenklabs/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR concept fetcher for 10-K financial facts.
//!
//! This crate provides [`EdgarClient`], which covers:
//!
//! - CIK (Central Index Key) lookup from ticker symbols
//! - Per-concept fetches from the `companyconcept` XBRL API
//! - Selection of the most recently filed 10-K observation
//!
//! # Example
//!
//! ```no_run
//! use tenk_core::{Concept, ConceptSource, Ticker};
//! use tenk_edgar::EdgarClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new("MyApp/1.0 (contact@example.com)");
//!
//!     let cik = client.resolve_cik(&Ticker::new("AAPL")).await?;
//!     println!("CIK: {cik}");
//!
//!     if let Some(revenue) = client.latest_fact(&cik, Concept::Revenue).await {
//!         println!("{}: {} (filed {})", revenue.label, revenue.value, revenue.filed);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

use tenk_core::{
    Cik, Concept, ConceptSource, FetchError, FinancialFact, MetricValue, Result, Ticker, Unit,
};

/// Base URL for the SEC's XBRL data API.
pub const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// URL of the SEC's ticker-to-CIK mapping file.
pub const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Default minimum interval between requests (SEC fair-access guidance
/// allows 10 requests per second).
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Form type of an annual report.
const ANNUAL_FORM: &str = "10-K";

// =============================================================================
// Rate Limiting
// =============================================================================

#[derive(Debug)]
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

// =============================================================================
// EDGAR Client
// =============================================================================

/// Client for the SEC EDGAR XBRL API.
///
/// The SEC requires a descriptive `User-Agent` header identifying the
/// application and a contact address, e.g. `"MyApp/1.0 (contact@example.com)"`.
/// Requests are rate limited to one per 100ms.
#[derive(Debug)]
pub struct EdgarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    api_base: String,
    tickers_url: String,
}

impl EdgarClient {
    /// Creates a new EDGAR client with the given `User-Agent` string.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self::with_client(client)
    }

    /// Creates an EDGAR client from a pre-configured `reqwest` client.
    ///
    /// The client must already carry the descriptive `User-Agent` header the
    /// SEC requires.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(DEFAULT_RATE_LIMIT))),
            api_base: EDGAR_BASE_URL.to_string(),
            tickers_url: COMPANY_TICKERS_URL.to_string(),
        }
    }

    /// Overrides the API base URL and the ticker mapping URL.
    ///
    /// Intended for tests that point the client at a local mock server.
    pub fn with_base_urls(
        mut self,
        api_base: impl Into<String>,
        tickers_url: impl Into<String>,
    ) -> Self {
        self.api_base = api_base.into();
        self.tickers_url = tickers_url.into();
        self
    }

    async fn lookup_cik(&self, ticker: &Ticker) -> Result<Cik> {
        if ticker.is_blank() {
            return Err(FetchError::InvalidTicker(ticker.as_str().to_string()));
        }

        self.rate_limiter.lock().await.wait().await;

        debug!("Fetching company tickers from {}", self.tickers_url);
        let response = self
            .client
            .get(&self.tickers_url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "Failed to fetch company tickers: HTTP {}",
                response.status()
            )));
        }

        let records: HashMap<String, CompanyTickerRecord> = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(format!("Failed to parse company tickers: {e}")))?;

        for record in records.values() {
            if record.ticker.to_uppercase() == ticker.as_str() {
                let cik = Cik::from_raw(record.cik_str);
                debug!("Resolved ticker {} to CIK {}", ticker, cik);
                return Ok(cik);
            }
        }

        Err(FetchError::TickerNotFound(ticker.as_str().to_string()))
    }

    async fn fetch_concept(&self, cik: &Cik, concept: Concept) -> Result<FinancialFact> {
        self.rate_limiter.lock().await.wait().await;

        let url = format!(
            "{}/api/xbrl/companyconcept/CIK{}/us-gaap/{}.json",
            self.api_base,
            cik,
            concept.tag()
        );

        debug!("Fetching {} from {}", concept.tag(), url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "Failed to fetch {} for CIK {}: HTTP {}",
                concept.tag(),
                cik,
                response.status()
            )));
        }

        let mut body: ConceptResponse = response
            .json()
            .await
            .map_err(|e| {
                FetchError::Parse(format!("Failed to parse {} response: {e}", concept.tag()))
            })?;

        let unit = concept.unit();
        let values = body.units.remove(unit.key()).ok_or(FetchError::MissingUnit {
            concept: concept.tag(),
            unit: unit.key(),
        })?;

        let (observation, filed) =
            latest_annual(values).ok_or(FetchError::NoAnnualObservation(concept.tag()))?;

        Ok(fact_from(concept, &observation, filed))
    }
}

#[async_trait]
impl ConceptSource for EdgarClient {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    async fn resolve_cik(&self, ticker: &Ticker) -> Result<Cik> {
        self.lookup_cik(ticker).await
    }

    async fn latest_fact(&self, cik: &Cik, concept: Concept) -> Option<FinancialFact> {
        match self.fetch_concept(cik, concept).await {
            Ok(fact) => Some(fact),
            Err(err) => {
                debug!("{} unavailable for CIK {}: {}", concept.tag(), cik, err);
                None
            }
        }
    }
}

// =============================================================================
// Observation Selection
// =============================================================================

/// Picks the most recently filed annual observation.
///
/// The API usually returns observations in chronological order, but that is
/// not guaranteed; sort by filed date before taking the most recent. The sort
/// is stable, so among entries filed the same day the last one reported wins.
fn latest_annual(values: Vec<FactObservation>) -> Option<(FactObservation, NaiveDate)> {
    let mut annual: Vec<(NaiveDate, FactObservation)> = values
        .into_iter()
        .filter(|obs| obs.form.as_deref() == Some(ANNUAL_FORM))
        .filter_map(|obs| {
            let filed = obs.filed.as_deref()?;
            let date = NaiveDate::parse_from_str(filed, "%Y-%m-%d").ok()?;
            Some((date, obs))
        })
        .collect();

    annual.sort_by_key(|(filed, _)| *filed);
    annual.pop().map(|(filed, obs)| (obs, filed))
}

/// Converts a raw observation into a typed fact for the given concept.
fn fact_from(concept: Concept, obs: &FactObservation, filed: NaiveDate) -> FinancialFact {
    // Other nonoperating income is reported as a signed net figure; the
    // report shows its magnitude.
    let raw = if concept == Concept::OtherNonoperatingIncomeExpense {
        obs.val.abs()
    } else {
        obs.val
    };

    let value = match concept.unit() {
        Unit::Usd => MetricValue::Usd(raw),
        Unit::Shares => MetricValue::Shares(raw),
        // "pure" ratios such as the effective tax rate display as percentages.
        Unit::Pure => MetricValue::Percent(raw * 100.0),
    };

    FinancialFact::new(
        concept.label(),
        value,
        obs.form.clone().unwrap_or_else(|| ANNUAL_FORM.to_string()),
        filed,
    )
}

// =============================================================================
// SEC API Response Types
// =============================================================================

/// One entry in `company_tickers.json`.
#[derive(Debug, Deserialize)]
struct CompanyTickerRecord {
    cik_str: u64,
    ticker: String,
    #[allow(dead_code)]
    title: String,
}

/// Response from the `companyconcept` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct ConceptResponse {
    cik: Option<u64>,
    entity_name: Option<String>,
    #[serde(default)]
    units: HashMap<String, Vec<FactObservation>>,
}

/// A single reported observation for a concept.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
struct FactObservation {
    end: String,
    val: f64,
    #[serde(default)]
    accn: Option<String>,
    #[serde(default)]
    fy: Option<u32>,
    #[serde(default)]
    fp: Option<String>,
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    filed: Option<String>,
    #[serde(default)]
    frame: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_USER_AGENT: &str = "tenk-tests/0.1 (tests@example.com)";

    fn obs(val: f64, form: &str, filed: &str) -> FactObservation {
        FactObservation {
            end: "2024-06-30".to_string(),
            val,
            accn: None,
            fy: Some(2024),
            fp: Some("FY".to_string()),
            form: Some(form.to_string()),
            filed: Some(filed.to_string()),
            frame: None,
        }
    }

    #[test]
    fn latest_annual_ignores_quarterly_forms() {
        let values = vec![
            obs(100.0, "10-Q", "2024-10-30"),
            obs(400.0, "10-K", "2024-07-30"),
            obs(50.0, "10-Q", "2024-04-30"),
        ];

        let (picked, filed) = latest_annual(values).unwrap();
        assert_eq!(picked.val, 400.0);
        assert_eq!(filed, NaiveDate::from_ymd_opt(2024, 7, 30).unwrap());
    }

    #[test]
    fn latest_annual_sorts_by_filed_date() {
        // Out of order on purpose: the newest filing is in the middle.
        let values = vec![
            obs(1.0, "10-K", "2022-07-29"),
            obs(3.0, "10-K", "2024-07-30"),
            obs(2.0, "10-K", "2023-07-27"),
        ];

        let (picked, filed) = latest_annual(values).unwrap();
        assert_eq!(picked.val, 3.0);
        assert_eq!(filed, NaiveDate::from_ymd_opt(2024, 7, 30).unwrap());
    }

    #[test]
    fn latest_annual_breaks_ties_by_reported_order() {
        // Amended figures can land on the same filed date; the later entry
        // in the response wins.
        let values = vec![
            obs(1.0, "10-K", "2024-07-30"),
            obs(2.0, "10-K", "2024-07-30"),
        ];

        let (picked, _) = latest_annual(values).unwrap();
        assert_eq!(picked.val, 2.0);
    }

    #[test]
    fn latest_annual_skips_unparseable_filed_dates() {
        let mut bad = obs(9.0, "10-K", "not-a-date");
        let values = vec![bad.clone(), obs(5.0, "10-K", "2023-07-27")];
        bad.filed = None;
        let values_with_missing = vec![bad, obs(5.0, "10-K", "2023-07-27")];

        let (picked, _) = latest_annual(values).unwrap();
        assert_eq!(picked.val, 5.0);
        let (picked, _) = latest_annual(values_with_missing).unwrap();
        assert_eq!(picked.val, 5.0);
    }

    #[test]
    fn latest_annual_returns_none_without_annual_observations() {
        assert!(latest_annual(vec![]).is_none());
        assert!(latest_annual(vec![obs(1.0, "10-Q", "2024-10-30")]).is_none());
    }

    #[test]
    fn fact_from_maps_units_to_metric_values() {
        let filed = NaiveDate::from_ymd_opt(2024, 7, 30).unwrap();

        let revenue = fact_from(Concept::Revenue, &obs(1000.0, "10-K", "2024-07-30"), filed);
        assert_eq!(revenue.value, MetricValue::Usd(1000.0));
        assert_eq!(revenue.label, "Revenue");
        assert_eq!(revenue.form, "10-K");
        assert_eq!(revenue.filed, filed);

        let shares = fact_from(
            Concept::SharesOutstanding,
            &obs(7_433_000_000.0, "10-K", "2024-07-30"),
            filed,
        );
        assert_eq!(shares.value, MetricValue::Shares(7_433_000_000.0));
    }

    #[test]
    fn fact_from_scales_tax_rate_to_percent() {
        let filed = NaiveDate::from_ymd_opt(2024, 7, 30).unwrap();
        let fact = fact_from(
            Concept::EffectiveTaxRate,
            &obs(0.182, "10-K", "2024-07-30"),
            filed,
        );

        assert_eq!(fact.value, MetricValue::Percent(18.2));
        assert_eq!(fact.value.to_string(), "18.20%");
    }

    #[test]
    fn fact_from_takes_magnitude_of_other_nonoperating_income() {
        let filed = NaiveDate::from_ymd_opt(2024, 7, 30).unwrap();
        let fact = fact_from(
            Concept::OtherNonoperatingIncomeExpense,
            &obs(-302_000_000.0, "10-K", "2024-07-30"),
            filed,
        );

        assert_eq!(fact.value, MetricValue::Usd(302_000_000.0));
    }

    // =========================================================================
    // HTTP tests against a local mock server
    // =========================================================================

    fn test_client(server: &mockito::Server) -> EdgarClient {
        EdgarClient::new(TEST_USER_AGENT).with_base_urls(
            server.url(),
            format!("{}/files/company_tickers.json", server.url()),
        )
    }

    fn concept_body(values: serde_json::Value) -> String {
        json!({
            "cik": 789019,
            "taxonomy": "us-gaap",
            "tag": "Revenues",
            "entityName": "MICROSOFT CORP",
            "units": { "USD": values }
        })
        .to_string()
    }

    #[tokio::test]
    async fn resolve_cik_pads_to_ten_digits() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/files/company_tickers.json")
            .match_header("user-agent", TEST_USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
                    "1": {"cik_str": 789019, "ticker": "MSFT", "title": "MICROSOFT CORP"}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server);
        let cik = client.resolve_cik(&Ticker::new("aapl")).await.unwrap();

        assert_eq!(cik.as_str(), "0000320193");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn resolve_cik_reports_unknown_tickers() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/files/company_tickers.json")
            .with_status(200)
            .with_body(
                json!({"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.resolve_cik(&Ticker::new("ZZZZ")).await.unwrap_err();

        assert!(matches!(err, FetchError::TickerNotFound(t) if t == "ZZZZ"));
    }

    #[tokio::test]
    async fn resolve_cik_rejects_blank_tickers_without_a_request() {
        let server = mockito::Server::new_async().await;
        let client = test_client(&server);

        let err = client.resolve_cik(&Ticker::new("   ")).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidTicker(_)));
    }

    #[tokio::test]
    async fn resolve_cik_surfaces_http_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/files/company_tickers.json")
            .with_status(503)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.resolve_cik(&Ticker::new("AAPL")).await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn latest_fact_selects_most_recent_annual_observation() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/api/xbrl/companyconcept/CIK0000789019/us-gaap/Revenues.json",
            )
            .with_status(200)
            .with_body(concept_body(json!([
                {"end": "2023-06-30", "val": 211_915_000_000_u64, "form": "10-K", "filed": "2023-07-27"},
                {"end": "2024-09-30", "val": 65_585_000_000_u64, "form": "10-Q", "filed": "2024-10-30"},
                {"end": "2024-06-30", "val": 245_122_000_000_u64, "form": "10-K", "filed": "2024-07-30"}
            ])))
            .create_async()
            .await;

        let client = test_client(&server);
        let cik = Cik::from_raw(789019);
        let fact = client.latest_fact(&cik, Concept::Revenue).await.unwrap();

        assert_eq!(fact.value, MetricValue::Usd(245_122_000_000.0));
        assert_eq!(fact.form, "10-K");
        assert_eq!(fact.filed, NaiveDate::from_ymd_opt(2024, 7, 30).unwrap());
    }

    #[tokio::test]
    async fn latest_fact_is_none_when_unit_is_missing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/api/xbrl/companyconcept/CIK0000789019/us-gaap/Revenues.json",
            )
            .with_status(200)
            .with_body(json!({"cik": 789019, "entityName": "MICROSOFT CORP", "units": {}}).to_string())
            .create_async()
            .await;

        let client = test_client(&server);
        let cik = Cik::from_raw(789019);

        assert!(client.latest_fact(&cik, Concept::Revenue).await.is_none());
    }

    #[tokio::test]
    async fn latest_fact_is_none_on_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/api/xbrl/companyconcept/CIK0000789019/us-gaap/Revenues.json",
            )
            .with_status(404)
            .create_async()
            .await;

        let client = test_client(&server);
        let cik = Cik::from_raw(789019);

        assert!(client.latest_fact(&cik, Concept::Revenue).await.is_none());
    }

    #[tokio::test]
    async fn latest_fact_is_none_on_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/api/xbrl/companyconcept/CIK0000789019/us-gaap/Revenues.json",
            )
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = test_client(&server);
        let cik = Cik::from_raw(789019);

        assert!(client.latest_fact(&cik, Concept::Revenue).await.is_none());
    }

    #[tokio::test]
    async fn latest_fact_is_idempotent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                "/api/xbrl/companyconcept/CIK0000789019/us-gaap/Revenues.json",
            )
            .with_status(200)
            .with_body(concept_body(json!([
                {"end": "2024-06-30", "val": 245_122_000_000_u64, "form": "10-K", "filed": "2024-07-30"}
            ])))
            .expect(2)
            .create_async()
            .await;

        let client = test_client(&server);
        let cik = Cik::from_raw(789019);

        let first = client.latest_fact(&cik, Concept::Revenue).await.unwrap();
        let second = client.latest_fact(&cik, Concept::Revenue).await.unwrap();

        assert_eq!(first, second);
        mock.assert_async().await;
    }
}
