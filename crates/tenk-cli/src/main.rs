//! Command-line front end for the 10-K report pipeline.
//!
//! # Usage
//!
//! ```bash
//! # Latest 10-K metrics for a ticker
//! tenk AAPL
//!
//! # Include the cloud-spend comparison against a competitor spend figure
//! tenk MSFT --cloud-spend 1000000
//!
//! # The SEC asks every client to identify itself
//! tenk ORCL --user-agent "MyApp/1.0 (contact@example.com)"
//! ```

use anyhow::bail;
use clap::Parser;
use tracing::debug;

use tenk_core::{FetchError, Ticker};
use tenk_edgar::EdgarClient;
use tenk_report::build_report;

mod table;

#[derive(Parser, Debug)]
#[command(name = "tenk")]
#[command(about = "10-K financial metrics and cloud-spend comparison from SEC EDGAR")]
#[command(version)]
struct Cli {
    /// Ticker symbol (e.g. AAPL, MSFT, TSLA)
    ticker: String,

    /// Competitor's annual cloud spend in USD
    #[arg(long, default_value_t = 0.0, value_parser = non_negative)]
    cloud_spend: f64,

    /// User-Agent for SEC requests; SEC guidance asks for an app name and
    /// a contact address
    #[arg(
        long,
        env = "EDGAR_USER_AGENT",
        default_value = "tenk/0.1 (contact@tenklabs.io)"
    )]
    user_agent: String,
}

fn non_negative(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err("cloud spend must be a non-negative amount".to_string())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let ticker = Ticker::new(&cli.ticker);
    debug!("Requesting report for {} as {:?}", ticker, cli.user_agent);

    let client = EdgarClient::new(&cli.user_agent);
    let report = match build_report(&client, &ticker, cli.cloud_spend).await {
        Ok(report) => report,
        Err(FetchError::TickerNotFound(_)) => {
            bail!("Ticker not found. Please verify the symbol.")
        }
        Err(FetchError::InvalidTicker(_)) => bail!("Please enter a ticker symbol."),
        Err(err) => return Err(err.into()),
    };

    println!("Ticker: {}", report.ticker);
    println!("CIK: {}", report.cik);
    println!();
    println!("{}", table::metrics_table(&report.metrics));
    println!("Competitor Cloud Spend Comparison");
    println!("{}", table::comparison_table(&report.comparison));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_ticker_and_spend() {
        let cli = Cli::parse_from(["tenk", "orcl", "--cloud-spend", "1000000"]);
        assert_eq!(cli.ticker, "orcl");
        assert_eq!(cli.cloud_spend, 1_000_000.0);
    }

    #[test]
    fn cloud_spend_rejects_negative_and_non_numeric_values() {
        assert!(Cli::try_parse_from(["tenk", "ORCL", "--cloud-spend=-5"]).is_err());
        assert!(Cli::try_parse_from(["tenk", "ORCL", "--cloud-spend", "lots"]).is_err());
        assert!(Cli::try_parse_from(["tenk", "ORCL", "--cloud-spend", "0"]).is_ok());
    }

    #[test]
    fn ticker_argument_is_required() {
        assert!(Cli::try_parse_from(["tenk"]).is_err());
    }
}
