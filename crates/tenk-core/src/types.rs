//! Core data types for 10-K concept retrieval.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Ticker`] - Stock ticker symbol
//! - [`Cik`] - SEC Central Index Key
//! - [`MetricValue`] - Typed magnitude of a reported or derived value
//! - [`FinancialFact`] - A single reported value from one filing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stock ticker symbol.
///
/// Tickers are automatically uppercased on creation, so lookups against
/// SEC's ticker file are case-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the ticker is empty or all whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// SEC Central Index Key, zero-padded to the 10 digits the EDGAR API expects.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cik(String);

impl Cik {
    /// Creates a CIK from the raw integer SEC publishes in its ticker file.
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(format!("{raw:0>10}"))
    }

    /// Returns the zero-padded CIK as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed magnitude of a reported or derived value.
///
/// The variant fixes how the number renders: currency amounts group thousands
/// and keep two decimals with a `$` prefix, share counts group thousands with
/// no decimals, and percentages render with two decimals and a `%` suffix.
/// The Effective Tax Rate is stored as [`MetricValue::Percent`] so it always
/// displays as a percentage string, never a bare fraction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    /// A US-dollar amount.
    Usd(f64),
    /// A share count.
    Shares(f64),
    /// A percentage, already scaled to percent points (24.0 renders "24.00%").
    Percent(f64),
}

impl MetricValue {
    /// Returns the raw numeric magnitude, whatever the variant.
    #[must_use]
    pub const fn magnitude(self) -> f64 {
        match self {
            Self::Usd(v) | Self::Shares(v) | Self::Percent(v) => v,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usd(v) => {
                if v.is_sign_negative() {
                    write!(f, "-${}", group_thousands(-v, 2))
                } else {
                    write!(f, "${}", group_thousands(*v, 2))
                }
            }
            Self::Shares(v) => {
                if v.is_sign_negative() {
                    write!(f, "-{}", group_thousands(-v, 0))
                } else {
                    write!(f, "{}", group_thousands(*v, 0))
                }
            }
            Self::Percent(v) => write!(f, "{v:.2}%"),
        }
    }
}

/// Formats a non-negative value with comma-separated thousands and the given
/// number of decimal places.
fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{value:.decimals$}");
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}

/// A single reported value for one concept from one filing, or a derived
/// value computed from such facts.
///
/// A fact is either fully present (all four fields populated) or entirely
/// absent; absence is modeled as `Option<FinancialFact>` throughout the
/// workspace, never as a partially filled record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinancialFact {
    /// Display name of the metric (e.g. "Revenue").
    pub label: &'static str,
    /// The reported or computed magnitude.
    pub value: MetricValue,
    /// Filing type the fact was sourced from (always "10-K").
    pub form: String,
    /// Date the filing was submitted to the SEC.
    pub filed: NaiveDate,
}

impl FinancialFact {
    /// Creates a new fact with all fields populated.
    #[must_use]
    pub fn new(
        label: &'static str,
        value: MetricValue,
        form: impl Into<String>,
        filed: NaiveDate,
    ) -> Self {
        Self {
            label,
            value,
            form: form.into(),
            filed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_uppercases_on_creation() {
        let ticker = Ticker::new("aapl");
        assert_eq!(ticker.as_str(), "AAPL");
        assert_eq!(Ticker::from("msft"), Ticker::new("MSFT"));
    }

    #[test]
    fn ticker_blank_detection() {
        assert!(Ticker::new("").is_blank());
        assert!(Ticker::new("   ").is_blank());
        assert!(!Ticker::new("TSLA").is_blank());
    }

    #[test]
    fn cik_pads_to_ten_digits() {
        let cik = Cik::from_raw(320193);
        assert_eq!(cik.as_str(), "0000320193");
        assert_eq!(cik.as_str().len(), 10);
        assert_eq!(Cik::from_raw(1318605).to_string(), "0001318605");
    }

    #[test]
    fn usd_display_groups_thousands() {
        assert_eq!(MetricValue::Usd(397_500.0).to_string(), "$397,500.00");
        assert_eq!(
            MetricValue::Usd(391_035_000_000.0).to_string(),
            "$391,035,000,000.00"
        );
        assert_eq!(MetricValue::Usd(0.5).to_string(), "$0.50");
        assert_eq!(MetricValue::Usd(-1_234.5).to_string(), "-$1,234.50");
    }

    #[test]
    fn shares_display_has_no_decimals() {
        assert_eq!(
            MetricValue::Shares(15_550_061_000.0).to_string(),
            "15,550,061,000"
        );
        assert_eq!(MetricValue::Shares(999.0).to_string(), "999");
    }

    #[test]
    fn percent_display_always_has_suffix() {
        assert_eq!(MetricValue::Percent(24.0).to_string(), "24.00%");
        assert_eq!(MetricValue::Percent(40.0).to_string(), "40.00%");
        assert_eq!(MetricValue::Percent(-3.125).to_string(), "-3.12%");
    }

    #[test]
    fn magnitude_ignores_variant() {
        assert_eq!(MetricValue::Usd(12.5).magnitude(), 12.5);
        assert_eq!(MetricValue::Percent(12.5).magnitude(), 12.5);
        assert_eq!(MetricValue::Shares(12.5).magnitude(), 12.5);
    }
}
