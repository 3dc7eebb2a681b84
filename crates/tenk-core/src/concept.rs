//! The fixed set of XBRL concepts fetched for a 10-K report.
//!
//! Each [`Concept`] knows its us-gaap tag, the unit its observations are
//! reported under, and the label it displays with. Companies report under a
//! single well-known tag for each of these line items, so the mapping is a
//! closed enum rather than a lookup table.

use serde::{Deserialize, Serialize};

/// Unit key an XBRL concept's observations are reported under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// US-dollar amounts, under the `"USD"` key.
    Usd,
    /// Share counts, under the `"shares"` key.
    Shares,
    /// Dimensionless ratios, under the `"pure"` key.
    Pure,
}

impl Unit {
    /// Returns the key this unit uses in the XBRL `units` map.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Shares => "shares",
            Self::Pure => "pure",
        }
    }
}

/// A financial statement line item fetched from the EDGAR XBRL API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concept {
    /// Total revenue.
    Revenue,
    /// Cost of revenue (COGS).
    CostOfRevenue,
    /// Gross profit.
    GrossProfit,
    /// Selling, general and administrative expense.
    SellingGeneralAndAdministrative,
    /// Interest expense.
    InterestExpense,
    /// Other nonoperating income (expense), net.
    OtherNonoperatingIncomeExpense,
    /// Income taxes paid, net of refunds.
    IncomeTaxesPaidNet,
    /// Effective income tax rate for continuing operations.
    EffectiveTaxRate,
    /// Common stock shares outstanding.
    SharesOutstanding,
}

impl Concept {
    /// Every concept, in the order it is fetched and displayed.
    pub const ALL: [Self; 9] = [
        Self::Revenue,
        Self::CostOfRevenue,
        Self::GrossProfit,
        Self::SellingGeneralAndAdministrative,
        Self::InterestExpense,
        Self::OtherNonoperatingIncomeExpense,
        Self::IncomeTaxesPaidNet,
        Self::EffectiveTaxRate,
        Self::SharesOutstanding,
    ];

    /// Number of concepts in [`Self::ALL`].
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the us-gaap XBRL tag this concept is reported under.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Revenue => "Revenues",
            Self::CostOfRevenue => "CostOfRevenue",
            Self::GrossProfit => "GrossProfit",
            Self::SellingGeneralAndAdministrative => "SellingGeneralAndAdministrativeExpense",
            Self::InterestExpense => "InterestExpense",
            Self::OtherNonoperatingIncomeExpense => "OtherNonoperatingIncomeExpense",
            Self::IncomeTaxesPaidNet => "IncomeTaxesPaidNet",
            Self::EffectiveTaxRate => "EffectiveIncomeTaxRateContinuingOperations",
            Self::SharesOutstanding => "CommonStockSharesOutstanding",
        }
    }

    /// Returns the unit this concept's observations are reported under.
    #[must_use]
    pub const fn unit(self) -> Unit {
        match self {
            Self::EffectiveTaxRate => Unit::Pure,
            Self::SharesOutstanding => Unit::Shares,
            _ => Unit::Usd,
        }
    }

    /// Returns the display label for this concept.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::CostOfRevenue => "Cost Of Revenue",
            Self::GrossProfit => "Gross Profit",
            Self::SellingGeneralAndAdministrative => "Selling, General & Admin Costs",
            Self::InterestExpense => "Interest Expense",
            Self::OtherNonoperatingIncomeExpense => "Other Nonoperating Income (Expense), net",
            Self::IncomeTaxesPaidNet => "Income Taxes Paid, Net",
            Self::EffectiveTaxRate => "Effective Tax Rate",
            Self::SharesOutstanding => "Common Stock Shares Outstanding",
        }
    }

    /// Returns this concept's position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}
