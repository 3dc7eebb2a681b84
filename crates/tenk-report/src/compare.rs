//! The competitor cloud-spend comparison.
//!
//! Models moving a competitor's reported cloud spend to OCI: the spend is
//! marked down to a 53% share, a further 25% support-rewards discount is
//! taken off that share, and the difference to the original spend is treated
//! as savings that reduce SG&A. SG&A, operating, net-income, and EPS figures
//! are then restated with those savings applied. Rows whose underlying
//! metrics are absent or misaligned are omitted, matching the gating of the
//! main pipeline.

use serde::Serialize;
use tenk_core::{Concept, FinancialFact, MetricValue};

use crate::facts::FactSet;
use crate::graph::{Derived, DerivedSet, round2};

/// Share of the competitor's spend assumed to move to OCI.
pub const OCI_SPEND_RATE: f64 = 0.53;

/// Support-rewards discount applied to the OCI share.
pub const SUPPORT_REWARDS_RATE: f64 = 0.25;

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendRow {
    /// Display name of the comparison line.
    pub label: &'static str,
    /// The computed value.
    pub value: MetricValue,
}

impl SpendRow {
    fn usd(label: &'static str, value: f64) -> Self {
        Self {
            label,
            value: MetricValue::Usd(value),
        }
    }

    fn percent(label: &'static str, value: f64) -> Self {
        Self {
            label,
            value: MetricValue::Percent(value),
        }
    }
}

/// Builds the comparison table for a competitor spend figure.
///
/// The discounted spend and the amount saved are always present; every other
/// row requires its reported and derived inputs, so a sparse fact set yields
/// a short table rather than an error.
#[must_use]
pub fn cloud_spend_comparison(spend: f64, facts: &FactSet, derived: &DerivedSet) -> Vec<SpendRow> {
    let mut rows = Vec::with_capacity(12);

    let magnitude = |fact: Option<&FinancialFact>| fact.map(|f| f.value.magnitude());
    let sga = magnitude(facts.get(Concept::SellingGeneralAndAdministrative));
    let revenue = magnitude(facts.get(Concept::Revenue));
    let shares = magnitude(facts.get(Concept::SharesOutstanding));
    let operating_profit = magnitude(derived.get(Derived::OperatingProfit));
    let net_income = magnitude(derived.get(Derived::NetIncome));
    let sga_ratio = magnitude(derived.get(Derived::SgaRatio));
    let operating_margin = magnitude(derived.get(Derived::OperatingMargin));
    let eps = magnitude(derived.get(Derived::EpsDiluted));

    let oci_spend =
        round2(spend * OCI_SPEND_RATE) - round2(spend * OCI_SPEND_RATE * SUPPORT_REWARDS_RATE);
    let saved = (oci_spend - spend).abs();

    if let Some(sga) = sga {
        if sga > 0.0 {
            rows.push(SpendRow::percent(
                "% of SGA for Original Tech Spend",
                round2(spend / sga * 100.0),
            ));
        }
    }

    rows.push(SpendRow::usd(
        "OCI Spend (Including Support Rewards)",
        oci_spend,
    ));
    rows.push(SpendRow::usd(
        "Amount Saved (Between OCI & Original Cloud Spend)",
        saved,
    ));

    if let Some(sga) = sga {
        rows.push(SpendRow::usd("SGA when Using OCI", sga - saved));
    }

    // Presence of the SG&A ratio already implies revenue and SG&A are
    // aligned and revenue is positive.
    if let (Some(sga), Some(revenue), Some(sga_ratio)) = (sga, revenue, sga_ratio) {
        let oci_sga_margin = round2((sga - saved) / revenue * 100.0);
        rows.push(SpendRow::percent(
            "SGA percent of Revenue (with OCI)",
            oci_sga_margin,
        ));
        rows.push(SpendRow::percent(
            "Change In SGA percent of Revenue",
            sga_ratio - oci_sga_margin,
        ));
    }

    if let Some(operating_profit) = operating_profit {
        rows.push(SpendRow::usd(
            "Operating Profit (with OCI)",
            operating_profit - saved,
        ));
    }

    if let (Some(operating_profit), Some(revenue), Some(operating_margin)) =
        (operating_profit, revenue, operating_margin)
    {
        let oci_op_margin = round2((operating_profit - saved) / revenue * 100.0);
        rows.push(SpendRow::percent(
            "Operating Profit Margin (with OCI)",
            oci_op_margin,
        ));
        rows.push(SpendRow::percent(
            "Change In Operating Margin",
            operating_margin - oci_op_margin,
        ));
    }

    if let Some(net_income) = net_income {
        rows.push(SpendRow::usd("Net Income (with OCI)", net_income + saved));
    }

    if let (Some(net_income), Some(shares), Some(eps)) = (net_income, shares, eps) {
        let oci_eps = round2((net_income + saved) / shares);
        rows.push(SpendRow::usd(
            "Net Income per share - Diluted (with OCI)",
            oci_eps,
        ));
        rows.push(SpendRow::usd(
            "Net Income per share - Diluted (change)",
            (eps - oci_eps).abs(),
        ));
    }

    rows
}
