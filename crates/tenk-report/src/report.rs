//! Report assembly: resolve, fetch, derive, and order for display.

use tenk_core::{Cik, Concept, ConceptSource, FinancialFact, Result, Ticker};
use tracing::info;

use crate::compare::{SpendRow, cloud_spend_comparison};
use crate::facts::FactSet;
use crate::graph::{Derived, DerivedSet, MetricId, resolve};

/// Row order of the primary metrics table, interleaving reported facts with
/// the derived metrics that belong next to them.
pub const DISPLAY_ORDER: [MetricId; 15] = [
    MetricId::Reported(Concept::Revenue),
    MetricId::Reported(Concept::CostOfRevenue),
    MetricId::Derived(Derived::GrossMargin),
    MetricId::Reported(Concept::GrossProfit),
    MetricId::Reported(Concept::SellingGeneralAndAdministrative),
    MetricId::Derived(Derived::SgaRatio),
    MetricId::Derived(Derived::OperatingProfit),
    MetricId::Derived(Derived::OperatingMargin),
    MetricId::Reported(Concept::InterestExpense),
    MetricId::Reported(Concept::OtherNonoperatingIncomeExpense),
    MetricId::Reported(Concept::IncomeTaxesPaidNet),
    MetricId::Reported(Concept::EffectiveTaxRate),
    MetricId::Derived(Derived::NetIncome),
    MetricId::Reported(Concept::SharesOutstanding),
    MetricId::Derived(Derived::EpsDiluted),
];

/// The assembled report for one company.
#[derive(Debug, Clone)]
pub struct CompanyReport {
    /// The ticker the report was requested for.
    pub ticker: Ticker,
    /// The resolved zero-padded CIK.
    pub cik: Cik,
    /// Present metrics in [`DISPLAY_ORDER`]; absent ones are skipped.
    pub metrics: Vec<FinancialFact>,
    /// The competitor cloud-spend comparison rows.
    pub comparison: Vec<SpendRow>,
}

/// Builds the full report for a ticker.
///
/// Resolution failures surface as errors; everything past resolution
/// degrades row by row, so the worst case is a short report, not a failure.
pub async fn build_report(
    source: &dyn ConceptSource,
    ticker: &Ticker,
    competitor_spend: f64,
) -> Result<CompanyReport> {
    let cik = source.resolve_cik(ticker).await?;
    info!("Resolved {} to CIK {}", ticker, cik);

    let facts = FactSet::fetch(source, &cik).await;
    let derived = DerivedSet::evaluate(&facts);

    let metrics = DISPLAY_ORDER
        .iter()
        .filter_map(|&id| resolve(id, &facts, &derived).cloned())
        .collect();
    let comparison = cloud_spend_comparison(competitor_spend, &facts, &derived);

    Ok(CompanyReport {
        ticker: ticker.clone(),
        cik,
        metrics,
        comparison,
    })
}
