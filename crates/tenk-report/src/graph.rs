//! The derived-metric dependency graph.
//!
//! Each [`Derived`] metric declares the reported facts and prior derived
//! metrics it consumes. [`DerivedSet::evaluate`] walks the metrics once in
//! dependency order; a metric is computed only when every input is present
//! and all inputs carry the identical filed date, otherwise it is absent and
//! everything downstream of it is absent too.

use tenk_core::{Concept, FinancialFact, MetricValue};

use crate::facts::FactSet;

/// Identifies either a reported fact or a derived metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricId {
    /// A concept fetched directly from a filing.
    Reported(Concept),
    /// A metric computed by the pipeline.
    Derived(Derived),
}

/// The derived metrics, in evaluation order.
///
/// The order is topological: a metric may consume any reported fact and any
/// derived metric that precedes it in [`Derived::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Derived {
    /// Cost of revenue as a share of revenue.
    GrossMargin,
    /// SG&A as a share of revenue.
    SgaRatio,
    /// Gross profit less SG&A.
    OperatingProfit,
    /// Operating profit as a share of revenue.
    OperatingMargin,
    /// Operating profit less interest, other nonoperating items, and taxes
    /// paid, truncated to whole dollars.
    NetIncome,
    /// Net income per diluted share.
    EpsDiluted,
}

impl Derived {
    /// Every derived metric, in evaluation order.
    pub const ALL: [Self; 6] = [
        Self::GrossMargin,
        Self::SgaRatio,
        Self::OperatingProfit,
        Self::OperatingMargin,
        Self::NetIncome,
        Self::EpsDiluted,
    ];

    /// Number of derived metrics.
    pub const COUNT: usize = Self::ALL.len();

    /// Display name for the metrics table.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GrossMargin => "Gross Margin",
            Self::SgaRatio => "SGA Percent of Revenue",
            Self::OperatingProfit => "Operating Profit",
            Self::OperatingMargin => "Operating Margin",
            Self::NetIncome => "Net Income",
            Self::EpsDiluted => "Net Income per share - Diluted",
        }
    }

    /// The inputs this metric consumes, all of which must be present and
    /// share one filed date.
    #[must_use]
    pub fn inputs(self) -> &'static [MetricId] {
        match self {
            Self::GrossMargin => &[
                MetricId::Reported(Concept::Revenue),
                MetricId::Reported(Concept::CostOfRevenue),
            ],
            Self::SgaRatio => &[
                MetricId::Reported(Concept::Revenue),
                MetricId::Reported(Concept::SellingGeneralAndAdministrative),
            ],
            Self::OperatingProfit => &[
                MetricId::Reported(Concept::GrossProfit),
                MetricId::Reported(Concept::SellingGeneralAndAdministrative),
            ],
            Self::OperatingMargin => &[
                MetricId::Reported(Concept::Revenue),
                MetricId::Derived(Self::OperatingProfit),
            ],
            Self::NetIncome => &[
                MetricId::Derived(Self::OperatingProfit),
                MetricId::Reported(Concept::InterestExpense),
                MetricId::Reported(Concept::OtherNonoperatingIncomeExpense),
                MetricId::Reported(Concept::IncomeTaxesPaidNet),
            ],
            Self::EpsDiluted => &[
                MetricId::Derived(Self::NetIncome),
                MetricId::Reported(Concept::SharesOutstanding),
            ],
        }
    }

    /// Position of this metric in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Computes the metric from its input magnitudes, given in
    /// [`Self::inputs`] order.
    ///
    /// Returns `None` when the arithmetic itself is unresolvable (a ratio
    /// against a non-positive denominator).
    fn compute(self, v: &[f64]) -> Option<MetricValue> {
        match self {
            Self::GrossMargin | Self::SgaRatio | Self::OperatingMargin => {
                ratio_percent(v[1], v[0])
            }
            Self::OperatingProfit => Some(MetricValue::Usd(round2(v[0] - v[1]))),
            Self::NetIncome => {
                Some(MetricValue::Usd(round2(v[0] - v[1] - v[2] - v[3]).trunc()))
            }
            Self::EpsDiluted => {
                (v[1] > 0.0).then(|| MetricValue::Usd(round2(v[0] / v[1])))
            }
        }
    }
}

/// `numerator / denominator` as a percentage, absent when the denominator
/// is not a positive number.
fn ratio_percent(numerator: f64, denominator: f64) -> Option<MetricValue> {
    (denominator > 0.0).then(|| MetricValue::Percent(round2(numerator / denominator * 100.0)))
}

/// Rounds to two decimal places, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The evaluated derived metrics, one slot per [`Derived`].
#[derive(Debug, Clone, Default)]
pub struct DerivedSet {
    metrics: [Option<FinancialFact>; Derived::COUNT],
}

impl DerivedSet {
    /// Evaluates every derived metric against the reported facts.
    #[must_use]
    pub fn evaluate(facts: &FactSet) -> Self {
        let mut set = Self::default();
        for metric in Derived::ALL {
            set.metrics[metric.index()] = try_derive(metric, facts, &set);
        }
        set
    }

    /// Returns a derived metric, if it could be computed.
    #[must_use]
    pub fn get(&self, metric: Derived) -> Option<&FinancialFact> {
        self.metrics[metric.index()].as_ref()
    }
}

/// Looks up a metric by id against the reported facts and the derived
/// metrics evaluated so far.
pub(crate) fn resolve<'a>(
    id: MetricId,
    facts: &'a FactSet,
    derived: &'a DerivedSet,
) -> Option<&'a FinancialFact> {
    match id {
        MetricId::Reported(concept) => facts.get(concept),
        MetricId::Derived(metric) => derived.get(metric),
    }
}

/// Computes one derived metric, or `None` when any input is absent,
/// the inputs disagree on filed date, or the arithmetic is unresolvable.
fn try_derive(metric: Derived, facts: &FactSet, derived: &DerivedSet) -> Option<FinancialFact> {
    let inputs: Vec<&FinancialFact> = metric
        .inputs()
        .iter()
        .map(|&id| resolve(id, facts, derived))
        .collect::<Option<Vec<_>>>()?;

    let filed = inputs[0].filed;
    if inputs.iter().any(|fact| fact.filed != filed) {
        return None;
    }

    let values: Vec<f64> = inputs.iter().map(|fact| fact.value.magnitude()).collect();
    let value = metric.compute(&values)?;

    Some(FinancialFact::new(
        metric.label(),
        value,
        inputs[0].form.clone(),
        filed,
    ))
}
