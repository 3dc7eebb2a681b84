//! The trait concept fetchers implement.
//!
//! [`ConceptSource`] is the seam between fetching and derivation: the report
//! pipeline consumes a `&dyn ConceptSource`, so tests can drive it from an
//! in-memory stub instead of the network.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    concept::Concept,
    error::Result,
    types::{Cik, FinancialFact, Ticker},
};

/// A source of 10-K financial facts.
///
/// The two operations have deliberately different failure contracts:
/// [`resolve_cik`](Self::resolve_cik) returns a `Result` because identifier
/// resolution failures are user-visible, while
/// [`latest_fact`](Self::latest_fact) returns an `Option` because every
/// per-concept failure (network, parse, missing data) collapses to absence
/// and must never abort the surrounding report.
#[async_trait]
pub trait ConceptSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g. "SEC EDGAR").
    fn name(&self) -> &str;

    /// Resolves a ticker symbol to its zero-padded CIK.
    async fn resolve_cik(&self, ticker: &Ticker) -> Result<Cik>;

    /// Fetches the most recent 10-K fact for one concept, or `None` if the
    /// concept is unavailable for this company.
    async fn latest_fact(&self, cik: &Cik, concept: Concept) -> Option<FinancialFact>;
}
