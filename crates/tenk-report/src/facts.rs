//! Retrieval and storage of the reported concept set.

use tenk_core::{Cik, Concept, ConceptSource, FinancialFact};
use tracing::info;

/// The reported 10-K facts for one company, one slot per [`Concept`].
///
/// Each slot is either a fully populated fact or absent; fetch failures
/// leave the slot empty and never abort the surrounding report.
#[derive(Debug, Clone, Default)]
pub struct FactSet {
    facts: [Option<FinancialFact>; Concept::COUNT],
}

impl FactSet {
    /// Fetches every concept from the source, one request at a time.
    ///
    /// Concepts are independent: a concept the source cannot provide is
    /// simply left absent.
    pub async fn fetch(source: &dyn ConceptSource, cik: &Cik) -> Self {
        let mut set = Self::default();
        for concept in Concept::ALL {
            if let Some(fact) = source.latest_fact(cik, concept).await {
                set.insert(concept, fact);
            }
        }

        info!(
            "Fetched {}/{} concepts for CIK {} from {}",
            set.present_count(),
            Concept::COUNT,
            cik,
            source.name()
        );
        set
    }

    /// Stores a fact in the slot for its concept.
    pub fn insert(&mut self, concept: Concept, fact: FinancialFact) {
        self.facts[concept.index()] = Some(fact);
    }

    /// Returns the fact for a concept, if it was reported.
    #[must_use]
    pub fn get(&self, concept: Concept) -> Option<&FinancialFact> {
        self.facts[concept.index()].as_ref()
    }

    /// Number of concepts that came back with a value.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.facts.iter().filter(|slot| slot.is_some()).count()
    }
}
