#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tenklabs/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for 10-K concept retrieval.
//!
//! This crate provides the foundational abstractions of the workspace:
//!
//! - [`Ticker`] and [`Cik`](types::Cik) - company identifiers
//! - [`Concept`](concept::Concept) - the fixed set of fetched line items
//! - [`FinancialFact`](types::FinancialFact) - one reported or derived value
//! - [`ConceptSource`](source::ConceptSource) - the trait fetchers implement
//! - [`FetchError`](error::FetchError) - the failure taxonomy

/// The fixed set of XBRL concepts and their units.
pub mod concept;
/// Error types for concept retrieval.
pub mod error;
/// The trait concept fetchers implement.
pub mod source;
/// Core data types (Ticker, Cik, FinancialFact, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use concept::{Concept, Unit};
pub use error::{FetchError, Result};
pub use source::ConceptSource;
pub use types::{Cik, FinancialFact, MetricValue, Ticker};
