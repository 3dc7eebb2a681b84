#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tenklabs/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # Pipeline shape
//!
//! [`build_report`] runs the whole pipeline for one ticker:
//!
//! 1. resolve the ticker to a CIK (the only step whose failure is an error),
//! 2. fetch every [`Concept`](tenk_core::Concept) into a [`FactSet`],
//! 3. evaluate the derived-metric graph into a [`DerivedSet`],
//! 4. order the present metrics for display and attach the cloud-spend
//!    comparison.

pub mod compare;
pub mod facts;
pub mod graph;
pub mod report;

pub use compare::{OCI_SPEND_RATE, SUPPORT_REWARDS_RATE, SpendRow, cloud_spend_comparison};
pub use facts::FactSet;
pub use graph::{Derived, DerivedSet, MetricId};
pub use report::{CompanyReport, DISPLAY_ORDER, build_report};
