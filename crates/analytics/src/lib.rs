//! # Campaign Analytics
//!
//! Derived reporting ratios for logged campaign performance. Nothing computed
//! here is ever persisted; the figures are recomputed from the summed counts
//! each time a report is shown.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of storage. It depends only
//!   on `core-types`.
//! - **Stateless Calculation:** The `AnalyticsEngine` takes summed counts as
//!   input and produces an `EngagementReport` as output.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The calculator for open and click-through rates.
//! - `EngagementReport`: One campaign's counts together with its derived rates.

pub mod engine;
pub mod report;

pub use engine::AnalyticsEngine;
pub use report::EngagementReport;
