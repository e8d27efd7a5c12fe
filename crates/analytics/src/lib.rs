//! # Ledger Analytics
//!
//! This crate derives every dashboard figure from raw records: period and
//! project roll-ups, customer and cash metrics, and sprint metrics.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Nothing is cached between calls. "Updating" a metric means
//!   calling the calculator again with the current snapshot of records.
//!
//! ## Public API
//!
//! - `aggregation`: period buckets, project financials, totals and category breakdowns.
//! - `metrics`: CAC, LTV, runway, burn, churn, velocity, cycle time, completion rate.
//! - `burndown`: ideal versus actual remaining story points for a sprint.
//! - `FinanceEngine` / `FinanceReport`: the combined finance dashboard figures.

pub mod aggregation;
pub mod burndown;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod report;

pub use aggregation::{
    Totals, aggregate_by_period, aggregate_by_project, category_breakdown, period_for, totals,
};
pub use burndown::{Burndown, BurndownPoint, sprint_burndown};
pub use engine::{CustomerInputs, FinanceEngine};
pub use error::AnalyticsError;
pub use report::FinanceReport;
