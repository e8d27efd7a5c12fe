//! # Profit Distribution
//!
//! Two independent allocation policies live here:
//!
//! - `PercentageDistribution`: each member receives their own percentage of
//!   the revenue. Percentages must total 100 before a split may be saved.
//! - `SalaryPoolDistribution`: a pool is cut into a salary pot and a profit
//!   pot, and each pot is shared equally among the team.
//!
//! Neither policy keeps state between calls.

pub mod error;
pub mod percentage;
pub mod salary_pool;

pub use error::DistributionError;
pub use percentage::{DEFAULT_SHARE_TOLERANCE, PercentageDistribution, total_percentage};
pub use salary_pool::{DEFAULT_SALARY_RATIO, PoolAllocation, SalaryPoolDistribution};
