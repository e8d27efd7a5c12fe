pub mod enums;
pub mod error;
pub mod numeric;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{CostType, PeriodType, RecordType, TaskStatus};
pub use error::CoreError;
pub use numeric::{checked_total, finite_or_zero, floor_one, percent_of};
pub use structs::{
    FinancialRecord, Period, ProjectFinancial, Task, TeamMember, TeamMemberShare,
};
