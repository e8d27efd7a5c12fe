use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid sprint window: end {end} is before start {start}")]
    InvalidSprintWindow { start: String, end: String },

    #[error("Error in calculation: {0}")]
    Calculation(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
