use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Unknown period type '{0}' (expected monthly, quarterly or annual)")]
    UnknownPeriodType(String),

    #[error("Invalid record '{id}': {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Amount overflow while summing {0}")]
    Overflow(String),
}
