use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    #[error("Invalid percentage {percentage}% for member '{member_name}' ({member_id}); expected 0-100")]
    InvalidPercentage {
        member_id: String,
        member_name: String,
        percentage: Decimal,
    },

    #[error("Revenue must not be negative, got {0}")]
    InvalidRevenue(Decimal),

    #[error("Profit shares for project '{project_id}' total {total}%, expected 100% (±{tolerance})")]
    PercentageTotal {
        project_id: String,
        total: Decimal,
        tolerance: Decimal,
    },

    #[error("Distribution parameters are invalid: {0}")]
    InvalidParameters(String),
}
