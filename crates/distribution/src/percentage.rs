use crate::error::DistributionError;
use core_types::TeamMemberShare;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// How far the saved percentages may drift from exactly 100.
pub const DEFAULT_SHARE_TOLERANCE: Decimal = dec!(0.01);

/// Percentage-based profit split: `amount = percentage / 100 * revenue` per member.
#[derive(Debug, Clone)]
pub struct PercentageDistribution {
    tolerance: Decimal,
}

impl PercentageDistribution {
    pub fn new(tolerance: Decimal) -> Result<Self, DistributionError> {
        if tolerance.is_sign_negative() {
            return Err(DistributionError::InvalidParameters(
                "share tolerance must not be negative".to_string(),
            ));
        }
        Ok(Self { tolerance })
    }

    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Fills in every share's amount from `total_revenue`.
    ///
    /// Each share is computed on its own; the result is not normalized when
    /// the percentages do not total 100. That check belongs to
    /// [`check_total`](Self::check_total) and only runs when saving.
    pub fn distribute(
        &self,
        total_revenue: Decimal,
        shares: &[TeamMemberShare],
    ) -> Result<Vec<TeamMemberShare>, DistributionError> {
        if total_revenue.is_sign_negative() {
            return Err(DistributionError::InvalidRevenue(total_revenue));
        }
        self.validate(shares)?;

        let distributed = shares
            .iter()
            .map(|share| TeamMemberShare {
                amount: share.percentage / Decimal::ONE_HUNDRED * total_revenue,
                ..share.clone()
            })
            .collect();

        tracing::debug!(%total_revenue, members = shares.len(), "Distributed revenue by percentage.");
        Ok(distributed)
    }

    /// Rejects the first share whose percentage lies outside 0-100.
    pub fn validate(&self, shares: &[TeamMemberShare]) -> Result<(), DistributionError> {
        let out_of_range = shares
            .iter()
            .find(|s| s.percentage < Decimal::ZERO || s.percentage > Decimal::ONE_HUNDRED);

        match out_of_range {
            Some(share) => Err(DistributionError::InvalidPercentage {
                member_id: share.member_id.clone(),
                member_name: share.member_name.clone(),
                percentage: share.percentage,
            }),
            None => Ok(()),
        }
    }

    /// Ensures a project's percentages total 100 within the tolerance.
    pub fn check_total(
        &self,
        project_id: &str,
        shares: &[TeamMemberShare],
    ) -> Result<Decimal, DistributionError> {
        let total = total_percentage(shares);
        if (total - Decimal::ONE_HUNDRED).abs() > self.tolerance {
            return Err(DistributionError::PercentageTotal {
                project_id: project_id.to_string(),
                total,
                tolerance: self.tolerance,
            });
        }
        Ok(total)
    }
}

impl Default for PercentageDistribution {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SHARE_TOLERANCE,
        }
    }
}

/// Sum of the shares' percentages.
pub fn total_percentage(shares: &[TeamMemberShare]) -> Decimal {
    shares.iter().map(|s| s.percentage).sum()
}
