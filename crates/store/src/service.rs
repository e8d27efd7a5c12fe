use crate::error::StoreError;
use crate::repository::ShareRepository;
use core_types::TeamMemberShare;
use distribution::PercentageDistribution;
use rust_decimal::Decimal;

/// Saves profit shares through a `ShareRepository`, enforcing the
/// 100% rule at the save boundary.
pub struct ProfitShareService<R: ShareRepository> {
    repository: R,
    rules: PercentageDistribution,
}

impl<R: ShareRepository> ProfitShareService<R> {
    pub fn new(repository: R, rules: PercentageDistribution) -> Self {
        Self { repository, rules }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validates and saves a project's shares, replacing all previous ones.
    ///
    /// Every share must lie within 0-100 and together they must total 100
    /// within the configured tolerance. When `total_revenue` is given the
    /// amounts are recomputed from it; otherwise they are stored as passed.
    /// Nothing is written unless every check passes.
    pub fn update_profit_shares(
        &self,
        project_id: &str,
        shares: Vec<TeamMemberShare>,
        total_revenue: Option<Decimal>,
    ) -> Result<Vec<TeamMemberShare>, StoreError> {
        let checked = self.validate(project_id, shares, total_revenue).inspect_err(|e| {
            tracing::warn!(project_id, error = %e, "Rejected profit share update.");
        })?;

        self.repository
            .replace_project_shares(project_id, checked.clone())?;

        tracing::info!(project_id, members = checked.len(), "Saved profit shares.");
        Ok(checked)
    }

    /// The shares currently saved for a project.
    pub fn project_shares(&self, project_id: &str) -> Result<Vec<TeamMemberShare>, StoreError> {
        self.repository.project_shares(project_id)
    }

    fn validate(
        &self,
        project_id: &str,
        shares: Vec<TeamMemberShare>,
        total_revenue: Option<Decimal>,
    ) -> Result<Vec<TeamMemberShare>, StoreError> {
        let shares = match total_revenue {
            Some(revenue) => self.rules.distribute(revenue, &shares)?,
            None => {
                self.rules.validate(&shares)?;
                shares
            }
        };
        self.rules.check_total(project_id, &shares)?;
        Ok(shares)
    }
}
