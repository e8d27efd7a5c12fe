use crate::error::DistributionError;
use core_types::TeamMember;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Share of the pool reserved for salaries when nothing else is configured.
pub const DEFAULT_SALARY_RATIO: Decimal = dec!(0.5);

/// What one member receives from a salary pool split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolAllocation {
    pub member_id: String,
    pub member_name: String,
    pub salary: Decimal,
    pub profit_share: Decimal,
    pub total: Decimal,
}

/// Fixed-salary plus equal profit-sharing split of a pool.
///
/// The pool is cut into a salary pot (`pool * salary_ratio`) and a profit pot
/// (the rest). Both pots are divided equally across the members. This policy
/// ignores any percentage shares saved for the project.
#[derive(Debug, Clone)]
pub struct SalaryPoolDistribution {
    salary_ratio: Decimal,
}

impl SalaryPoolDistribution {
    pub fn new(salary_ratio: Decimal) -> Result<Self, DistributionError> {
        if salary_ratio < Decimal::ZERO || salary_ratio > Decimal::ONE {
            return Err(DistributionError::InvalidParameters(format!(
                "salary_ratio must be between 0 and 1, got {salary_ratio}"
            )));
        }
        Ok(Self { salary_ratio })
    }

    pub fn salary_ratio(&self) -> Decimal {
        self.salary_ratio
    }

    /// Splits `pool` across `members`. No members means no allocations.
    pub fn allocate(
        &self,
        pool: Decimal,
        members: &[TeamMember],
    ) -> Result<Vec<PoolAllocation>, DistributionError> {
        if pool.is_sign_negative() {
            return Err(DistributionError::InvalidRevenue(pool));
        }
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let head_count = Decimal::from(members.len());
        let salary_pot = pool * self.salary_ratio;
        let profit_pot = pool - salary_pot;
        let salary = salary_pot / head_count;
        let profit_share = profit_pot / head_count;

        tracing::debug!(%pool, %salary_pot, %profit_pot, members = members.len(), "Allocated salary pool.");

        Ok(members
            .iter()
            .map(|member| PoolAllocation {
                member_id: member.id.clone(),
                member_name: member.name.clone(),
                salary,
                profit_share,
                total: salary + profit_share,
            })
            .collect())
    }
}

impl Default for SalaryPoolDistribution {
    fn default() -> Self {
        Self {
            salary_ratio: DEFAULT_SALARY_RATIO,
        }
    }
}
