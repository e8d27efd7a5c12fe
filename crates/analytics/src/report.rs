use core_types::finite_or_zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The finance dashboard figures derived from a set of records.
///
/// This struct is the final output of the `FinanceEngine` and is recomputed
/// whenever the underlying records change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceReport {
    // I. Totals
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_profit: Decimal,
    pub gross_margin_pct: Decimal,

    // II. Cash
    /// Calendar months spanned by the dated records (zero without dates).
    pub months_covered: u32,
    pub burn_rate: Decimal,
    pub cash_runway_months: Option<Decimal>, // None when the burn rate is zero

    // III. Customers
    pub cac: Decimal,
    pub ltv: Decimal,
    pub ltv_to_cac: Option<Decimal>, // None when CAC is zero
    pub churn_rate_pct: Decimal,
}

impl FinanceReport {
    /// Creates a new, zeroed-out FinanceReport.
    pub fn new() -> Self {
        Self {
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            gross_margin_pct: Decimal::ZERO,
            months_covered: 0,
            burn_rate: Decimal::ZERO,
            cash_runway_months: None,
            cac: Decimal::ZERO,
            ltv: Decimal::ZERO,
            ltv_to_cac: None,
            churn_rate_pct: Decimal::ZERO,
        }
    }

    /// Label/value pairs ready for display, with undefined metrics shown as zero.
    pub fn display_rows(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("Total income", self.total_income),
            ("Total expense", self.total_expense),
            ("Net profit", self.net_profit),
            ("Gross margin %", self.gross_margin_pct.round_dp(2)),
            ("Months covered", Decimal::from(self.months_covered)),
            ("Burn rate / month", self.burn_rate.round_dp(2)),
            ("Cash runway (months)", finite_or_zero(self.cash_runway_months).round_dp(1)),
            ("CAC", self.cac.round_dp(2)),
            ("LTV", self.ltv.round_dp(2)),
            ("LTV : CAC", finite_or_zero(self.ltv_to_cac).round_dp(2)),
            ("Churn rate %", self.churn_rate_pct.round_dp(2)),
        ]
    }
}

impl Default for FinanceReport {
    fn default() -> Self {
        Self::new()
    }
}
