use crate::aggregation::totals;
use crate::error::AnalyticsError;
use crate::metrics;
use crate::report::FinanceReport;
use chrono::{Datelike, NaiveDate};
use core_types::FinancialRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer and cash figures that do not come from the record collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInputs {
    pub cash_on_hand: Decimal,
    pub acquisition_spend: Decimal,
    pub new_customers: u64,
    pub lost_customers: u64,
    pub total_customers: u64,
    pub avg_revenue_per_customer: Decimal,
}

/// A stateless calculator for deriving the finance dashboard from records.
#[derive(Debug, Default)]
pub struct FinanceEngine {}

impl FinanceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating the finance report.
    ///
    /// # Arguments
    ///
    /// * `records` - The current snapshot of financial records.
    /// * `inputs` - Cash and customer figures tracked outside the records.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `FinanceReport` or an `AnalyticsError`.
    pub fn calculate(
        &self,
        records: &[FinancialRecord],
        inputs: &CustomerInputs,
    ) -> Result<FinanceReport, AnalyticsError> {
        let mut report = FinanceReport::new();

        self.calculate_totals(records, &mut report)?;
        self.calculate_cash(records, inputs, &mut report)?;
        self.calculate_customers(inputs, &mut report);

        tracing::debug!(
            records = records.len(),
            net_profit = %report.net_profit,
            burn_rate = %report.burn_rate,
            "Finance report calculated."
        );

        Ok(report)
    }

    fn calculate_totals(
        &self,
        records: &[FinancialRecord],
        report: &mut FinanceReport,
    ) -> Result<(), AnalyticsError> {
        let sums = totals(records)?;
        report.total_income = sums.income;
        report.total_expense = sums.expense;
        report.net_profit = sums.profit;
        report.gross_margin_pct = metrics::gross_margin(sums.income, sums.profit);
        Ok(())
    }

    fn calculate_cash(
        &self,
        records: &[FinancialRecord],
        inputs: &CustomerInputs,
        report: &mut FinanceReport,
    ) -> Result<(), AnalyticsError> {
        report.months_covered = months_covered(records)?;
        report.burn_rate = metrics::burn_rate(report.total_expense, report.months_covered);
        report.cash_runway_months = metrics::cash_runway(inputs.cash_on_hand, report.burn_rate);
        Ok(())
    }

    fn calculate_customers(&self, inputs: &CustomerInputs, report: &mut FinanceReport) {
        report.cac = metrics::customer_acquisition_cost(inputs.acquisition_spend, inputs.new_customers);
        // The margin enters LTV as a fraction, not a percentage.
        let margin_fraction = report.gross_margin_pct / Decimal::ONE_HUNDRED;
        report.ltv = metrics::lifetime_value(inputs.avg_revenue_per_customer, margin_fraction);
        if !report.cac.is_zero() {
            report.ltv_to_cac = Some(report.ltv / report.cac);
        }
        report.churn_rate_pct = metrics::churn_rate(inputs.lost_customers, inputs.total_customers);
    }
}

/// Number of calendar months from the earliest to the latest dated record, inclusive.
fn months_covered(records: &[FinancialRecord]) -> Result<u32, AnalyticsError> {
    let dates: Vec<NaiveDate> = records.iter().filter_map(FinancialRecord::booking_date).collect();
    let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) else {
        return Ok(0);
    };

    let index = |d: &NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
    let span = index(last) - index(first) + 1;
    u32::try_from(span)
        .map_err(|_| AnalyticsError::Calculation(format!("month span {span} out of range")))
}
