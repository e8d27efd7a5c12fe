//! Buckets financial records by time period and by project.

use chrono::{Datelike, Months, NaiveDate};
use crate::error::AnalyticsError;
use core_types::{
    CostType, FinancialRecord, Period, PeriodType, ProjectFinancial, RecordType, checked_total,
    percent_of,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Overall income, expense and profit of a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

/// Returns the empty bucket of the given granularity that contains `date`.
///
/// Months run first..last calendar day, quarters are Jan-Mar, Apr-Jun,
/// Jul-Sep and Oct-Dec, years run Jan 1..Dec 31.
pub fn period_for(date: NaiveDate, period_type: PeriodType) -> Option<Period> {
    let year = date.year();
    let month = date.month();

    let (label, start_month, span) = match period_type {
        PeriodType::Monthly => (format!("{year}-{month:02}"), month, 1),
        PeriodType::Quarterly => {
            let quarter = (month - 1) / 3;
            (format!("{year}-Q{}", quarter + 1), quarter * 3 + 1, 3)
        }
        PeriodType::Annual => (year.to_string(), 1, 12),
    };

    let start = NaiveDate::from_ymd_opt(year, start_month, 1)?;
    // First day of the following bucket, minus one day.
    let end = start.checked_add_months(Months::new(span))?.pred_opt()?;

    Some(Period::new(label, start, end))
}

/// Groups records into chronologically ordered period buckets.
///
/// Records without a usable date are left out. Only buckets that received at
/// least one record are returned, so empty input yields an empty vector.
/// Fails only when a bucket's sum overflows.
pub fn aggregate_by_period(
    records: &[FinancialRecord],
    period_type: PeriodType,
) -> Result<Vec<Period>, AnalyticsError> {
    let mut buckets: BTreeMap<NaiveDate, Period> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(bucket) = record
            .booking_date()
            .and_then(|date| period_for(date, period_type))
        else {
            skipped += 1;
            continue;
        };

        buckets
            .entry(bucket.start_date)
            .or_insert(bucket)
            .add(record)?;
    }

    if skipped > 0 {
        tracing::debug!(skipped, %period_type, "Excluded records without a valid date from period buckets.");
    }

    Ok(buckets.into_values().collect())
}

/// Rolls records up per project, ordered by project id.
///
/// Expenses without a cost type count as variable costs. Dates play no role
/// here, so undated records are included.
pub fn aggregate_by_project(
    records: &[FinancialRecord],
) -> Result<Vec<ProjectFinancial>, AnalyticsError> {
    let mut projects: BTreeMap<&str, ProjectFinancial> = BTreeMap::new();

    for record in records {
        let project = projects
            .entry(record.project_id.as_str())
            .or_insert_with(|| ProjectFinancial {
                project_id: record.project_id.clone(),
                income: Decimal::ZERO,
                fixed_costs: Decimal::ZERO,
                variable_costs: Decimal::ZERO,
                profit: Decimal::ZERO,
                margin: Decimal::ZERO,
            });

        let (column, name) = match (record.record_type, record.cost_type) {
            (RecordType::Income, _) => (&mut project.income, "income"),
            (RecordType::Expense, Some(CostType::Fixed)) => (&mut project.fixed_costs, "fixed costs"),
            (RecordType::Expense, _) => (&mut project.variable_costs, "variable costs"),
        };
        *column = checked_total(*column, record.amount, &format!("{name} of {}", record.project_id))?;
    }

    Ok(projects
        .into_values()
        .map(|mut project| {
            project.profit = project.income - project.fixed_costs - project.variable_costs;
            project.margin = percent_of(project.profit, project.income);
            project
        })
        .collect())
}

/// Sums every record into a single income/expense/profit triple.
pub fn totals(records: &[FinancialRecord]) -> Result<Totals, AnalyticsError> {
    let mut totals = Totals::default();
    for record in records {
        let (side, name) = match record.record_type {
            RecordType::Income => (&mut totals.income, "total income"),
            RecordType::Expense => (&mut totals.expense, "total expense"),
        };
        *side = checked_total(*side, record.amount, name)?;
    }
    totals.profit = totals.income - totals.expense;
    Ok(totals)
}

/// Sums the amounts of one record type per category, largest first.
pub fn category_breakdown(
    records: &[FinancialRecord],
    record_type: RecordType,
) -> Result<Vec<(String, Decimal)>, AnalyticsError> {
    let mut sums: HashMap<&str, Decimal> = HashMap::new();
    for record in records.iter().filter(|r| r.record_type == record_type) {
        let sum = sums.entry(record.category.as_str()).or_default();
        *sum = checked_total(*sum, record.amount, &format!("category '{}'", record.category))?;
    }

    let mut breakdown: Vec<(String, Decimal)> = sums
        .into_iter()
        .map(|(category, amount)| (category.to_string(), amount))
        .collect();
    // Ties broken by name so the output is stable.
    breakdown.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(breakdown)
}
