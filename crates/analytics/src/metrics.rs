//! Stateless metric calculators.
//!
//! Every denominator that could be zero is floored at one with
//! [`floor_one`], which changes the meaning of the metric in the
//! degenerate case (CAC with no new customers equals the raw spend). The one
//! calculator that is left undefined, [`cash_runway`], returns `None`; callers
//! display it through [`core_types::finite_or_zero`].

use chrono::{DateTime, Utc};
use core_types::{Task, floor_one, percent_of};
use rust_decimal::Decimal;

const SECONDS_PER_DAY: i64 = 86_400;

/// Customer acquisition cost: `spend / max(1, new_customers)`.
pub fn customer_acquisition_cost(spend: Decimal, new_customers: u64) -> Decimal {
    spend / floor_one(Decimal::from(new_customers))
}

/// Customer lifetime value: `avg_revenue_per_customer * gross_margin`.
///
/// No churn discount is applied even though churn is tracked separately.
pub fn lifetime_value(avg_revenue_per_customer: Decimal, gross_margin: Decimal) -> Decimal {
    avg_revenue_per_customer * gross_margin
}

/// Months of operation left at the current burn. Undefined when nothing is burned.
pub fn cash_runway(cash_on_hand: Decimal, monthly_burn: Decimal) -> Option<Decimal> {
    if monthly_burn.is_zero() {
        return None;
    }
    Some(cash_on_hand / monthly_burn)
}

/// Average monthly spend: `expense / max(1, months)`.
pub fn burn_rate(expense: Decimal, months: u32) -> Decimal {
    expense / floor_one(Decimal::from(months))
}

/// Percentage of customers lost: `lost / max(1, total) * 100`.
pub fn churn_rate(lost_customers: u64, total_customers: u64) -> Decimal {
    Decimal::from(lost_customers) / floor_one(Decimal::from(total_customers)) * Decimal::ONE_HUNDRED
}

/// Profit as a percentage of income, zero without income.
pub fn gross_margin(income: Decimal, profit: Decimal) -> Decimal {
    percent_of(profit, income)
}

/// Story points of the sprint's tasks that are done.
///
/// Points are summed as `u64`, which cannot overflow for any realistic
/// number of `u32`-sized tasks.
pub fn sprint_velocity(tasks: &[Task], sprint_id: &str) -> u64 {
    tasks
        .iter()
        .filter(|t| t.in_sprint(sprint_id) && t.status.is_done())
        .map(|t| u64::from(t.points()))
        .sum()
}

/// Mean velocity over the given sprints, `Σ velocity / max(1, sprints)`.
pub fn average_velocity(tasks: &[Task], sprint_ids: &[&str]) -> Decimal {
    let total: Decimal = sprint_ids
        .iter()
        .map(|sprint_id| Decimal::from(sprint_velocity(tasks, sprint_id)))
        .sum();
    total / floor_one(Decimal::from(sprint_ids.len()))
}

/// Average age in days of the completed tasks, measured up to `now`.
///
/// Tasks carry no completion timestamp, so this is the time since creation,
/// not the time to completion, and keeps growing for old work.
pub fn cycle_time_days(tasks: &[Task], now: DateTime<Utc>) -> Decimal {
    let (count, seconds) = tasks
        .iter()
        .filter(|t| t.status.is_done())
        .fold((0u64, 0i64), |(count, seconds), task| {
            (count + 1, seconds + (now - task.created_at).num_seconds())
        });

    let days = Decimal::from(seconds) / Decimal::from(SECONDS_PER_DAY);
    days / floor_one(Decimal::from(count))
}

/// Percentage of estimated tasks that were completed on time.
///
/// Every done task counts as on time; no date comparison is made.
pub fn completion_rate(tasks: &[Task]) -> Decimal {
    let (estimated, on_time) = tasks
        .iter()
        .filter(|t| t.has_estimate())
        .fold((0u64, 0u64), |(estimated, on_time), task| {
            (estimated + 1, on_time + u64::from(task.status.is_done()))
        });

    Decimal::from(on_time) / floor_one(Decimal::from(estimated)) * Decimal::ONE_HUNDRED
}
