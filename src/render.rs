//! Table rendering for the CLI. Undefined metrics are coerced to zero here.

use analytics::{Burndown, FinanceReport};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use core_types::{Period, ProjectFinancial, TeamMemberShare};
use distribution::PoolAllocation;
use rust_decimal::Decimal;

fn money(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

fn right(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

pub(crate) fn periods(periods: &[Period]) -> Table {
    let mut t = table(vec!["Period", "Start", "End", "Income", "Expense", "Profit"]);
    for p in periods {
        t.add_row(vec![
            Cell::new(&p.label),
            Cell::new(p.start_date),
            Cell::new(p.end_date),
            right(money(p.income)),
            right(money(p.expense)),
            right(money(p.profit)),
        ]);
    }
    t
}

pub(crate) fn projects(projects: &[ProjectFinancial]) -> Table {
    let mut t = table(vec!["Project", "Income", "Fixed costs", "Variable costs", "Profit", "Margin %"]);
    for p in projects {
        t.add_row(vec![
            Cell::new(&p.project_id),
            right(money(p.income)),
            right(money(p.fixed_costs)),
            right(money(p.variable_costs)),
            right(money(p.profit)),
            right(money(p.margin)),
        ]);
    }
    t
}

pub(crate) fn report(report: &FinanceReport) -> Table {
    let mut t = table(vec!["Metric", "Value"]);
    for (label, value) in report.display_rows() {
        t.add_row(vec![Cell::new(label), right(money(value))]);
    }
    t
}

pub(crate) fn breakdown(title: &str, rows: &[(String, Decimal)]) -> Table {
    let mut t = table(vec![title, "Amount"]);
    for (category, amount) in rows {
        t.add_row(vec![Cell::new(category), right(money(*amount))]);
    }
    t
}

pub(crate) fn velocity(
    rows: &[(String, u64)],
    average: Decimal,
    cycle_days: Decimal,
    completion_pct: Decimal,
) -> Table {
    let mut t = table(vec!["Sprint", "Velocity (points)"]);
    for (sprint, points) in rows {
        t.add_row(vec![Cell::new(sprint), right(points)]);
    }
    t.add_row(vec![Cell::new("Average velocity"), right(money(average))]);
    t.add_row(vec![Cell::new("Cycle time (days)"), right(money(cycle_days))]);
    t.add_row(vec![Cell::new("Completion rate %"), right(money(completion_pct))]);
    t
}

pub(crate) fn burndown(chart: &Burndown) -> Table {
    let mut t = table(vec!["Date", "Ideal", "Actual"]);
    for point in &chart.points {
        let actual = point.actual.map(|a| a.to_string()).unwrap_or_default();
        t.add_row(vec![Cell::new(point.date), right(money(point.ideal)), right(actual)]);
    }
    t
}

pub(crate) fn shares(shares: &[TeamMemberShare]) -> Table {
    let mut t = table(vec!["Member", "Name", "Percentage", "Amount"]);
    for s in shares {
        t.add_row(vec![
            Cell::new(&s.member_id),
            Cell::new(&s.member_name),
            right(money(s.percentage)),
            right(money(s.amount)),
        ]);
    }
    t
}

pub(crate) fn pool(allocations: &[PoolAllocation], salary_ratio: Decimal) -> Table {
    let salary_header = format!("Salary ({}%)", money(salary_ratio * Decimal::ONE_HUNDRED));
    let mut t = table(vec!["Member", "Name", &salary_header, "Profit share", "Total"]);
    for a in allocations {
        t.add_row(vec![
            Cell::new(&a.member_id),
            Cell::new(&a.member_name),
            right(money(a.salary)),
            right(money(a.profit_share)),
            right(money(a.total)),
        ]);
    }
    t
}
