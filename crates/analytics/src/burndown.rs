use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::Task;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day of a sprint burndown chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownPoint {
    pub date: NaiveDate,
    /// Remaining points on a straight line from the total down to zero.
    pub ideal: Decimal,
    /// Remaining points as observed; `None` for days that have not happened yet.
    pub actual: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Burndown {
    pub sprint_id: String,
    pub total_points: u64,
    pub remaining_points: u64,
    pub points: Vec<BurndownPoint>,
}

/// Builds the burndown of a sprint running from `start` to `end` inclusive.
///
/// Tasks have no completion timestamp, so every done task is burned on the
/// day the chart is computed (`today`, clamped to the sprint's last day).
/// Earlier days show the full total.
pub fn sprint_burndown(
    sprint_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    tasks: &[Task],
    today: NaiveDate,
) -> Result<Burndown, AnalyticsError> {
    if end < start {
        return Err(AnalyticsError::InvalidSprintWindow {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let sprint_tasks = tasks.iter().filter(|t| t.in_sprint(sprint_id));
    let (total_points, done_points) = sprint_tasks.fold((0u64, 0u64), |(total, done), task| {
        let points = u64::from(task.points());
        let burned = if task.status.is_done() { points } else { 0 };
        (total + points, done + burned)
    });
    let remaining_points = total_points - done_points;

    let days: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
    let steps = Decimal::from(days.len().saturating_sub(1).max(1));
    let total = Decimal::from(total_points);
    let burn_day = today.min(end);

    let points = days
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let ideal = (total - total * Decimal::from(i) / steps).max(Decimal::ZERO);
            let actual = if date > today {
                None
            } else if date < burn_day {
                Some(total_points)
            } else {
                Some(remaining_points)
            };
            BurndownPoint { date, ideal, actual }
        })
        .collect();

    tracing::debug!(sprint_id, total_points, remaining_points, "Computed sprint burndown.");

    Ok(Burndown {
        sprint_id: sprint_id.to_string(),
        total_points,
        remaining_points,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::TaskStatus;
    use rust_decimal_macros::dec;

    fn ymd(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn task(status: TaskStatus, points: u32) -> Task {
        Task {
            id: format!("{status:?}-{points}"),
            title: String::new(),
            status,
            story_points: Some(points),
            sprint_id: Some("s1".into()),
            created_at: Utc::now(),
            estimated_date: None,
        }
    }

    #[test]
    fn burndown_mid_sprint() {
        let tasks = vec![task(TaskStatus::Done, 4), task(TaskStatus::Todo, 6)];
        let chart = sprint_burndown("s1", ymd(1), ymd(5), &tasks, ymd(3)).unwrap();

        assert_eq!(chart.total_points, 10);
        assert_eq!(chart.remaining_points, 6);
        let ideal: Vec<_> = chart.points.iter().map(|p| p.ideal).collect();
        assert_eq!(ideal, vec![dec!(10), dec!(7.5), dec!(5), dec!(2.5), dec!(0)]);
        let actual: Vec<_> = chart.points.iter().map(|p| p.actual).collect();
        assert_eq!(actual, vec![Some(10), Some(10), Some(6), None, None]);
    }

    #[test]
    fn burndown_after_sprint_end_burns_on_last_day() {
        let tasks = vec![task(TaskStatus::Done, 3), task(TaskStatus::Review, 2)];
        let chart = sprint_burndown("s1", ymd(1), ymd(3), &tasks, ymd(20)).unwrap();
        let actual: Vec<_> = chart.points.iter().map(|p| p.actual).collect();
        assert_eq!(actual, vec![Some(5), Some(5), Some(2)]);
    }

    #[test]
    fn single_day_sprint_and_other_sprints_ignored() {
        let mut foreign = task(TaskStatus::Done, 50);
        foreign.sprint_id = Some("s2".into());
        let tasks = vec![task(TaskStatus::Todo, 2), foreign];
        let chart = sprint_burndown("s1", ymd(1), ymd(1), &tasks, ymd(1)).unwrap();
        assert_eq!(chart.total_points, 2);
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].ideal, dec!(2));
        assert_eq!(chart.points[0].actual, Some(2));
    }

    #[test]
    fn reversed_window_is_rejected() {
        let err = sprint_burndown("s1", ymd(5), ymd(1), &[], ymd(1)).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidSprintWindow { .. }));
    }

    #[test]
    fn huge_estimates_do_not_overflow_the_chart() {
        let tasks = vec![task(TaskStatus::Done, 3_000_000_000), task(TaskStatus::Todo, 3_000_000_000)];
        let chart = sprint_burndown("s1", ymd(1), ymd(2), &tasks, ymd(2)).unwrap();
        assert_eq!(chart.total_points, 6_000_000_000);
        assert_eq!(chart.remaining_points, 3_000_000_000);
        assert_eq!(chart.points[1].actual, Some(3_000_000_000));
    }
}
