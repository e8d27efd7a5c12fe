use crate::enums::{CostType, RecordType, TaskStatus};
use crate::error::CoreError;
use crate::numeric::checked_total;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single income or expense entry as delivered by the record source.
///
/// Records are immutable once created. The `date` is kept as the raw string
/// the source produced; [`FinancialRecord::booking_date`] interprets it, and
/// records whose date cannot be interpreted are left out of period buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(default)]
    pub category: String,
    pub amount: Decimal,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub cost_type: Option<CostType>,
}

impl FinancialRecord {
    /// Checks the rules serde cannot express: the amount must not be negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(CoreError::InvalidRecord {
                id: self.id.clone(),
                reason: format!("amount {} must not be negative", self.amount),
            });
        }
        Ok(())
    }

    /// The calendar date of the record, if its raw date is usable.
    ///
    /// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (taking the UTC date).
    pub fn booking_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|ts| ts.with_timezone(&Utc).date_naive())
        })
    }
}

/// Income, expense and profit of one time bucket.
///
/// Periods are always derived from records and never stored on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

impl Period {
    /// Creates an empty, zeroed bucket.
    pub fn new(label: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            label: label.into(),
            start_date,
            end_date,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            profit: Decimal::ZERO,
        }
    }

    /// Adds a record's amount to the matching side and refreshes the profit.
    pub fn add(&mut self, record: &FinancialRecord) -> Result<(), CoreError> {
        let (side, name) = match record.record_type {
            RecordType::Income => (&mut self.income, "income"),
            RecordType::Expense => (&mut self.expense, "expense"),
        };
        *side = checked_total(*side, record.amount, &format!("{name} of {}", self.label))?;
        self.profit = self.income - self.expense;
        Ok(())
    }
}

/// Per-project roll-up of income and costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFinancial {
    pub project_id: String,
    pub income: Decimal,
    pub fixed_costs: Decimal,
    pub variable_costs: Decimal,
    pub profit: Decimal,
    /// Profit as a percentage of income; zero when there is no income.
    pub margin: Decimal,
}

/// A team member as returned by the team-member source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    /// Share of the member's time available to the project, 0-100.
    #[serde(default)]
    pub availability: Decimal,
}

/// One member's slice of a project's profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberShare {
    pub member_id: String,
    pub member_name: String,
    /// 0-100. Across a project the percentages must total 100 when saved.
    pub percentage: Decimal,
    #[serde(default)]
    pub amount: Decimal,
}

impl TeamMemberShare {
    pub fn new(member_id: impl Into<String>, member_name: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            member_id: member_id.into(),
            member_name: member_name.into(),
            percentage,
            amount: Decimal::ZERO,
        }
    }
}

/// A task on the board, reduced to the fields the sprint metrics read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub story_points: Option<u32>,
    #[serde(default)]
    pub sprint_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub estimated_date: Option<String>,
}

impl Task {
    pub fn points(&self) -> u32 {
        self.story_points.unwrap_or(0)
    }

    pub fn has_estimate(&self) -> bool {
        self.estimated_date
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }

    pub fn in_sprint(&self, sprint_id: &str) -> bool {
        self.sprint_id.as_deref() == Some(sprint_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record_with_date(date: Option<&str>) -> FinancialRecord {
        FinancialRecord {
            id: "r1".into(),
            record_type: RecordType::Income,
            category: "sales".into(),
            amount: dec!(10),
            date: date.map(str::to_string),
            project_id: "p1".into(),
            cost_type: None,
        }
    }

    #[test]
    fn booking_date_accepts_plain_and_rfc3339_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(record_with_date(Some("2024-01-05")).booking_date(), Some(expected));
        assert_eq!(
            record_with_date(Some("2024-01-05T10:30:00Z")).booking_date(),
            Some(expected)
        );
    }

    #[test]
    fn booking_date_rejects_missing_or_garbage() {
        assert_eq!(record_with_date(None).booking_date(), None);
        assert_eq!(record_with_date(Some("  ")).booking_date(), None);
        assert_eq!(record_with_date(Some("2024-13-40")).booking_date(), None);
        assert_eq!(record_with_date(Some("yesterday")).booking_date(), None);
    }

    #[test]
    fn negative_amount_fails_validation_naming_the_record() {
        let mut record = record_with_date(Some("2024-01-05"));
        assert!(record.validate().is_ok());

        record.amount = dec!(-1);
        let err = record.validate().unwrap_err();
        assert!(matches!(&err, CoreError::InvalidRecord { id, .. } if id == "r1"));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn period_profit_tracks_both_sides() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let mut period = Period::new("2024-01", start, end);
        period.add(&record_with_date(Some("2024-01-05"))).unwrap();
        let mut expense = record_with_date(Some("2024-01-06"));
        expense.record_type = RecordType::Expense;
        expense.amount = dec!(4);
        period.add(&expense).unwrap();
        assert_eq!(period.income, dec!(10));
        assert_eq!(period.expense, dec!(4));
        assert_eq!(period.profit, dec!(6));
    }

    #[test]
    fn period_rejects_overflowing_sums() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut period = Period::new("2024-01", start, start);
        let mut huge = record_with_date(Some("2024-01-01"));
        huge.amount = Decimal::MAX;

        period.add(&huge).unwrap();
        let err = period.add(&huge).unwrap_err();
        assert_eq!(err, CoreError::Overflow("income of 2024-01".to_string()));
        assert_eq!(period.income, Decimal::MAX);
    }

    #[test]
    fn record_deserializes_from_backend_shape() {
        let json = r#"{"id":"a","type":"expense","category":"hosting","amount":120.5,
            "date":"2024-02-01","projectId":"p9","costType":"fixed"}"#;
        let record: FinancialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.record_type, RecordType::Expense);
        assert_eq!(record.amount, dec!(120.5));
        assert_eq!(record.project_id, "p9");
        assert_eq!(record.cost_type, Some(CostType::Fixed));
    }

    #[test]
    fn task_estimate_must_be_non_empty() {
        let mut task = Task {
            id: "t".into(),
            title: String::new(),
            status: TaskStatus::Done,
            story_points: None,
            sprint_id: Some("s1".into()),
            created_at: Utc::now(),
            estimated_date: Some("".into()),
        };
        assert!(!task.has_estimate());
        task.estimated_date = Some("2024-03-01".into());
        assert!(task.has_estimate());
        assert!(task.in_sprint("s1"));
        assert_eq!(task.points(), 0);
    }
}
