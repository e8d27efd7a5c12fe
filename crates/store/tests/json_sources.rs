use core_types::{RecordType, TaskStatus};
use rust_decimal_macros::dec;
use std::fs;
use store::{
    JsonFileShareRepository, JsonRecordSource, JsonTaskSource, JsonTeamSource, ProfitShareService,
    RecordSource, StoreError, TaskSource, TeamSource,
};
use tempfile::tempdir;

const RECORDS: &str = r#"[
  {"id": "1", "type": "income", "category": "sales", "amount": 1000, "date": "2024-01-05", "projectId": "alpha"},
  {"id": "2", "type": "expense", "category": "hosting", "amount": "400", "date": "2024-01-20", "projectId": "alpha", "costType": "fixed"},
  {"id": "3", "type": "income", "category": "sales", "amount": 50, "projectId": "beta"}
]"#;

const TEAM: &str = r#"[
  {"id": "m1", "name": "Ada", "availability": 100},
  {"id": "m2", "name": "Linus", "availability": 50}
]"#;

const TASKS: &str = r#"[
  {"id": "t1", "title": "Login", "status": "done", "storyPoints": 5, "sprintId": "s1", "createdAt": "2024-01-01T09:00:00Z"},
  {"id": "t2", "title": "Signup", "status": "in_progress", "storyPoints": 3, "sprintId": "s1", "createdAt": "2024-01-02T09:00:00Z", "estimatedDate": "2024-01-10"},
  {"id": "t3", "title": "Billing", "status": "todo", "sprintId": "s2", "createdAt": "2024-01-03T09:00:00Z"}
]"#;

#[test]
fn record_source_filters_by_project() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");
    fs::write(&path, RECORDS).unwrap();
    let source = JsonRecordSource::new(&path);

    assert_eq!(source.records(None).unwrap().len(), 3);
    let alpha = source.records(Some("alpha")).unwrap();
    assert_eq!(alpha.len(), 2);
    assert_eq!(alpha[1].record_type, RecordType::Expense);
    assert_eq!(alpha[1].amount, dec!(400));
    assert!(source.records(Some("gamma")).unwrap().is_empty());
}

#[test]
fn negative_amounts_are_rejected_by_record_id() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");
    fs::write(
        &path,
        r#"[
  {"id": "ok", "type": "income", "amount": 10, "date": "2024-01-01", "projectId": "alpha"},
  {"id": "refund-7", "type": "income", "amount": -500, "date": "2024-01-02", "projectId": "beta"}
]"#,
    )
    .unwrap();

    let err = JsonRecordSource::new(&path).records(None).unwrap_err();
    assert!(matches!(err, StoreError::InvalidRecord { .. }));
    let message = err.to_string();
    assert!(message.contains("refund-7"));
    assert!(message.contains("-500"));

    // The whole file is rejected, even when the bad record belongs to another project.
    assert!(JsonRecordSource::new(&path).records(Some("alpha")).is_err());
}

#[test]
fn team_and_task_sources() {
    let dir = tempdir().unwrap();
    let team_path = dir.path().join("team.json");
    let task_path = dir.path().join("tasks.json");
    fs::write(&team_path, TEAM).unwrap();
    fs::write(&task_path, TASKS).unwrap();

    let members = JsonTeamSource::new(&team_path).members().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[1].availability, dec!(50));

    let tasks = JsonTaskSource::new(&task_path);
    let sprint = tasks.tasks(Some("s1")).unwrap();
    assert_eq!(sprint.len(), 2);
    assert_eq!(sprint[0].status, TaskStatus::Done);
    assert_eq!(sprint[1].estimated_date.as_deref(), Some("2024-01-10"));
    assert_eq!(tasks.tasks(None).unwrap().len(), 3);
}

#[test]
fn missing_source_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let source = JsonRecordSource::new(dir.path().join("absent.json"));
    let err = source.records(None).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn service_over_json_file_persists_only_valid_saves() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shares.json");
    let service = ProfitShareService::new(
        JsonFileShareRepository::open(&path).unwrap(),
        distribution::PercentageDistribution::default(),
    );

    let shares = vec![
        core_types::TeamMemberShare::new("m1", "Ada", dec!(70)),
        core_types::TeamMemberShare::new("m2", "Linus", dec!(30)),
    ];
    service.update_profit_shares("alpha", shares, Some(dec!(2000))).unwrap();
    let saved_file = fs::read_to_string(&path).unwrap();

    let bad = vec![core_types::TeamMemberShare::new("m1", "Ada", dec!(70))];
    assert!(service.update_profit_shares("alpha", bad, None).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), saved_file);

    let reopened = JsonFileShareRepository::open(&path).unwrap();
    let service = ProfitShareService::new(reopened, distribution::PercentageDistribution::default());
    let alpha = service.project_shares("alpha").unwrap();
    assert_eq!(alpha[0].amount, dec!(1400));
    assert_eq!(alpha[1].amount, dec!(600));
}
