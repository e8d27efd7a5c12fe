//! Read ports for the data the calculators consume, with JSON-file adapters.
//!
//! Each adapter reads a JSON array of backend-shaped objects and returns a
//! fresh snapshot on every call.

use crate::error::StoreError;
use core_types::{FinancialRecord, Task, TeamMember};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub trait RecordSource {
    /// All records, or only those of `project_id` when given.
    ///
    /// Every returned record has passed [`FinancialRecord::validate`].
    fn records(&self, project_id: Option<&str>) -> Result<Vec<FinancialRecord>, StoreError>;
}

pub trait TeamSource {
    fn members(&self) -> Result<Vec<TeamMember>, StoreError>;
}

pub trait TaskSource {
    /// All tasks, or only those assigned to `sprint_id` when given.
    fn tasks(&self, sprint_id: Option<&str>) -> Result<Vec<Task>, StoreError>;
}

#[derive(Debug, Clone)]
pub struct JsonRecordSource {
    path: PathBuf,
}

impl JsonRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonRecordSource {
    fn records(&self, project_id: Option<&str>) -> Result<Vec<FinancialRecord>, StoreError> {
        let mut records: Vec<FinancialRecord> = read_json_array(&self.path)?;
        for record in &records {
            record.validate().map_err(|source| StoreError::InvalidRecord {
                path: self.path.clone(),
                source,
            })?;
        }
        if let Some(project_id) = project_id {
            records.retain(|r| r.project_id == project_id);
        }
        Ok(records)
    }
}

#[derive(Debug, Clone)]
pub struct JsonTeamSource {
    path: PathBuf,
}

impl JsonTeamSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TeamSource for JsonTeamSource {
    fn members(&self) -> Result<Vec<TeamMember>, StoreError> {
        read_json_array(&self.path)
    }
}

#[derive(Debug, Clone)]
pub struct JsonTaskSource {
    path: PathBuf,
}

impl JsonTaskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskSource for JsonTaskSource {
    fn tasks(&self, sprint_id: Option<&str>) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = read_json_array(&self.path)?;
        if let Some(sprint_id) = sprint_id {
            tasks.retain(|t| t.in_sprint(sprint_id));
        }
        Ok(tasks)
    }
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items: Vec<T> = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), count = items.len(), "Loaded JSON source.");
    Ok(items)
}
