use core_types::PeriodType;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section may be omitted, in which case its defaults apply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub distribution: DistributionSettings,
    #[serde(default)]
    pub reporting: ReportingSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Parameters of the two profit distribution policies.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DistributionSettings {
    /// How far a saved split may deviate from 100%. 0.01 means ±0.01 points.
    pub share_tolerance: Decimal,
    /// Fraction of a pool paid out as salary by the salary-pool policy.
    pub salary_ratio: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportingSettings {
    /// Granularity used when no `--period` is given.
    pub default_period: PeriodType,
}

/// Locations of the JSON files standing in for the backend and local cache.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub records_path: PathBuf,
    pub team_path: PathBuf,
    pub tasks_path: PathBuf,
    pub shares_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---
// These allow a user to omit any section from their toml and still have
// it work with sensible defaults.

impl Default for DistributionSettings {
    fn default() -> Self {
        Self {
            share_tolerance: dec!(0.01),
            salary_ratio: dec!(0.5),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from("data/records.json"),
            team_path: PathBuf::from("data/team.json"),
            tasks_path: PathBuf::from("data/tasks.json"),
            shares_path: PathBuf::from("data/shares.json"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
