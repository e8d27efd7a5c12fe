use crate::error::ConfigError;
use rust_decimal::Decimal;
use std::path::Path;

pub mod error;
pub mod settings;

pub use settings::{
    Config, DistributionSettings, LoggingSettings, ReportingSettings, StorageSettings,
};

/// Prefix of environment variables that override file settings,
/// e.g. `LEDGER_DISTRIBUTION__SALARY_RATIO=0.6`.
pub const ENV_PREFIX: &str = "LEDGER";

/// Loads the configuration, reading `path` instead of `./config.toml` when given.
///
/// The file is optional when no explicit path is passed. `LEDGER_*`
/// environment variables are applied on top, then the result is validated.
pub fn load_config_from(path: Option<&Path>) -> Result<Config, ConfigError> {
    load(path, None)
}

/// Shared loader. `env_vars` replaces the process environment when given.
fn load(
    path: Option<&Path>,
    env_vars: Option<config::Map<String, String>>,
) -> Result<Config, ConfigError> {
    let (file, origin) = match path {
        Some(path) => (
            config::File::from(path).required(true),
            format!("'{}'", path.display()),
        ),
        None => (
            config::File::with_name("config").required(false),
            format!("config.toml and {ENV_PREFIX}_* environment"),
        ),
    };
    let load_error = |source| ConfigError::LoadError {
        origin: origin.clone(),
        source,
    };

    let environment = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .source(env_vars);

    let config = config::Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()
        .and_then(|built| built.try_deserialize::<Config>())
        .map_err(load_error)?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

/// Checks that the distribution parameters are usable.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let distribution = &config.distribution;
    if distribution.share_tolerance.is_sign_negative() {
        return Err(ConfigError::ValidationError(
            "distribution.share_tolerance must not be negative".to_string(),
        ));
    }
    if distribution.salary_ratio < Decimal::ZERO || distribution.salary_ratio > Decimal::ONE {
        return Err(ConfigError::ValidationError(
            "distribution.salary_ratio must be between 0 and 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PeriodType;
    use rust_decimal_macros::dec;
    use std::fs;
    use std::sync::{LazyLock, Mutex};
    use tempfile::tempdir;

    /// Serializes the tests that set `LEDGER_*` variables in the process
    /// environment; `std::env::set_var` is unsafe while other threads read it.
    static ENV_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

    const SALARY_RATIO_VAR: &str = "LEDGER_DISTRIBUTION__SALARY_RATIO";

    /// Loads `path` against an empty environment so a developer's shell
    /// cannot leak `LEDGER_*` values into the result.
    fn load_isolated(path: &Path) -> Result<Config, ConfigError> {
        load(Some(path), Some(config::Map::new()))
    }

    fn write_config(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_apply_to_an_empty_file() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "config.toml", "");

        let config = load_isolated(&path).unwrap();
        assert_eq!(config.distribution.share_tolerance, dec!(0.01));
        assert_eq!(config.distribution.salary_ratio, dec!(0.5));
        assert_eq!(config.reporting.default_period, PeriodType::Monthly);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "ledger.toml",
            r#"
[distribution]
salary_ratio = "0.7"

[reporting]
default_period = "quarterly"

[storage]
records_path = "fixtures/records.json"

[logging]
level = "debug"
directory = "logs"
"#,
        );

        let config = load_isolated(&path).unwrap();
        assert_eq!(config.distribution.salary_ratio, dec!(0.7));
        assert_eq!(config.distribution.share_tolerance, dec!(0.01));
        assert_eq!(config.reporting.default_period, PeriodType::Quarterly);
        assert_eq!(config.storage.records_path, Path::new("fixtures/records.json"));
        assert_eq!(config.storage.shares_path, Path::new("data/shares.json"));
        assert_eq!(config.logging.directory.as_deref(), Some(Path::new("logs")));
    }

    #[test]
    fn environment_overrides_the_file() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "config.toml",
            "[distribution]\nsalary_ratio = \"0.7\"\n",
        );
        let env_vars: config::Map<String, String> = [
            (SALARY_RATIO_VAR.to_string(), "0.6".to_string()),
            ("LEDGER_REPORTING__DEFAULT_PERIOD".to_string(), "annual".to_string()),
            ("OTHER_DISTRIBUTION__SALARY_RATIO".to_string(), "0.9".to_string()),
        ]
        .into_iter()
        .collect();

        let config = load(Some(&path), Some(env_vars)).unwrap();
        assert_eq!(config.distribution.salary_ratio, dec!(0.6));
        assert_eq!(config.reporting.default_period, PeriodType::Annual);
    }

    #[test]
    fn process_environment_is_applied_and_validated() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "config.toml", "");
        let saved = std::env::var(SALARY_RATIO_VAR).ok();

        unsafe { std::env::set_var(SALARY_RATIO_VAR, "0.6") };
        let applied = load_config_from(Some(&path));

        unsafe { std::env::set_var(SALARY_RATIO_VAR, "2") };
        let rejected = load_config_from(Some(&path));

        // Restore
        match saved {
            Some(value) => unsafe { std::env::set_var(SALARY_RATIO_VAR, value) },
            None => unsafe { std::env::remove_var(SALARY_RATIO_VAR) },
        }

        assert_eq!(applied.unwrap().distribution.salary_ratio, dec!(0.6));
        assert!(matches!(rejected, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn out_of_range_ratio_fails_validation() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "bad.toml", "[distribution]\nsalary_ratio = \"1.5\"\n");

        let err = load_isolated(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("salary_ratio")));
    }

    #[test]
    fn missing_explicit_file_names_the_file() {
        let dir = tempdir().unwrap();
        let err = load_isolated(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn negative_tolerance_fails_validation() {
        let mut config = Config::default();
        config.distribution.share_tolerance = dec!(-0.5);
        assert!(validate(&config).is_err());
    }
}
