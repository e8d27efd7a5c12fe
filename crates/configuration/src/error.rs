use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// `origin` names what was being read: the explicit file, or the default
    /// `config.toml` plus environment.
    #[error("Failed to load configuration from {origin}: {source}")]
    LoadError {
        origin: String,
        #[source]
        source: config::ConfigError,
    },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
