use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("An error occurred during JSON serialization/deserialization of '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rejected record in '{}': {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        #[source]
        source: core_types::CoreError,
    },

    #[error(transparent)]
    Distribution(#[from] distribution::DistributionError),
}
