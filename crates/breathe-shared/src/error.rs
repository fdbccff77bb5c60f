//! Error types for breathe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("No usable location for the stats file")]
    NoStorageLocation,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StatsError {
    /// Short machine-friendly tag, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            StatsError::NoStorageLocation => "no_storage_location",
            StatsError::Io(_) => "io",
            StatsError::Json(_) => "json",
        }
    }
}
