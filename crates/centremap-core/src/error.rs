// crates/centremap-core/src/error.rs

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CentreError>;

/// Errors surfaced while loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CentreError {
    /// A source or cache file could not be located.
    #[error("dataset not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record-level CSV failures are skipped with a warning; this variant is
    /// reserved for failures that abort a whole read (bad path, broken header).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "xlsx")]
    #[error("workbook error: {0}")]
    Xlsx(#[from] calamine::Error),

    #[error("binary cache error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
