//! Error types for the DFS lineup optimizer

use thiserror::Error;


pub type Result<T> = std::result::Result<T, DfsError>;

#[derive(Error, Debug)]
pub enum DfsError {
    #[error("Player not found: {query}")]
    PlayerNotFound { query: String },

    #[error("Ambiguous player name {query:?} matches ids {ids:?}")]
    AmbiguousPlayer { query: String, ids: Vec<u64> },

    #[error("Unsupported site: {site}")]
    UnsupportedSite { site: String },

    #[error("Player pool for {site} is empty")]
    EmptyPool { site: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Duplicate player id in pool: {id}")]
    DuplicatePlayerId { id: u64 },

    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    #[error("Invalid week: {week} (expected 1-22)")]
    InvalidWeek { week: u16 },

    #[error("Invalid constraint: {message}")]
    InvalidConstraint { message: String },

    #[error("Solver failed: {message}")]
    Solver { message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Could not determine cache directory")]
    NoCacheDir,
}

impl DfsError {
    /// True for the name/id lookup failures raised while setting constraints.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            DfsError::PlayerNotFound { .. } | DfsError::AmbiguousPlayer { .. }
        )
    }
}
