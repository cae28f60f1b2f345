// Crate-wide error type for the statistics pipeline.

use crate::table::TableError;
use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Every failure the pipeline can report. Nothing is recovered internally:
/// the first error aborts the whole call and reaches the caller unchanged.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The field map has no entry for a role the operation needs.
    #[error("field map has no entry for `{role}`")]
    Configuration { role: &'static str },

    /// A value that must be numeric could not be parsed.
    #[error("failed to parse column '{column}' value '{raw}': {message}")]
    Parse {
        column: String,
        raw: String,
        message: String,
    },

    /// A row does not carry a column the field map points at.
    #[error("row has no column '{column}'")]
    MissingColumn { column: String },

    /// A ranked player id has no entry in the name lookup table.
    #[error("player '{player_id}' not found in name lookup table")]
    UnknownPlayer { player_id: String },

    /// The underlying table could not be read.
    #[error(transparent)]
    Source(#[from] TableError),
}

impl StatsError {
    /// True for the two lookup failures (missing column, unknown player).
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            StatsError::MissingColumn { .. } | StatsError::UnknownPlayer { .. }
        )
    }
}
