use std::io;

use thiserror::Error;

/// Error type for pipeline loading, schema, configuration, and IO failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The dataset source could not be reached or parsed.
    #[error("failed to load dataset from '{source_id}': {reason}")]
    Load {
        /// URL or path the load was attempted from.
        source_id: String,
        /// Underlying failure description.
        reason: String,
    },
    /// An expected column is absent from a frame.
    #[error("column '{column}' not found in frame")]
    Schema {
        /// Name of the missing column.
        column: String,
    },
    /// The params file is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
    /// Filesystem failure while reading or writing artifacts.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// CSV encode/decode failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Catch-all for failures outside the known taxonomy.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}
