//! Error types used by the ticker checker binary.
use thiserror::Error;
use ticker_common::CheckError;

/// Failure of a whole checker run.
#[derive(Error, Debug)]
pub enum RunError {
    /// Loading inputs or parsing a symbol failed.
    #[error(transparent)]
    Check(#[from] CheckError),

    /// A worker thread could not be started or collected.
    #[error("Worker error: {0}")]
    Worker(String),

    /// At least one symbol did not pass.
    #[error("{failed} of {total} checks failed")]
    Failed {
        /// Number of failing checks.
        failed: usize,
        /// Number of checks run.
        total: usize,
    },
}
