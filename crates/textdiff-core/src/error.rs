//! Error types for the diff crate.
//!
//! A plain comparison never fails. These errors only arise on the
//! cancellable and background paths.

/// Errors that can occur while running a comparison.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// The comparison was aborted through its cancellation token.
    #[error("comparison cancelled")]
    Cancelled,

    /// The background worker running the comparison failed.
    #[error("diff worker failed: {0}")]
    Worker(String),
}

/// Convenience alias for fallible diff operations.
pub type Result<T> = std::result::Result<T, DiffError>;
