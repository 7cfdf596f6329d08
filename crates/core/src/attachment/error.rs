//! Transformation error types.

use attache_shared::token::TokenError;
use thiserror::Error;

/// Attachment transformation errors.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Submitted view representation violated the form contract.
    #[error("malformed submission: {0}")]
    MalformedSubmission(String),

    /// Token failed verification and the integrity policy is `Fail`.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Object store lookup failed.
    #[error("object store error: {0}")]
    Store(String),

    /// Upload acceptor failed.
    #[error("upload error: {0}")]
    Upload(String),
}

impl TransformError {
    /// Create a malformed submission error.
    #[must_use]
    pub fn malformed_submission(msg: impl Into<String>) -> Self {
        Self::MalformedSubmission(msg.into())
    }

    /// Create an object store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create an upload error.
    #[must_use]
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }
}
