//! Error types for the kireji library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`KirejiError`] enum.

use thiserror::Error;

/// The main error type for kireji operations.
#[derive(Error, Debug)]
pub enum KirejiError {
    /// Tokenization or snippet assembly errors.
    #[error("analysis error: {0}")]
    Analysis(String),

    /// A caller-supplied value was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with [`KirejiError`].
pub type Result<T> = std::result::Result<T, KirejiError>;

impl KirejiError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KirejiError::Analysis(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        KirejiError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KirejiError::analysis("bad token stream");
        assert_eq!(error.to_string(), "analysis error: bad token stream");

        let error = KirejiError::invalid_argument("unknown mode");
        assert_eq!(error.to_string(), "invalid argument: unknown mode");
    }
}
