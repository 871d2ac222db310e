//! Error types for bucketit-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.
//! Per-file upload failures are not errors: they are recorded as failure
//! outcomes in the batch result and never abort a run.

use thiserror::Error;

/// Result type alias for bucketit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bucketit-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error (missing, unreadable, or invalid)
    #[error("Configuration error: {0}")]
    Config(String),

    /// No bucket given on the command line and no default bucket configured
    #[error("No bucket specified and no default bucket configured")]
    MissingBucket,

    /// Invalid combination of upload options
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Resource not found (local file or remote bucket)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication or permission failure
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,          // UsageError
            Error::MissingBucket => 2,      // UsageError
            Error::InvalidOptions(_) => 2,  // UsageError
            Error::InvalidUrl(_) => 2,      // UsageError
            Error::Network(_) => 3,         // NetworkError
            Error::Auth(_) => 4,            // AuthError
            Error::NotFound(_) => 5,        // NotFound
            _ => 1,                         // GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::MissingBucket.exit_code(), 2);
        assert_eq!(Error::InvalidOptions("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::Auth("test".into()).exit_code(), 4);
        assert_eq!(Error::NotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = Error::MissingBucket;
        assert_eq!(
            err.to_string(),
            "No bucket specified and no default bucket configured"
        );

        let err = Error::InvalidOptions("--filename cannot be combined with --recursive".into());
        assert!(err.to_string().contains("--filename"));
    }
}
