//! Exit code definitions for the bucketit CLI
//!
//! Scripts key off these values, so they are part of the tool's contract.

use bucketit_core::Error;

/// Exit codes for the bucketit CLI application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every file uploaded successfully
    Success = 0,

    /// General error, including a batch that completed with failures
    GeneralError = 1,

    /// User input error: missing bucket, invalid option combination,
    /// missing or invalid configuration
    UsageError = 2,

    /// Retryable network error
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// Local file or remote bucket does not exist
    NotFound = 5,

    /// Operation was interrupted (e.g., Ctrl+C)
    Interrupted = 130,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            5 => Some(Self::NotFound),
            130 => Some(Self::Interrupted),
            _ => None,
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(error: &Error) -> Self {
        match Self::from_i32(error.exit_code()) {
            Some(code) => code,
            None => Self::GeneralError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::UsageError.as_i32(), 2);
        assert_eq!(ExitCode::NetworkError.as_i32(), 3);
        assert_eq!(ExitCode::AuthError.as_i32(), 4);
        assert_eq!(ExitCode::NotFound.as_i32(), 5);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_exit_code_from_i32() {
        assert_eq!(ExitCode::from_i32(0), Some(ExitCode::Success));
        assert_eq!(ExitCode::from_i32(2), Some(ExitCode::UsageError));
        assert_eq!(ExitCode::from_i32(130), Some(ExitCode::Interrupted));
        assert_eq!(ExitCode::from_i32(99), None);
    }

    #[test]
    fn test_exit_code_from_core_error() {
        assert_eq!(ExitCode::from(&Error::MissingBucket), ExitCode::UsageError);
        assert_eq!(
            ExitCode::from(&Error::InvalidOptions("x".into())),
            ExitCode::UsageError
        );
        assert_eq!(
            ExitCode::from(&Error::Network("x".into())),
            ExitCode::NetworkError
        );
        assert_eq!(ExitCode::from(&Error::Auth("x".into())), ExitCode::AuthError);
        assert_eq!(
            ExitCode::from(&Error::NotFound("x".into())),
            ExitCode::NotFound
        );
        assert_eq!(
            ExitCode::from(&Error::General("x".into())),
            ExitCode::GeneralError
        );
    }
}
