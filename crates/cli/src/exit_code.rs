//! Exit code definitions for the store CLI
//!
//! Scripts branch on these values; a code keeps its meaning once released.

/// Exit codes for the store CLI application.
///
/// Every failure is fatal; the code only tells scripts which kind of
/// failure ended the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// Usage error, invalid path, missing configuration or any other failure
    Failure = 1,

    /// Network or storage service error
    NetworkError = 2,

    /// Authentication or permission failure
    AuthError = 3,

    /// Resource not found: bucket or object does not exist
    NotFound = 4,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::Failure),
            2 => Some(Self::NetworkError),
            3 => Some(Self::AuthError),
            4 => Some(Self::NotFound),
            _ => None,
        }
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::Failure => "Failure",
            Self::NetworkError => "Network or storage error",
            Self::AuthError => "Authentication or permission failure",
            Self::NotFound => "Resource not found",
        }
    }
}

impl From<&ds_core::Error> for ExitCode {
    fn from(err: &ds_core::Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::Failure)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
