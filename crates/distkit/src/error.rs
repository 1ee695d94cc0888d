//! Error types for detection, planning and install orchestration.
//!
//! Every variant is fatal to the run: nothing here is retried. Errors are
//! categorized so the caller can pick a message and an exit status.

use crate::types::{Tier, WaitStatus};
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for distkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Distributions the dependency catalog knows how to serve.
pub const SUPPORTED_PLATFORMS: &str = "Ubuntu 20/22/24, RedHat 8/9, & SLES 15";

/// Exit status used for fatal precondition failures (`-1` as a byte).
pub const PRECONDITION_EXIT: u8 = 255;

/// Exit status used when the privilege helper cannot be found.
pub const HELPER_MISSING_EXIT: u8 = 127;

/// Categories of errors for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Distribution or distribution/tier combination not supported.
    Platform,
    /// Privilege escalation is not possible.
    Privilege,
    /// A package-manager command exited non-zero.
    Command,
    /// Filesystem or process spawn failure.
    Io,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Platform => "Unsupported platform",
            Self::Privilege => "Privilege escalation unavailable",
            Self::Command => "Package manager command failed",
            Self::Io => "I/O failure",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Platform => "Run the setup on one of: Ubuntu 20/22/24, RedHat 8/9, SLES 15",
            Self::Privilege => "Install sudo or re-run the setup as root",
            Self::Command => "Check the package manager output above, fix the cause and re-run",
            Self::Io => "Check file permissions and that required tools are on PATH",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while detecting the platform or installing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No supported distribution marker was found in the OS-release data.
    #[error("setup on {label} is unsupported (supported on: {SUPPORTED_PLATFORMS})")]
    UnsupportedPlatform {
        /// Host platform label.
        label: String,
    },

    /// The catalog has no definition for this tier on this platform.
    #[error("{tier} dependencies are not defined for {platform}")]
    UnsupportedCombination {
        /// Requested tier.
        tier: Tier,
        /// Platform label.
        platform: String,
    },

    /// Neither sudo nor root privileges are available.
    #[error("sudo not found and not running as root")]
    PrivilegeHelperMissing,

    /// A command returned a non-zero status.
    #[error("command failed with status {status}: {command}")]
    CommandFailed {
        /// Rendered command line.
        command: String,
        /// Raw wait status.
        status: WaitStatus,
    },

    /// A command could not be started.
    #[error("failed to execute {command}: {source}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// IO error during file operations.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path involved in the error.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnsupportedPlatform { .. } | Error::UnsupportedCombination { .. } => {
                ErrorCategory::Platform
            }
            Error::PrivilegeHelperMissing => ErrorCategory::Privilege,
            Error::CommandFailed { .. } => ErrorCategory::Command,
            Error::Spawn { .. } | Error::Io { .. } => ErrorCategory::Io,
            Error::Json(_) => ErrorCategory::Other,
        }
    }

    /// Process exit status the whole program should terminate with.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::CommandFailed { status, .. } => status.encoded(),
            Error::UnsupportedPlatform { .. } | Error::UnsupportedCombination { .. } => {
                PRECONDITION_EXIT
            }
            Error::PrivilegeHelperMissing | Error::Spawn { .. } => HELPER_MISSING_EXIT,
            Error::Io { .. } | Error::Json(_) => 1,
        }
    }
}
