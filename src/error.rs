//! Custom error types for pkgrel.

use thiserror::Error;

/// Main error type for release operations.
#[derive(Error, Debug)]
pub enum ReleaseError {
    // Package resolution errors
    #[error("Release package must not be empty")]
    NoPackageSelected,

    #[error("Release package {0} not found")]
    PackageNotFound(String),

    #[error("Release package {0} is private")]
    PrivatePackage(String),

    // Version validation errors
    #[error("Invalid target version: {0}")]
    InvalidVersion(String),

    // External tool errors
    #[error("Command `{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Version {0} was previously published")]
    AlreadyPublished(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Semver parse error: {0}")]
    Semver(#[from] semver::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Logger initialization error: {0}")]
    Logger(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using ReleaseError
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a command failure from the rendered command line, exit status
    /// and captured stderr
    pub fn command_failed(
        command: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Errors raised while locating the package, before anything is mutated
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::NoPackageSelected
                | Self::PackageNotFound(_)
                | Self::PrivatePackage(_)
        )
    }

    /// Errors raised while validating the chosen target version
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidVersion(_))
    }

    pub fn is_already_published(&self) -> bool {
        matches!(self, Self::AlreadyPublished(_))
    }

    /// Captured stderr for failed external commands
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

// Wraps in Other variant for generic I/O errors
impl From<std::io::Error> for ReleaseError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}
