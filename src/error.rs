//! Error types for tfe-release modules using thiserror.

use thiserror::Error;

/// Errors from reading process configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable(s): {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("Invalid TFE_HOSTNAME '{0}': expected a host name or an http(s):// URL")]
    InvalidHostname(String),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

/// Errors from validating caller-supplied values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid version '{0}': expected MAJOR.MINOR.PATCH with integer components")]
    InvalidVersion(String),

    #[error("Invalid commit SHA '{0}': expected at least 7 hexadecimal characters")]
    InvalidCommitSha(String),

    #[error("Invalid release kind '{0}': expected one of major, minor, patch")]
    InvalidReleaseKind(String),

    #[error("Cannot bump {kind} component of version {version}: value would overflow")]
    VersionOverflow { version: String, kind: String },
}

/// Errors from talking to the module registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Registry request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Failed to reach registry")]
    Transport(#[source] reqwest::Error),

    #[error("Registry returned HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("Unexpected registry response: {0}")]
    Parse(String),
}

/// Any failure of a resolve or publish run.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
