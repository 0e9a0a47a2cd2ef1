//! Module version publishing.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::{debug, info};

use crate::config::ModuleCoordinate;
use crate::error::{ReleaseError, ValidationError};
use crate::registry::{PublishedVersion, RegistryApi};
use crate::version::validate_version_format;

static COMMIT_SHA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{7,}$").expect("Invalid regex"));

/// True for abbreviated or full hexadecimal commit ids (7+ characters).
pub fn validate_commit_identifier(s: &str) -> bool {
    COMMIT_SHA_RE.is_match(s)
}

/// Check both inputs before anything is sent to the registry.
pub fn validate_publish_inputs(version: &str, commit_sha: &str) -> Result<(), ValidationError> {
    if !validate_version_format(version) {
        return Err(ValidationError::InvalidVersion(version.to_string()));
    }
    if !validate_commit_identifier(commit_sha) {
        return Err(ValidationError::InvalidCommitSha(commit_sha.to_string()));
    }
    Ok(())
}

/// Validate, then create the version in the registry. Single attempt.
pub async fn publish<R>(
    api: &R,
    coordinate: &ModuleCoordinate,
    version: &str,
    commit_sha: &str,
) -> Result<PublishedVersion, ReleaseError>
where
    R: RegistryApi + ?Sized,
{
    validate_publish_inputs(version, commit_sha)?;

    debug!(
        "Publishing {}/{}/{} {} at {}",
        coordinate.organization, coordinate.module, coordinate.provider, version, commit_sha
    );

    let published = api.create_version(coordinate, version, commit_sha).await?;
    info!("Registry assigned id {} to version {}", published.id, published.version);

    Ok(published)
}
