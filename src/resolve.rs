//! Next-version resolution against the registry.

use semver::Version;
use tracing::{debug, info};

use crate::config::ModuleCoordinate;
use crate::error::{RegistryError, ReleaseError};
use crate::registry::RegistryApi;
use crate::version::bump::FIRST_RELEASE;
use crate::version::{increment_version, latest_version};

/// Highest published version of a module.
///
/// Returns `None` when the module is unknown to the registry or has no
/// versions yet. A malformed version in the listing fails the whole call
/// rather than being skipped.
pub async fn fetch_latest_version<R>(
    api: &R,
    coordinate: &ModuleCoordinate,
) -> Result<Option<Version>, RegistryError>
where
    R: RegistryApi + ?Sized,
{
    let Some(versions) = api.list_versions(coordinate).await? else {
        return Ok(None);
    };

    latest_version(&versions).map_err(|e| {
        RegistryError::Parse(format!("registry listed a malformed version ({})", e))
    })
}

/// Compute the version the next release of a module should carry.
///
/// A module with no published versions gets `0.1.0`; `release_type` is not
/// consulted in that case.
pub async fn resolve_next_version<R>(
    api: &R,
    coordinate: &ModuleCoordinate,
    release_type: &str,
) -> Result<Version, ReleaseError>
where
    R: RegistryApi + ?Sized,
{
    let Some(current) = fetch_latest_version(api, coordinate).await? else {
        info!(
            "No published versions of {}/{}/{}, starting at {}",
            coordinate.organization, coordinate.module, coordinate.provider, FIRST_RELEASE
        );
        return Ok(FIRST_RELEASE);
    };

    debug!("Latest published version is {}", current);
    let next = increment_version(&current, release_type)?;
    info!("Version: {} -> {}", current, next);

    Ok(next)
}
