//! Version string parsing and bump arithmetic.

use semver::Version;

use super::kind::ReleaseKind;
use crate::error::ValidationError;

/// Version assigned when the registry holds no versions of a module.
pub const FIRST_RELEASE: Version = Version::new(0, 1, 0);

/// Parse a strict `MAJOR.MINOR.PATCH` string.
///
/// Each component must be one or more ASCII digits. Pre-release and build
/// metadata are rejected, so ordering of the result is purely numeric.
pub fn parse_version(s: &str) -> Result<Version, ValidationError> {
    let invalid = || ValidationError::InvalidVersion(s.to_string());

    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = part.parse().map_err(|_| invalid())?;
    }

    Ok(Version::new(numbers[0], numbers[1], numbers[2]))
}

/// Check that `s` is three dot-separated integer literals.
///
/// This is looser than [`parse_version`]: a leading sign is accepted and
/// components are not range-checked, since the registry is the authority on
/// what it will store.
pub fn validate_version_format(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 3 && parts.iter().all(|p| is_integer_literal(p))
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Pick the highest version under numeric ordering.
///
/// Every entry must parse; a single malformed entry fails the whole call.
pub fn latest_version<S: AsRef<str>>(versions: &[S]) -> Result<Option<Version>, ValidationError> {
    let mut latest: Option<Version> = None;

    for raw in versions {
        let version = parse_version(raw.as_ref())?;
        if latest.as_ref().is_none_or(|current| version > *current) {
            latest = Some(version);
        }
    }

    Ok(latest)
}

/// Apply a bump to `current`.
///
/// - major: (major+1, 0, 0)
/// - minor: (major, minor+1, 0)
/// - patch: (major, minor, patch+1)
pub fn apply_bump(current: &Version, kind: ReleaseKind) -> Result<Version, ValidationError> {
    let overflow = || ValidationError::VersionOverflow {
        version: current.to_string(),
        kind: kind.to_string(),
    };

    let next = match kind {
        ReleaseKind::Major => Version::new(current.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
        ReleaseKind::Minor => Version::new(
            current.major,
            current.minor.checked_add(1).ok_or_else(overflow)?,
            0,
        ),
        ReleaseKind::Patch => Version::new(
            current.major,
            current.minor,
            current.patch.checked_add(1).ok_or_else(overflow)?,
        ),
    };

    Ok(next)
}

/// Bump `current` by a release kind given as free text (e.g. `" MAJOR "`).
pub fn increment_version(current: &Version, kind: &str) -> Result<Version, ValidationError> {
    let kind: ReleaseKind = kind.parse()?;
    apply_bump(current, kind)
}
