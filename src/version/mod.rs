//! Semantic version parsing and bumping.

pub mod bump;
pub mod kind;

pub use bump::{increment_version, latest_version, parse_version, validate_version_format};
pub use kind::ReleaseKind;
