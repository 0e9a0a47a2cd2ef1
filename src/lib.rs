//! tfe-release - CI tools for versioning modules in a Terraform Cloud private registry.
//!
//! # Overview
//!
//! `resolve-version` reads the published versions of a module, picks the
//! highest and prints the next version for a major, minor or patch release.
//! `publish-version` validates a version and commit SHA and creates that
//! version in the registry.

pub mod config;
pub mod error;
pub mod logging;
pub mod publish;
pub mod registry;
pub mod resolve;
pub mod version;

// Re-export commonly used types
pub use config::{ModuleCoordinate, PublisherConfig, RegistryConfig, ResolverConfig};
pub use error::{ConfigError, RegistryError, ReleaseError, ValidationError};
pub use publish::{publish, validate_commit_identifier};
pub use registry::{PublishedVersion, RegistryApi, RegistryClient};
pub use resolve::{fetch_latest_version, resolve_next_version};
pub use version::{ReleaseKind, increment_version, validate_version_format};
