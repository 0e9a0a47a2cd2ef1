//! Private module registry API.

pub mod client;
pub mod schema;

use async_trait::async_trait;

use crate::config::ModuleCoordinate;
use crate::error::RegistryError;

pub use client::RegistryClient;
pub use schema::PublishedVersion;

/// Operations the tools need from the registry.
///
/// This abstraction allows mocking the registry in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Version strings published for a module, or `None` if the module is unknown.
    async fn list_versions(
        &self,
        coordinate: &ModuleCoordinate,
    ) -> Result<Option<Vec<String>>, RegistryError>;

    /// Create a module version pointing at a commit.
    async fn create_version(
        &self,
        coordinate: &ModuleCoordinate,
        version: &str,
        commit_sha: &str,
    ) -> Result<PublishedVersion, RegistryError>;
}
