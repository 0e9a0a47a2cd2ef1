//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::process::Output;
use std::time::Duration;

use tfe_release::{ModuleCoordinate, RegistryClient};
use wiremock::MockServer;

pub const ORG: &str = "acme";
pub const MODULE: &str = "vpc";
pub const PROVIDER: &str = "aws";
pub const TOKEN: &str = "test-token";

/// Registry path listing the versions of the test module.
pub const VERSIONS_PATH: &str = "/api/registry/v1/modules/acme/vpc/aws/";

/// Registry path creating a version of the test module.
pub const CREATE_PATH: &str =
    "/api/v2/organizations/acme/registry-modules/private/acme/vpc/aws/versions";

/// Coordinate of the test module on the given host.
pub fn coordinate(hostname: &str) -> ModuleCoordinate {
    ModuleCoordinate {
        hostname: hostname.to_string(),
        organization: ORG.to_string(),
        module: MODULE.to_string(),
        provider: PROVIDER.to_string(),
    }
}

/// Create a registry client pointing to a mock server.
pub fn mock_client(server: &MockServer, timeout: Duration) -> RegistryClient {
    RegistryClient::with_base_url(server.uri(), TOKEN, timeout)
        .expect("Failed to build registry client")
}

/// Environment shared by both binaries, pointing at a mock server.
pub fn registry_env(server: &MockServer) -> Vec<(&'static str, String)> {
    vec![
        ("TFE_HOSTNAME", server.uri()),
        ("TFE_ORG", ORG.to_string()),
        ("TFE_MODULE", MODULE.to_string()),
        ("TFE_PROVIDER", PROVIDER.to_string()),
        ("TFE_TOKEN", TOKEN.to_string()),
    ]
}

/// Run one of the crate's binaries with exactly the given environment.
pub async fn run_bin(bin: &str, env: &[(&str, String)]) -> Output {
    tokio::process::Command::new(bin)
        .env_clear()
        .envs(env.iter().map(|(k, v)| (*k, v.as_str())))
        .output()
        .await
        .unwrap_or_else(|e| panic!("Failed to run {}: {}", bin, e))
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
