//! reqwest-backed registry client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

use super::RegistryApi;
use super::schema::{
    CreateVersionRequest, CreateVersionResponse, JSON_API_CONTENT_TYPE, ModuleVersionsResponse,
    PublishedVersion, error_detail,
};
use crate::config::{ModuleCoordinate, RegistryConfig};
use crate::error::{ConfigError, RegistryError};

/// Client for one registry host, authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

impl RegistryClient {
    /// Build a client from the shared registry settings.
    pub fn new(config: &RegistryConfig) -> Result<Self, ConfigError> {
        let base_url = config.coordinate.base_url()?;
        Self::with_base_url(base_url, &config.token, config.timeout)
    }

    /// Build a client against an explicit base URL (e.g. a mock server).
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfigError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn versions_url(&self, coordinate: &ModuleCoordinate) -> String {
        format!(
            "{}/api/registry/v1/modules/{}/{}/{}/",
            self.base_url, coordinate.organization, coordinate.module, coordinate.provider
        )
    }

    fn create_version_url(&self, coordinate: &ModuleCoordinate) -> String {
        format!(
            "{}/api/v2/organizations/{org}/registry-modules/private/{org}/{}/{}/versions",
            self.base_url,
            coordinate.module,
            coordinate.provider,
            org = coordinate.organization
        )
    }

    /// Send a request, classifying transport failures.
    async fn send(&self, request: RequestBuilder) -> Result<Response, RegistryError> {
        request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    async fn body_text(&self, response: Response) -> Result<String, RegistryError> {
        response.text().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, e: reqwest::Error) -> RegistryError {
        if e.is_timeout() {
            RegistryError::Timeout(self.timeout.as_secs())
        } else {
            RegistryError::Transport(e)
        }
    }

    async fn http_error(&self, status: StatusCode, response: Response) -> RegistryError {
        let detail = match self.body_text(response).await {
            Ok(body) => error_detail(&body),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        RegistryError::Http {
            status: status.as_u16(),
            detail,
        }
    }
}

#[async_trait]
impl RegistryApi for RegistryClient {
    async fn list_versions(
        &self,
        coordinate: &ModuleCoordinate,
    ) -> Result<Option<Vec<String>>, RegistryError> {
        let url = self.versions_url(coordinate);
        debug!("GET {}", url);

        let response = self
            .send(self.http.get(&url).header(ACCEPT, "application/json"))
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Module not found in registry");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(self.http_error(status, response).await);
        }

        let body = self.body_text(response).await?;
        let parsed: ModuleVersionsResponse = serde_json::from_str(&body).map_err(|e| {
            RegistryError::Parse(format!("module listing is missing a versions list: {}", e))
        })?;

        debug!("Registry lists {} version(s)", parsed.versions.len());
        Ok(Some(parsed.versions))
    }

    async fn create_version(
        &self,
        coordinate: &ModuleCoordinate,
        version: &str,
        commit_sha: &str,
    ) -> Result<PublishedVersion, RegistryError> {
        let url = self.create_version_url(coordinate);
        debug!("POST {}", url);

        let payload = serde_json::to_vec(&CreateVersionRequest::new(version, commit_sha))
            .map_err(|e| RegistryError::Parse(format!("failed to encode request: {}", e)))?;

        let response = self
            .send(
                self.http
                    .post(&url)
                    .header(CONTENT_TYPE, JSON_API_CONTENT_TYPE)
                    .header(ACCEPT, JSON_API_CONTENT_TYPE)
                    .body(payload),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.http_error(status, response).await);
        }

        let body = self.body_text(response).await?;
        let parsed: CreateVersionResponse = serde_json::from_str(&body).map_err(|e| {
            RegistryError::Parse(format!("version creation response has no data.id: {}", e))
        })?;

        Ok(PublishedVersion {
            version: version.to_string(),
            id: parsed.data.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate() -> ModuleCoordinate {
        ModuleCoordinate {
            hostname: "app.terraform.io".into(),
            organization: "acme".into(),
            module: "vpc".into(),
            provider: "aws".into(),
        }
    }

    fn client() -> RegistryClient {
        RegistryClient::with_base_url("https://app.terraform.io/", "t", Duration::from_secs(5))
            .unwrap()
    }

    #[test]
    fn test_versions_url() {
        assert_eq!(
            client().versions_url(&coordinate()),
            "https://app.terraform.io/api/registry/v1/modules/acme/vpc/aws/"
        );
    }

    #[test]
    fn test_create_version_url_repeats_organization() {
        assert_eq!(
            client().create_version_url(&coordinate()),
            "https://app.terraform.io/api/v2/organizations/acme/registry-modules/private/acme/vpc/aws/versions"
        );
    }

    #[test]
    fn test_new_uses_coordinate_hostname() {
        let config = RegistryConfig {
            coordinate: coordinate(),
            token: "t".into(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(RegistryClient::new(&config).unwrap().base_url(), "https://app.terraform.io");
    }
}
