//! Process configuration read from environment variables.
//!
//! Configuration is read once at start-up into plain structs that are then
//! passed by reference; nothing else in the crate touches the environment.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

/// Default timeout for a registry request (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable to override the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "TFE_TIMEOUT_SECS";

pub const HOSTNAME_VAR: &str = "TFE_HOSTNAME";
pub const ORG_VAR: &str = "TFE_ORG";
pub const MODULE_VAR: &str = "TFE_MODULE";
pub const PROVIDER_VAR: &str = "TFE_PROVIDER";
pub const TOKEN_VAR: &str = "TFE_TOKEN";
pub const RELEASE_TYPE_VAR: &str = "RELEASE_TYPE";
pub const COMMIT_SHA_VAR: &str = "COMMIT_SHA";
pub const NEW_VERSION_VAR: &str = "NEW_VERSION";

/// Identifies one module in a private registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCoordinate {
    pub hostname: String,
    pub organization: String,
    pub module: String,
    pub provider: String,
}

impl ModuleCoordinate {
    /// Registry base URL. Bare host names are served over HTTPS.
    pub fn base_url(&self) -> Result<String, ConfigError> {
        let (scheme, rest) = if let Some(rest) = self.hostname.strip_prefix("https://") {
            ("https", rest)
        } else if let Some(rest) = self.hostname.strip_prefix("http://") {
            ("http", rest)
        } else {
            ("https", self.hostname.as_str())
        };

        let authority = rest.trim_end_matches('/');
        if authority.is_empty() || authority.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidHostname(self.hostname.clone()));
        }

        Ok(format!("{}://{}", scheme, authority))
    }
}

/// Settings shared by both tools.
#[derive(Clone)]
pub struct RegistryConfig {
    pub coordinate: ModuleCoordinate,
    pub token: String,
    pub timeout: Duration,
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("coordinate", &self.coordinate)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Configuration of `resolve-version`.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub registry: RegistryConfig,
    /// Raw RELEASE_TYPE value; only interpreted when there is a version to bump.
    pub release_type: String,
}

/// Configuration of `publish-version`.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    pub registry: RegistryConfig,
    pub version: String,
    pub commit_sha: String,
}

impl ResolverConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build from any variable lookup. Reports every missing variable at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut vars = RequiredVars::new(&lookup);
        let coordinate = vars.coordinate();
        let token = vars.take(TOKEN_VAR);
        let release_type = vars.take(RELEASE_TYPE_VAR);
        vars.finish()?;

        Ok(Self {
            registry: RegistryConfig {
                coordinate,
                token,
                timeout: timeout_from(&lookup),
            },
            release_type,
        })
    }
}

impl PublisherConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build from any variable lookup. Reports every missing variable at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut vars = RequiredVars::new(&lookup);
        let coordinate = vars.coordinate();
        let token = vars.take(TOKEN_VAR);
        let commit_sha = vars.take(COMMIT_SHA_VAR);
        let version = vars.take(NEW_VERSION_VAR);
        vars.finish()?;

        Ok(Self {
            registry: RegistryConfig {
                coordinate,
                token,
                timeout: timeout_from(&lookup),
            },
            version,
            commit_sha,
        })
    }
}

fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Collects required variables, remembering which ones are absent.
struct RequiredVars<'a, F> {
    lookup: &'a F,
    missing: Vec<String>,
}

impl<'a, F> RequiredVars<'a, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn new(lookup: &'a F) -> Self {
        Self {
            lookup,
            missing: Vec::new(),
        }
    }

    /// Trimmed value of `name`; blank counts as missing.
    fn take(&mut self, name: &str) -> String {
        match (self.lookup)(name) {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    fn coordinate(&mut self) -> ModuleCoordinate {
        ModuleCoordinate {
            hostname: self.take(HOSTNAME_VAR),
            organization: self.take(ORG_VAR),
            module: self.take(MODULE_VAR),
            provider: self.take(PROVIDER_VAR),
        }
    }

    fn finish(self) -> Result<(), ConfigError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingVariables(self.missing))
        }
    }
}

/// Read the request timeout, falling back to the default on bad input.
///
/// Logs a warning if the variable is set but is not a positive integer.
fn timeout_from<F>(lookup: &F) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(TIMEOUT_ENV_VAR) {
        Some(v) if !v.trim().is_empty() => match v.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}
