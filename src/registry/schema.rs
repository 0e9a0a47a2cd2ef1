//! Wire shapes of the registry endpoints.

use serde::{Deserialize, Serialize};

/// Media type of JSON:API request bodies.
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Resource type for module version creation.
pub const MODULE_VERSION_TYPE: &str = "registry-module-versions";

/// `GET /api/registry/v1/modules/{org}/{module}/{provider}/`
///
/// Only the version list is used; other module fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleVersionsResponse {
    pub versions: Vec<String>,
}

/// Body of the version creation request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateVersionRequest<'a> {
    pub data: CreateVersionData<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateVersionData<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: CreateVersionAttributes<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateVersionAttributes<'a> {
    pub version: &'a str,
    #[serde(rename = "commit-sha")]
    pub commit_sha: &'a str,
}

impl<'a> CreateVersionRequest<'a> {
    pub fn new(version: &'a str, commit_sha: &'a str) -> Self {
        Self {
            data: CreateVersionData {
                kind: MODULE_VERSION_TYPE,
                attributes: CreateVersionAttributes {
                    version,
                    commit_sha,
                },
            },
        }
    }
}

/// Successful version creation response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVersionResponse {
    pub data: ResourceIdentifier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
}

/// Longest error detail kept from a response body.
const MAX_DETAIL_CHARS: usize = 500;

/// JSON:API error document.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorObject {
    pub status: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
}

impl ErrorDocument {
    /// Human-readable summary of the errors, or `None` if there is nothing to say.
    pub fn summary(&self) -> Option<String> {
        let messages: Vec<String> = self
            .errors
            .iter()
            .filter_map(|e| match (&e.title, &e.detail) {
                (Some(title), Some(detail)) if title != detail => {
                    Some(format!("{}: {}", one_line(title), one_line(detail)))
                }
                (_, Some(detail)) => Some(one_line(detail)),
                (Some(title), None) => Some(one_line(title)),
                (None, None) => e.status.as_deref().map(one_line),
            })
            .filter(|m| !m.is_empty())
            .collect();

        if messages.is_empty() {
            None
        } else {
            Some(messages.join("; "))
        }
    }
}

/// Best-effort error detail from a failed response body.
///
/// Prefers the JSON:API `errors` array and falls back to the raw body. The
/// result is always a single line.
pub fn error_detail(body: &str) -> String {
    if let Ok(doc) = serde_json::from_str::<ErrorDocument>(body)
        && let Some(summary) = doc.summary()
    {
        return truncate(summary);
    }

    let collapsed = one_line(body);
    if collapsed.is_empty() {
        "(empty response body)".to_string()
    } else {
        truncate(collapsed)
    }
}

/// Collapse every run of whitespace (newlines included) into one space.
fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(s: String) -> String {
    match s.char_indices().nth(MAX_DETAIL_CHARS) {
        Some((idx, _)) => format!("{}... [truncated]", &s[..idx]),
        None => s,
    }
}

/// A version the registry accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedVersion {
    pub version: String,
    pub id: String,
}
