//! GitHub API passthrough: token check and gist creation.
//!
//! Failures never escape as errors; every call collapses into an `ok: false`
//! report so the gateway handlers stay infallible.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;

pub const GITHUB_API_BASE: &str = "https://api.github.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("taskforge/", env!("CARGO_PKG_VERSION"));

/// Outcome of the token check. Field layout mirrors the wire response:
/// every field is always present, absent values serialize as null.
#[derive(Debug, Serialize)]
pub struct AuthReport {
    pub ok: bool,
    pub login: Option<String>,
    pub scopes: Vec<String>,
    pub reason: Option<String>,
}

/// Outcome of gist creation.
#[derive(Debug, Serialize)]
pub struct GistReport {
    pub ok: bool,
    pub url: Option<String>,
    pub reason: Option<String>,
}

pub struct GithubClient {
    token: String,
    base_url: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base(token, GITHUB_API_BASE)
    }

    /// Base override for tests against a local mock server.
    pub fn with_base(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            token: token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("GITHUB_TOKEN").unwrap_or_default())
    }

    /// Verify the token by calling `/user`.
    pub async fn auth_check(&self) -> AuthReport {
        if self.token.is_empty() {
            return AuthReport {
                ok: false,
                login: None,
                scopes: Vec::new(),
                reason: Some("GITHUB_TOKEN not set".to_string()),
            };
        }

        let url = format!("{}/user", self.base_url);
        let response = match self.request(http_client().get(&url)).send().await {
            Ok(response) => response,
            Err(err) => {
                return AuthReport {
                    ok: false,
                    login: None,
                    scopes: Vec::new(),
                    reason: Some(err.to_string()),
                };
            }
        };

        let scopes = parse_scopes(
            response
                .headers()
                .get("X-OAuth-Scopes")
                .and_then(|v| v.to_str().ok())
                .unwrap_or(""),
        );
        let status = response.status();
        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            return AuthReport {
                ok: false,
                login: None,
                scopes,
                reason: Some(format!("HTTP {}: {}", status.as_u16(), text)),
            };
        }

        match response.json::<serde_json::Value>().await {
            Ok(data) => AuthReport {
                ok: true,
                login: data.get("login").and_then(|v| v.as_str()).map(str::to_string),
                scopes,
                reason: None,
            },
            Err(err) => AuthReport {
                ok: false,
                login: None,
                scopes,
                reason: Some(err.to_string()),
            },
        }
    }

    /// Create a gist holding one file.
    pub async fn create_gist(
        &self,
        filename: &str,
        content: &str,
        description: &str,
        public: bool,
    ) -> GistReport {
        if self.token.is_empty() {
            return GistReport {
                ok: false,
                url: None,
                reason: Some("GITHUB_TOKEN not set".to_string()),
            };
        }

        let url = format!("{}/gists", self.base_url);
        let mut files = serde_json::Map::new();
        files.insert(
            filename.to_string(),
            serde_json::json!({ "content": content }),
        );
        let payload = serde_json::json!({
            "description": description,
            "public": public,
            "files": files,
        });

        let response = match self
            .request(http_client().post(&url))
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return GistReport {
                    ok: false,
                    url: None,
                    reason: Some(err.to_string()),
                };
            }
        };

        let status = response.status();
        if !matches!(status.as_u16(), 200 | 201) {
            let text = response.text().await.unwrap_or_default();
            return GistReport {
                ok: false,
                url: None,
                reason: Some(format!("HTTP {}: {}", status.as_u16(), text)),
            };
        }

        match response.json::<serde_json::Value>().await {
            Ok(data) => GistReport {
                ok: true,
                url: data
                    .get("html_url")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                reason: None,
            },
            Err(err) => GistReport {
                ok: false,
                url: None,
                reason: Some(err.to_string()),
            },
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
    }
}

fn parse_scopes(header: &str) -> Vec<String> {
    header
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
