//! Raw-HTTP probing transport.
//!
//! The upstream proxy's auth convention and URL shape are not discoverable
//! ahead of time, so this transport probes a small ordered set of header
//! conventions and tolerates base URLs given at any granularity. Probing a
//! bounded candidate list is cheaper and more robust than requiring exact
//! upstream documentation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;

use super::config::{AuthStyle, LlmConfig};
use super::transport::{AttemptResult, ChatRequest, CompletionResponse, Transport};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport that assumes nothing about the upstream beyond "speaks HTTP".
pub struct RawTransport;

/// Chat-completions URL for a base given at any of three granularities:
/// bare host, versioned root (`…/v1`), or fully-qualified API root
/// (`…/openai/v1`).
pub fn chat_url(base: &str) -> String {
    if base.ends_with("/openai/v1") || base.ends_with("/v1") {
        format!("{base}/chat/completions")
    } else {
        format!("{base}/v1/chat/completions")
    }
}

/// A fixed style is honored exactly; unspecified probes the known set in
/// order.
fn candidate_styles(fixed: Option<AuthStyle>) -> Vec<AuthStyle> {
    match fixed {
        Some(style) => vec![style],
        None => vec![AuthStyle::Bearer, AuthStyle::XApiKey],
    }
}

#[async_trait]
impl Transport for RawTransport {
    fn name(&self) -> &'static str {
        "raw-http"
    }

    async fn attempt(&self, config: &LlmConfig, request: &ChatRequest) -> AttemptResult {
        let (Some(api_key), Some(base_url)) =
            (config.api_key.as_deref(), config.base_url.as_deref())
        else {
            return AttemptResult::Terminal("missing API key or base URL".to_string());
        };

        let url = chat_url(base_url);
        let body = request.body();
        let styles = candidate_styles(config.auth_style);
        let client = http_client();
        let mut last_err: Option<String> = None;

        for style in &styles {
            let pending = client.post(&url).json(&body);
            let pending = match style {
                AuthStyle::Bearer => pending.header(AUTHORIZATION, format!("Bearer {api_key}")),
                AuthStyle::XApiKey => pending.header("X-API-Key", api_key),
            };

            match pending.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::OK {
                        match response.json::<CompletionResponse>().await {
                            Ok(parsed) => return AttemptResult::Success(parsed.first_content()),
                            Err(err) => {
                                last_err = Some(format!("unreadable completion body: {err}"));
                            }
                        }
                    } else {
                        let text = response.text().await.unwrap_or_default();
                        last_err = Some(format!("HTTP {}: {}", status.as_u16(), text));
                    }
                }
                Err(err) => last_err = Some(err.to_string()),
            }
        }

        let tried = styles
            .iter()
            .map(|style| style.as_str())
            .collect::<Vec<_>>()
            .join(",");
        AttemptResult::Terminal(format!(
            "{} (tried auth styles: {})",
            last_err.unwrap_or_else(|| "Unknown error".to_string()),
            tried
        ))
    }
}

/// Client scoped to a single attempt; dropped on every exit path.
fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
