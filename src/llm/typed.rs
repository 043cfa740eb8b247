//! Typed-client transport.
//!
//! Assumes the upstream is fully chat-completions compatible: one endpoint
//! shape, bearer auth only. Proxies that reject this exact request shape are
//! handled by the raw probing transport instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use super::config::LlmConfig;
use super::transport::{AttemptResult, ChatRequest, CompletionResponse, Transport};

/// Endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport that trusts the upstream to be fully compatible.
pub struct TypedTransport;

#[async_trait]
impl Transport for TypedTransport {
    fn name(&self) -> &'static str {
        "typed-client"
    }

    fn ready(&self, config: &LlmConfig) -> bool {
        config.api_key.is_some()
    }

    async fn attempt(&self, config: &LlmConfig, request: &ChatRequest) -> AttemptResult {
        let Some(api_key) = config.api_key.as_deref() else {
            return AttemptResult::Terminal("no API key configured".to_string());
        };
        let url = completions_url(config.base_url.as_deref());

        let response = match http_client()
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .json(&request.body())
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let reason = err.to_string();
                return if is_auth_error(&err) {
                    AttemptResult::Recoverable(reason)
                } else {
                    AttemptResult::Terminal(reason)
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = format!("HTTP {}: {}", status.as_u16(), body);
            return if matches!(status.as_u16(), 401 | 403) {
                AttemptResult::Recoverable(reason)
            } else {
                AttemptResult::Terminal(reason)
            };
        }

        match response.json::<CompletionResponse>().await {
            Ok(parsed) => match parsed.choices.into_iter().next() {
                Some(choice) => {
                    AttemptResult::Success(choice.message.content.unwrap_or_default())
                }
                None => AttemptResult::Terminal("no completion choices in response".to_string()),
            },
            Err(err) => AttemptResult::Terminal(format!("malformed completion response: {err}")),
        }
    }
}

fn completions_url(base_url: Option<&str>) -> String {
    format!("{}/chat/completions", base_url.unwrap_or(DEFAULT_BASE_URL))
}

/// Client scoped to a single attempt; dropped on every exit path.
fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Auth-class failure check: structured status when the error carries one,
/// digit scan over the message otherwise.
fn is_auth_error(err: &reqwest::Error) -> bool {
    if let Some(status) = err.status() {
        return matches!(status.as_u16(), 401 | 403);
    }
    err.to_string()
        .split(|c: char| !c.is_ascii_digit())
        .filter(|chunk| !chunk.is_empty())
        .filter_map(|chunk| chunk.parse::<u16>().ok())
        .any(|code| matches!(code, 401 | 403))
}
