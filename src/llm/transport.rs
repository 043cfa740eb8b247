//! Transport contract shared by the upstream invocation strategies.
//!
//! Each transport is one self-contained way of getting a chat completion out
//! of the upstream, with its own assumptions about compatibility. They all
//! speak the same wire shape; only endpoint derivation and auth headers
//! differ.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::config::LlmConfig;

/// Fixed system prompt sent with every completion request.
pub const SYSTEM_PROMPT: &str = "Reply briefly and helpfully.";

/// Fixed sampling temperature, low to keep output deterministic-leaning.
pub const TEMPERATURE: f64 = 0.2;

/// One attempt's outcome. `Recoverable` marks a plausible auth or
/// compatibility mismatch with this specific transport; `Terminal` marks
/// anything else. Both let the next transport run; the split only drives
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    Success(String),
    Recoverable(String),
    Terminal(String),
}

/// Final result of one pipeline invocation. Always produced; `degraded`
/// marks the echo fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutcome {
    pub text: String,
    pub degraded: bool,
}

/// A chat completion request, independent of how it is transported.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f64,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: user_prompt.into(),
            temperature: TEMPERATURE,
        }
    }

    /// Wire body for the chat-completions POST.
    pub fn body(&self) -> CompletionBody {
        CompletionBody {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: self.system_prompt.clone(),
                },
                Message {
                    role: "user",
                    content: self.user_prompt.clone(),
                },
            ],
            temperature: self.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionBody {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

/// Chat-completions response, lenient about absent pieces. Proxies are not
/// uniform here: `choices` or `content` may be missing entirely.
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// First choice's content, with every absent piece collapsing to "".
    pub fn first_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}

/// One strategy for sending a [`ChatRequest`] upstream.
#[async_trait]
pub trait Transport: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this transport can run at all under `config`. A transport
    /// that is not ready is skipped without counting as a failure.
    fn ready(&self, config: &LlmConfig) -> bool {
        let _ = config;
        true
    }

    async fn attempt(&self, config: &LlmConfig, request: &ChatRequest) -> AttemptResult;
}
