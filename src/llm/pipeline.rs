//! Invocation orchestrator.
//!
//! Runs the transports in a fixed order and guarantees the caller an
//! [`InvocationOutcome`]: first success wins, every failure is recorded and
//! falls through, and exhaustion lands on the degraded echo. No retries
//! beyond the raw transport's bounded header probing; the caller is a
//! synchronous HTTP request with its own timeout budget.

use tracing::{debug, error, info, warn};

use super::config::LlmConfig;
use super::fallback::{degraded_reply, error_banner};
use super::raw::RawTransport;
use super::transport::{AttemptResult, ChatRequest, InvocationOutcome, Transport};
use super::typed::TypedTransport;

/// Ordered set of upstream transports plus the degraded fallback.
pub struct ModelPipeline {
    transports: Vec<Box<dyn Transport>>,
}

impl ModelPipeline {
    /// Standard order: typed client first, raw probing second.
    pub fn new() -> Self {
        Self::with_transports(vec![Box::new(TypedTransport), Box::new(RawTransport)])
    }

    pub fn with_transports(transports: Vec<Box<dyn Transport>>) -> Self {
        Self { transports }
    }

    /// Turn a prompt into text. Infallible by contract: configuration is
    /// resolved fresh, transports run in order, and when all of them are
    /// skipped or beaten the degraded echo answers instead.
    pub async fn invoke(&self, prompt: &str) -> InvocationOutcome {
        let config = LlmConfig::resolve();
        self.invoke_with(&config, prompt).await
    }

    /// Like [`Self::invoke`] with the configuration supplied by the caller.
    pub async fn invoke_with(&self, config: &LlmConfig, prompt: &str) -> InvocationOutcome {
        let request = ChatRequest::new(config.model.clone(), prompt);

        for transport in &self.transports {
            if !transport.ready(config) {
                debug!(transport = transport.name(), "transport not ready, skipping");
                continue;
            }
            match transport.attempt(config, &request).await {
                AttemptResult::Success(text) => {
                    debug!(transport = transport.name(), "completion succeeded");
                    return InvocationOutcome {
                        text,
                        degraded: false,
                    };
                }
                AttemptResult::Recoverable(reason) => {
                    warn!(
                        transport = transport.name(),
                        reason = %reason,
                        "transport failed, trying next"
                    );
                }
                AttemptResult::Terminal(reason) => {
                    error!(
                        transport = transport.name(),
                        diagnostic = %error_banner(&reason),
                        "transport failed, trying next"
                    );
                }
            }
        }

        info!(model = %config.model, "all transports exhausted, answering degraded");
        InvocationOutcome {
            text: degraded_reply(&config.model, prompt),
            degraded: true,
        }
    }
}

impl Default for ModelPipeline {
    fn default() -> Self {
        Self::new()
    }
}
