//! Degraded-mode responder.
//!
//! The last rung of the pipeline: a pure function that always succeeds, so
//! the service keeps answering even under total upstream outage. The output
//! is clearly marked as synthetic rather than passed off as model text.

use crate::util::truncate_chars;

/// Longest prompt echo carried in a degraded reply, in characters.
pub const ECHO_LIMIT: usize = 300;

/// Deterministic echo reply used when every upstream strategy has failed.
pub fn degraded_reply(model: &str, prompt: &str) -> String {
    format!(
        "[FAKE-MODEL:{model}] Echo: {}",
        truncate_chars(prompt.trim(), ECHO_LIMIT)
    )
}

/// Diagnostic rendering of a terminal failure reason. Log-only: callers of
/// the pipeline receive the degraded echo, never this banner.
pub fn error_banner(reason: &str) -> String {
    format!("[MODEL-ERROR] {reason}")
}
