//! Resilient model-invocation pipeline: credential resolution, ordered
//! transport strategies, and the degraded echo that keeps the service
//! answering when the upstream will not.

pub mod config;
pub mod fallback;
pub mod pipeline;
pub mod raw;
pub mod transport;
pub mod typed;

pub use config::{AuthStyle, DEFAULT_MODEL, LlmConfig};
pub use fallback::{degraded_reply, error_banner};
pub use pipeline::ModelPipeline;
pub use raw::RawTransport;
pub use transport::{AttemptResult, ChatRequest, InvocationOutcome, Transport};
pub use typed::TypedTransport;
