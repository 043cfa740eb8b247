#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args
)]

pub mod config;
pub mod gateway;
pub mod github;
pub mod llm;
pub mod storage;
pub mod tasks;
pub mod util;

#[cfg(test)]
pub mod test_support;

pub use config::Config;
pub use llm::ModelPipeline;
