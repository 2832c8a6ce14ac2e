//! Inference client for waste classification.
//!
//! A [`Classifier`] turns an item description into the model's raw reply text.
//! [`OllamaClassifier`] is the real implementation: one blocking POST per item
//! to an OpenAI-compatible chat completion endpoint (Ollama by default). There
//! is no retry, caching or rate limiting; the configured timeout bounds each call.
//!
//! Every failure mode (connection, timeout, HTTP status, unexpected body) is
//! reported as a [`ClassifyError`] so callers can record it per item.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::OllamaClassifier;
pub use error::ClassifyError;
pub use prompt::{SYSTEM_PROMPT, build_request};

/// Produces the raw model reply for one item
pub trait Classifier {
    fn classify(&self, item: &str) -> Result<String, ClassifyError>;
}
