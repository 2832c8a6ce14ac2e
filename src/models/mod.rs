//! Data models for waste classification.
//!
//! - [`ClassificationRecord`] - One stored classification with its extracted fields
//! - [`Field`] / [`ReplyFields`] - The six labeled lines the model is asked to emit
//! - [`ItemOutcome`] / [`BatchReport`] - Explicit per-item results of orchestration
//! - [`ChatRequest`] / [`ChatResponse`] - OpenAI-compatible chat completion wire shapes

pub mod chat;
pub mod outcome;
pub mod record;

pub use chat::{ChatMessage, ChatRequest, ChatResponse, Choice, ReplyMessage};
pub use outcome::{BatchReport, ItemOutcome};
pub use record::{ClassificationRecord, Field, ReplyFields, TIMESTAMP_FORMAT};
