//! Waste Sorter - Classify waste items with a locally hosted language model
//!
//! Each item description is sent to an OpenAI-compatible chat completion endpoint
//! (Ollama by default) together with a fixed instruction. The free-text reply is
//! scanned for six labeled fields, and every result is appended to an in-memory
//! session history that can be viewed as a table, a category chart, or exported
//! to CSV. It supports:
//!
//! - Single-item and newline-separated batch classification
//! - Tolerant field extraction (missing labels become empty values)
//! - Per-item failure outcomes that never stop a batch
//! - An interactive terminal UI and plain CLI commands
//!
//! # Example
//!
//! ```no_run
//! use waste_sorter::{OllamaClassifier, Session, Settings};
//!
//! let settings = Settings::default();
//! let classifier = OllamaClassifier::new(&settings)?;
//! let mut session = Session::new();
//! let report = session.classify_batch(&classifier, "banana peel\nbattery\n");
//! println!("{} classified, {} failed", report.succeeded(), report.failed());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod classifier;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod models;
pub mod parsers;
pub mod report;
pub mod session;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use classifier::{Classifier, ClassifyError, OllamaClassifier};
pub use clipboard::copy_to_clipboard;
pub use config::Settings;
pub use models::{BatchReport, ClassificationRecord, Field, ItemOutcome, ReplyFields};
pub use parsers::parse_reply;
pub use report::{ExportColumns, export_csv};
pub use session::{Session, split_batch};
