//! Session history and the classify-then-extract orchestration.
//!
//! A [`Session`] owns the append-only list of [`ClassificationRecord`]s for one
//! run of the program. Callers pass it (and a [`Classifier`]) explicitly, so the
//! history's lifetime is the lifetime of the value. Records are only appended,
//! never edited or removed, and nothing is persisted across runs.
//!
//! Each item yields an [`ItemOutcome`]; failures are values, not early returns,
//! so a batch keeps going after any single item fails.

use chrono::Local;
use tracing::{debug, warn};

use crate::classifier::{Classifier, ClassifyError};
use crate::models::{BatchReport, ClassificationRecord, ItemOutcome};
use crate::parsers::parse_reply;

/// Split batch input into items: one per line, trimmed, blank lines dropped
pub fn split_batch(input: &str) -> Vec<&str> {
    input.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
}

#[derive(Debug, Default)]
pub struct Session {
    history: Vec<ClassificationRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in submission order
    pub fn records(&self) -> &[ClassificationRecord] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn last(&self) -> Option<&ClassificationRecord> {
        self.history.last()
    }

    /// Classify one item and append the record on success.
    ///
    /// Blank input is rejected without calling the classifier.
    pub fn classify_item(&mut self, classifier: &dyn Classifier, item: &str) -> ItemOutcome {
        let item = item.trim();
        if item.is_empty() {
            return ItemOutcome::Failed { item: String::new(), error: ClassifyError::EmptyItem };
        }

        match classifier.classify(item) {
            Ok(raw) => {
                let fields = parse_reply(&raw);
                let missing = fields.missing();
                if !missing.is_empty() {
                    debug!(item, ?missing, "Reply is missing labeled fields");
                }

                let record = ClassificationRecord::new(item, fields, Local::now(), raw);
                self.history.push(record.clone());
                ItemOutcome::Classified(record)
            }
            Err(error) => {
                warn!(item, error = %error, "Classification failed");
                ItemOutcome::Failed { item: item.to_string(), error }
            }
        }
    }

    /// Classify every non-blank line of `input`, one after another
    pub fn classify_batch(&mut self, classifier: &dyn Classifier, input: &str) -> BatchReport {
        let mut report = BatchReport::default();
        for item in split_batch(input) {
            report.push(self.classify_item(classifier, item));
        }
        debug!(items = report.len(), failed = report.failed(), "Batch finished");
        report
    }
}
