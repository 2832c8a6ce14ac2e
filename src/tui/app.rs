//! TUI application state and event handling.
//!
//! The `App` owns the [`Session`] and the [`Classifier`] and runs the event loop
//! via `run()`. Classification is synchronous: a submitted item becomes a pending
//! job, the loop draws a "Classifying…" status, then runs the job on the UI
//! thread. Batch jobs run one item per loop pass so progress redraws between
//! items, but calls never overlap.
//!
//! Per-item failures land in the status bar and the diagnostics pane; they never
//! end the session.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::classifier::Classifier;
use crate::clipboard::copy_to_clipboard;
use crate::config::Settings;
use crate::models::{BatchReport, ItemOutcome};
use crate::report::{ExportColumns, export_csv};
use crate::session::{Session, split_batch};
use crate::utils::single_line;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for warning and error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 6000;

const MAX_ITEM_CHARS: usize = 200;
const MAX_BATCH_CHARS: usize = 8000;

/// Pre-filled batch input
pub const DEFAULT_BATCH_INPUT: &str = "banana peel\nplastic bottle\nchips packet\nbattery\nused mask";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Single,
    Batch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

/// Status message; `expires_at: None` stays until replaced
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Option<Instant>,
}

enum Job {
    Single(String),
    Batch { pending: VecDeque<String>, total: usize, report: BatchReport },
}

pub struct App {
    classifier: Box<dyn Classifier>,
    session: Session,
    model: String,
    export_path: PathBuf,
    focus: Focus,
    single_input: String,
    batch_input: String,
    selected_idx: usize,
    job: Option<Job>,
    error_detail: Option<String>,
    status_message: Option<StatusMessage>,
    should_quit: bool,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(classifier: Box<dyn Classifier>, settings: &Settings) -> Self {
        Self {
            classifier,
            session: Session::new(),
            model: settings.model.clone(),
            export_path: settings.export_path.clone(),
            focus: Focus::Single,
            single_input: String::new(),
            batch_input: DEFAULT_BATCH_INPUT.to_string(),
            selected_idx: 0,
            job: None,
            error_detail: None,
            status_message: None,
            should_quit: false,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType) {
        let expires_at = match message_type {
            MessageType::Info => None,
            MessageType::Success => Some(Instant::now() + Duration::from_millis(STATUS_SUCCESS_DURATION_MS)),
            MessageType::Warning | MessageType::Error => {
                Some(Instant::now() + Duration::from_millis(STATUS_ERROR_DURATION_MS))
            }
        };
        self.status_message = Some(StatusMessage { text: text.into(), message_type, expires_at });
        self.needs_redraw = true;
    }

    fn check_and_clear_expired_status(&mut self) {
        let expired = self
            .status_message
            .as_ref()
            .and_then(|msg| msg.expires_at)
            .is_some_and(|at| Instant::now() >= at);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100) {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            // Pending work runs after the "Classifying…" frame is on screen
            if self.job.is_some() {
                self.step_job();
                continue;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn render_state(&self) -> RenderState<'_> {
        RenderState {
            records: self.session.records(),
            selected_idx: self.selected_idx,
            focus: self.focus,
            single_input: &self.single_input,
            batch_input: &self.batch_input,
            error_detail: self.error_detail.as_deref(),
            status_message: self.status_message.as_ref(),
            model: &self.model,
            busy: self.job.is_some(),
        }
    }

    fn handle_action(&mut self, action: Action) {
        let total = self.session.len();
        match action {
            Action::Quit => self.should_quit = true,
            Action::Escape => {
                let input = self.focused_input_mut();
                if input.is_empty() {
                    self.should_quit = true;
                } else {
                    input.clear();
                    self.needs_redraw = true;
                }
            }
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Single => Focus::Batch,
                    Focus::Batch => Focus::Single,
                };
                self.needs_redraw = true;
            }
            Action::Submit => match self.focus {
                Focus::Single => self.submit_single(),
                Focus::Batch => self.insert_char('\n'),
            },
            Action::RunBatch => self.submit_batch(),
            Action::MoveUp => self.move_selection(-1, total),
            Action::MoveDown => self.move_selection(1, total),
            Action::PageUp => self.move_selection(-10, total),
            Action::PageDown => self.move_selection(10, total),
            Action::Export => self.export(),
            Action::CopyRawReply => self.copy_selected_reply(),
            Action::Input(c) => self.insert_char(c),
            Action::DeleteChar => {
                if self.focused_input_mut().pop().is_some() {
                    self.needs_redraw = true;
                }
            }
            Action::None => {}
        }
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            Focus::Single => &mut self.single_input,
            Focus::Batch => &mut self.batch_input,
        }
    }

    fn insert_char(&mut self, c: char) {
        let limit = match self.focus {
            Focus::Single => MAX_ITEM_CHARS,
            Focus::Batch => MAX_BATCH_CHARS,
        };
        // Single-item input is one line
        if self.focus == Focus::Single && c == '\n' {
            return;
        }
        let input = self.focused_input_mut();
        if input.chars().count() < limit {
            input.push(c);
            self.needs_redraw = true;
        }
    }

    fn move_selection(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn submit_single(&mut self) {
        let item = self.single_input.trim().to_string();
        if item.is_empty() {
            self.set_status("Please enter an item name.", MessageType::Warning);
            return;
        }

        self.single_input.clear();
        self.set_status(format!("Classifying \"{}\" with {}…", single_line(&item), self.model), MessageType::Info);
        self.job = Some(Job::Single(item));
    }

    fn submit_batch(&mut self) {
        let pending: VecDeque<String> = split_batch(&self.batch_input).into_iter().map(String::from).collect();
        let Some(first) = pending.front() else {
            self.set_status("Please enter at least one item.", MessageType::Warning);
            return;
        };

        let total = pending.len();
        self.set_status(format!("Classifying 1/{total}: {}…", single_line(first)), MessageType::Info);
        self.job = Some(Job::Batch { pending, total, report: BatchReport::default() });
    }

    /// Run the next unit of pending work: a single item, or one batch item
    fn step_job(&mut self) {
        let Some(job) = self.job.take() else {
            return;
        };

        match job {
            Job::Single(item) => {
                let outcome = self.session.classify_item(self.classifier.as_ref(), &item);
                self.finish_single(outcome);
            }
            Job::Batch { mut pending, total, mut report } => {
                if let Some(item) = pending.pop_front() {
                    report.push(self.session.classify_item(self.classifier.as_ref(), &item));
                }

                if let Some(next) = pending.front() {
                    let done = total - pending.len();
                    self.set_status(
                        format!("Classifying {}/{total}: {}…", done + 1, single_line(next)),
                        MessageType::Info,
                    );
                    self.job = Some(Job::Batch { pending, total, report });
                } else {
                    self.finish_batch(report);
                }
            }
        }
        self.needs_redraw = true;
    }

    fn select_latest(&mut self) {
        self.selected_idx = self.session.len().saturating_sub(1);
    }

    fn finish_single(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Classified(record) => {
                self.error_detail = None;
                self.select_latest();
                self.set_status(
                    format!("✓ {}: {}", single_line(&record.item), single_line(record.category())),
                    MessageType::Success,
                );
            }
            ItemOutcome::Failed { item, error } => {
                self.error_detail = Some(format!("{item}: {error}"));
                self.set_status(
                    format!("✗ Make sure the inference service is running and {} is available.", self.model),
                    MessageType::Error,
                );
            }
        }
    }

    fn finish_batch(&mut self, report: BatchReport) {
        self.select_latest();

        if report.failed() == 0 {
            self.error_detail = None;
            self.set_status(
                format!("✓ Bulk classification completed: {} items", report.succeeded()),
                MessageType::Success,
            );
            return;
        }

        let details: Vec<String> =
            report.failures().map(|(item, error)| format!("Failed for item: {item}: {error}")).collect();
        self.error_detail = Some(details.join("\n"));
        self.set_status(
            format!(
                "Bulk classification completed: {} classified, {} failed",
                report.succeeded(),
                report.failed()
            ),
            MessageType::Warning,
        );
    }

    fn export(&mut self) {
        if self.session.is_empty() {
            self.set_status("✗ No classifications to export", MessageType::Error);
            return;
        }

        match export_csv(&self.export_path, self.session.records(), ExportColumns::Summary) {
            Ok(()) => {
                let msg = format!("✓ Exported {} rows to {}", self.session.len(), self.export_path.display());
                self.set_status(msg, MessageType::Success);
            }
            Err(e) => self.set_status(format!("✗ Export failed: {e:#}"), MessageType::Error),
        }
    }

    fn copy_selected_reply(&mut self) {
        let Some(record) = self.session.records().get(self.selected_idx) else {
            self.set_status("✗ No record selected", MessageType::Error);
            return;
        };

        match copy_to_clipboard(&record.raw_output) {
            Ok(()) => self.set_status("✓ Copied raw reply to clipboard", MessageType::Success),
            Err(e) => self.set_status(format!("✗ Clipboard error: {e}"), MessageType::Error),
        }
    }
}
