//! Interactive terminal UI: item and batch inputs, history table, detail pane,
//! category chart and data-handling notes.
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::{App, DEFAULT_BATCH_INPUT};
use terminal::TerminalManager;
use tracing::info;

use crate::classifier::OllamaClassifier;
use crate::config::Settings;

/// Run the interactive TUI until the user quits
pub fn run_interactive(settings: &Settings) -> Result<()> {
    let classifier = OllamaClassifier::new(settings)?;
    info!(endpoint = classifier.endpoint(), model = classifier.model(), "Starting TUI");

    let mut app = App::new(Box::new(classifier), settings);
    let mut manager = TerminalManager::new()?;

    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    info!(records = app.session().len(), "TUI closed");
    res
}
