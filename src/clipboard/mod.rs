//! Copy a record's raw model reply to the system clipboard.
//!
//! Useful when a reply did not extract cleanly and needs a closer look.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Largest reply we will put on the clipboard (1MB)
const MAX_CLIPBOARD_SIZE: usize = 1024 * 1024;

/// Clipboard seam so the copy path can be tested without a display
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to copy: the reply is empty");
    }
    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!("Reply too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }
    Ok(())
}

#[cfg(test)]
fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)
}

/// Copy text to the system clipboard.
///
/// # Errors
/// Fails when the text is blank or over 1MB, or when no clipboard is
/// available (headless sessions, locked clipboard, denied access).
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // validate before touching the clipboard so headless runs get the real reason
    validate_clipboard_text(text)?;
    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(text)
}
