//! Display sanitisation for model output
//!
//! Replies come from a language model and are echoed into the terminal, both in
//! the TUI and by the CLI commands. Escape sequences in that text could move the
//! cursor, recolour the screen or retitle the window, so anything shown to the
//! user goes through [`sanitize_for_display`] first. Records keep the raw reply.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Removes ANSI CSI/OSC sequences and control characters, keeping tabs and newlines.
///
/// # Examples
///
/// ```
/// use waste_sorter::utils::sanitize_for_display;
///
/// assert_eq!(sanitize_for_display("\x1b[1mBin:\x1b[0m Blue"), "Bin: Blue");
/// ```
pub fn sanitize_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.peek() {
                // CSI: ESC [ params final-byte
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() || next == '~' {
                            break;
                        }
                    }
                }
                // OSC: ESC ] ... terminated by BEL or ESC \
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch == '\r' || (ch.is_control() && ch != '\t' && ch != '\n') {
            continue;
        }
        out.push(ch);
    }

    out
}

/// Sanitised text collapsed to one line, for table cells and status messages
pub fn single_line(text: &str) -> String {
    sanitize_for_display(text).split_whitespace().collect::<Vec<_>>().join(" ")
}
