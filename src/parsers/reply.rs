use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Field, ReplyFields};

/// One pattern per field: the label at the start of a line (after optional
/// whitespace other than line breaks), a colon, and the rest of that line.
fn field_patterns() -> &'static [(Field, Regex); 6] {
    static PATTERNS: OnceLock<[(Field, Regex); 6]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        Field::ALL.map(|field| {
            let pattern = format!(r"(?m)^[^\S\r\n]*{}:[^\S\r\n]*(.*)$", regex::escape(field.label()));
            (field, Regex::new(&pattern).expect("field label pattern is valid"))
        })
    })
}

/// Extract the six labeled fields from a model reply.
///
/// Each label is searched independently; the first matching line wins and its
/// value is trimmed. A label that never appears yields an empty value, so this
/// never fails. Text outside the labeled lines is ignored.
///
/// # Examples
///
/// ```
/// use waste_sorter::parse_reply;
///
/// let fields = parse_reply("Category: E-Waste\n  Bin: Yellow  \nnote: ask your city");
/// assert_eq!(fields.category, "E-Waste");
/// assert_eq!(fields.bin, "Yellow");
/// assert_eq!(fields.tip, "");
/// ```
pub fn parse_reply(text: &str) -> ReplyFields {
    let mut fields = ReplyFields::default();
    for (field, re) in field_patterns() {
        if let Some(value) = re.captures(text).and_then(|caps| caps.get(1)) {
            fields.set(*field, value.as_str().trim().to_string());
        }
    }
    fields
}
