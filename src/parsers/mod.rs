//! Parsing of model replies into labeled fields
//!
//! The model is asked for six `Label: value` lines. Replies are free text, so
//! extraction is lenient: each label is matched on its own, unmatched labels
//! degrade to empty values, and anything else in the reply is ignored. The raw
//! reply is always kept on the record for inspection.

pub mod reply;

pub use reply::parse_reply;
