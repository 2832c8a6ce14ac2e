//! Views over session history: CSV export, category frequency, and plain-text
//! renderings for the non-interactive commands.

pub mod csv;
pub mod summary;

pub use csv::{ExportColumns, export_csv, write_csv};
pub use summary::{CategoryCount, category_counts, render_text_chart, render_text_table};

/// Data-handling notes shown alongside results
pub const DATA_HANDLING_NOTES: [&str; 3] = [
    "This assistant does not collect personal user data.",
    "Output may vary by city rules; verify local municipal guidelines.",
    "Provides safe handling instructions for hazardous and e-waste items.",
];
