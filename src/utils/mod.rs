pub mod environment;
pub mod terminal;

pub use environment::{default_config_file, log_file_path};
pub use terminal::{sanitize_for_display, single_line};
