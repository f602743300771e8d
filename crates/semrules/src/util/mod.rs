pub mod format;
pub mod progress;

pub use format::{format_percent, format_rule_line, format_score};
pub use progress::create_progress_bar;
