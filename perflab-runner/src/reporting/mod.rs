//! Downstream renderers for metric reports.

pub mod export;
pub mod text;

pub use export::{report_file_name, write_report_json};
pub use text::TextReport;
