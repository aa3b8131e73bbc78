//! Markdown report rendering

pub mod escape;
pub mod report;

pub use report::{render_report, COMMENT_MARKER};
