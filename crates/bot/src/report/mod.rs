//! Report module — turns container summaries into chat text.

pub mod format;

pub use format::{format_counts, format_listing, format_report, EMPTY_LISTING, UNAVAILABLE_REPORT};
