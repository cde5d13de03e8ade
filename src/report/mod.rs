//! Reporting utilities: result cards, feature tables, and batch summaries.

pub mod format;

pub use format::*;
