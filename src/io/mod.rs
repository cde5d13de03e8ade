//! Input/output helpers.
//!
//! - CSV ingest + validation of raw profiles (`ingest`)
//! - scored result export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
