//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the raw input record and its field domains (`RawInput`, `CategoricalField`, `NumericField`)
//! - the encoded model input (`Feature`, `FeatureVector`)
//! - the binary decision (`PredictionResult`)

pub mod types;

pub use types::*;
