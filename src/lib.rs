//! `income-predictor` library crate.
//!
//! The binary (`income`) is a thin wrapper around this library so that:
//!
//! - the encoding and scoring core is testable without spawning processes
//! - other front-ends (services, notebooks) can call `encode_and_predict` directly
//!
//! Data flow: `RawInput` → `encoding::encode` → `FeatureVector` →
//! `predictor::PredictorAdapter` → `PredictionResult`.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod encoding;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod predictor;
pub mod report;
pub mod tui;
