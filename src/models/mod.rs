//! Model artifact formats and the concrete classifiers behind them.
//!
//! The scoring core only sees the `Classifier` trait; this module is where a
//! trained artifact on disk becomes something that implements it.

pub mod artifact;
pub mod linear;
pub mod tree;

pub use artifact::*;
