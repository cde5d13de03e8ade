//! Feature encoding: categorical code tables and the record encoder.

pub mod encoder;
pub mod tables;

pub use encoder::*;
pub use tables::*;
