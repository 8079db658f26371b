//! Shared computation core for the roast loss calculator
//!
//! This crate contains the pure logic shared between the CLI and the
//! browser front end (via WASM): per-batch loss metrics, roast level
//! classification, aggregate totals, and the CSV codec.

pub mod calc;
pub mod csv;
pub mod models;
pub mod validation;

pub use calc::*;
pub use csv::*;
pub use models::*;
pub use validation::*;
