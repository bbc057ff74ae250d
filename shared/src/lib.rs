//! Shared types and rules for the Krishi farm dashboard
//!
//! This crate holds everything that must behave identically on the server
//! and in the browser (via WASM): season resolution, the field variation
//! hash, status classifiers with their threshold tables, recommendation
//! tables, the panel models, and the synthetic metric generators.

pub mod classification;
pub mod error;
pub mod field_hash;
pub mod models;
pub mod recommendations;
pub mod season;
pub mod simulation;
pub mod thresholds;
pub mod types;

pub use classification::*;
pub use error::ParseError;
pub use field_hash::*;
pub use models::*;
pub use recommendations::*;
pub use season::*;
pub use types::*;
