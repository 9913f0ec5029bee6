//! Nigerian personal income tax engine.
//!
//! Computes tax under the 2025 (old) flat-rate regime and the 2026 (new)
//! bracket regime with capped reliefs. Everything here is pure and
//! synchronous; loading the bracket table is left to the caller.

pub mod analytics;
pub mod calculations;
pub mod engine;
pub mod error;
pub mod models;

pub use engine::TaxEngine;
pub use error::{ConfigurationError, TaxEngineError};
pub use models::*;
