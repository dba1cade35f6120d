//! Shared types and models for the KrishiMitra farmer platform
//!
//! This crate contains the request/response shapes exchanged between the
//! gateway and the browser client (via WASM), plus the pure helpers both
//! sides rely on: the weather advisory table, unit conversion, mandi date and
//! price handling, and input validation.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
