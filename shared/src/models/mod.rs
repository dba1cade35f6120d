//! Transient request/response models for the KrishiMitra gateway

mod crop;
mod mandi;
mod soil;
mod weather;

pub use crop::*;
pub use mandi::*;
pub use soil::*;
pub use weather::*;
