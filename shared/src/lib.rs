//! Shared types for the print gateway
//!
//! Domain models received from the POS backend and the unified error
//! types used by the HTTP layer.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
