//! Core types shared across odoo-boost
//!
//! - `BoostError` / `BoostResult` - Error types

pub mod error;

pub use error::{BoostError, BoostResult};
