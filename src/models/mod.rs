//! Data models for the ZDAD core
//!
//! These types are used across the platform seam, the push wire, and the
//! in-memory chat state.

mod types;

pub use types::*;
