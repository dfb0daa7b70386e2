//! isocert auth - bearer token authentication
//!
//! This crate provides:
//! - JWT claims and the per-request auth context
//! - Token encoding and cached token validation

pub mod model;
pub mod service;

// Re-export commonly used types
pub use model::*;
