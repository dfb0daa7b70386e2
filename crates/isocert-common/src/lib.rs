//! isocert common - shared types used across all isocert crates
//!
//! - Error types and error codes
//! - Pagination defaults

pub mod error;

pub use error::{ErrorCode, IsocertError};

/// Default `skip` for list endpoints
pub const DEFAULT_SKIP: u64 = 0;

/// Default `limit` for list endpoints
pub const DEFAULT_LIMIT: u64 = 100;
