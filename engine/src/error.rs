//! Error types for the Converge engine.

use thiserror::Error;

/// Which side of a reconciliation a malformed collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The caller-declared target collection
    Desired,
    /// The collection reported by the remote API
    Observed,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Desired => write!(f, "desired"),
            Side::Observed => write!(f, "observed"),
        }
    }
}

/// All possible errors from the Converge engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A key appeared more than once within one collection. Keys must be
    /// unique per side; a duplicate desired key is a caller configuration
    /// bug and is never retried.
    #[error("duplicate key '{key}' in {side} collection")]
    DuplicateKey { key: String, side: Side },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
