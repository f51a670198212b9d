//! Error types for the Cirrus data model.
//!
//! The model itself is lenient: most conversions degrade to a default value.
//! These errors are only produced by the strict [`std::str::FromStr`]
//! implementations.

use thiserror::Error;

/// Errors produced when a string cannot be mapped onto a closed model enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown provider `{0}`")]
    UnknownProvider(String),

    #[error("unknown layout mode `{0}`")]
    UnknownLayoutMode(String),
}
