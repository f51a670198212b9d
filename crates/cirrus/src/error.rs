//! Error types for Cirrus operations.
//!
//! Almost nothing in the pipeline fails: unreliable input degrades to a
//! simpler graph and the anomaly is logged. [`CirrusError`] covers what is
//! left, which is malformed catalog data plus the I/O and configuration
//! failures of the outer surfaces.

use std::io;

use thiserror::Error;

use cirrus_parser::error::CatalogError;

/// The main error type for Cirrus operations.
#[derive(Debug, Error)]
pub enum CirrusError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for CirrusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}
