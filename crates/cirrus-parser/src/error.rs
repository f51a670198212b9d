//! Errors raised while loading provider catalogs.

use thiserror::Error;

/// Malformed catalog data.
///
/// This is the only hard failure of the extraction and resolution stages:
/// everything else degrades to a placeholder or a text fallback.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog entry #{index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },

    #[error("duplicate catalog id `{0}`")]
    DuplicateId(String),
}
