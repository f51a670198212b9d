//! Candidate extraction and service resolution for Cirrus.
//!
//! This crate turns raw input into resolved service descriptors:
//!
//! 1. [`extract`] locates an embedded structured payload, or scans free text
//!    for candidate service names.
//! 2. [`resolve`] maps each candidate onto a canonical descriptor from the
//!    provider [`catalog`]s, falling back to a fuzzy [`score`] and finally to
//!    a placeholder.
//!
//! Neither step fails on bad input. The only hard error is malformed external
//! catalog data ([`error::CatalogError`]).
//!
//! # Example
//!
//! ```
//! # use cirrus_parser::{CatalogSet, Extraction, Extractor, Resolver};
//! let text = "Use Azure Functions to write into Cosmos DB.";
//! let resolver = Resolver::new(CatalogSet::builtin());
//! let extractor = Extractor::new(resolver.catalogs());
//!
//! let Extraction::Candidates(candidates) = extractor.extract(text) else {
//!     panic!("no payload expected");
//! };
//! let ids: Vec<_> = candidates
//!     .iter()
//!     .map(|candidate| resolver.resolve_with_context(candidate.text(), text).id().to_string())
//!     .collect();
//! assert_eq!(ids, ["azure-functions", "azure-cosmos-db"]);
//! ```

pub mod catalog;
pub mod error;
pub mod extract;
pub mod payload;
pub mod resolve;
pub mod score;

pub use catalog::{CatalogEntry, CatalogSet};
pub use extract::{Candidate, CandidateKind, Extraction, Extractor};
pub use resolve::{MatchKind, Resolution, Resolver};
