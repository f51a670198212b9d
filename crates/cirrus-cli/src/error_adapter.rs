//! Error adapter for converting CirrusError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Catalog files that fail to decode as JSON are reported with a labelled
//! snippet of the offending file; every other error is reported as a plain
//! message with a code and, where one helps, a hint.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use cirrus::{CirrusError, CatalogError};

/// Adapter for a catalog file that is not valid JSON.
pub struct CatalogSourceAdapter<'a> {
    err: &'a serde_json::Error,
    name: &'a str,
    src: &'a str,
}

impl<'a> CatalogSourceAdapter<'a> {
    /// Create a new adapter for `err`, raised while decoding `src` read from `name`.
    pub fn new(err: &'a serde_json::Error, name: &'a str, src: &'a str) -> Self {
        Self { err, name, src }
    }

    fn offset(&self) -> usize {
        line_column_offset(self.src, self.err.line(), self.err.column())
    }
}

impl fmt::Debug for CatalogSourceAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogSourceAdapter")
            .field("err", &self.err)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for CatalogSourceAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid catalog JSON in {}", self.name)
    }
}

impl std::error::Error for CatalogSourceAdapter<'_> {}

impl MietteDiagnostic for CatalogSourceAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("cirrus::catalog"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a catalog is a JSON array of {id, title, category, iconRef, provider} objects",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::from(self.offset()..self.offset());
        let label = LabeledSpan::new_primary_with_span(Some(self.err.to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`CirrusError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a CirrusError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CirrusError::Io(_) => "cirrus::io",
            CirrusError::Catalog(_) => "cirrus::catalog",
            CirrusError::Config(_) => "cirrus::config",
            CirrusError::Serialize(_) => "cirrus::serialize",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CirrusError::Catalog(CatalogError::DuplicateId(_)) => {
                "catalog ids must be unique across the built-in and extra catalogs"
            }
            CirrusError::Catalog(CatalogError::EmptyField { .. }) => {
                "every catalog entry needs a non-empty id, title and provider"
            }
            CirrusError::Config(_) => {
                "configuration is read from --config, ./cirrus/config.toml or the user config directory"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A catalog decoding failure with a snippet of the file.
    Catalog(CatalogSourceAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Catalog(c) => fmt::Display::fmt(c, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Catalog(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Catalog(c) => c.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Catalog(c) => c.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Catalog(c) => c.source_code(),
            Reportable::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Catalog(c) => c.labels(),
            Reportable::Error(_) => None,
        }
    }
}

/// An error raised by [`run`](crate::run), with the catalog source it came
/// from when a catalog file failed to load.
#[derive(Debug)]
pub struct RunError {
    err: CirrusError,
    catalog: Option<(String, String)>,
}

impl RunError {
    /// Attach the name and content of the catalog file that produced `err`.
    pub(crate) fn in_catalog(err: CirrusError, name: &str, src: String) -> Self {
        Self {
            err,
            catalog: Some((name.to_string(), src)),
        }
    }

    pub fn error(&self) -> &CirrusError {
        &self.err
    }
}

impl From<CirrusError> for RunError {
    fn from(err: CirrusError) -> Self {
        Self { err, catalog: None }
    }
}

impl From<std::io::Error> for RunError {
    fn from(err: std::io::Error) -> Self {
        CirrusError::from(err).into()
    }
}

impl From<serde_json::Error> for RunError {
    fn from(err: serde_json::Error) -> Self {
        CirrusError::from(err).into()
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.err, f)
    }
}

/// Convert a [`RunError`] into the reportable to render.
pub fn to_reportable(err: &RunError) -> Reportable<'_> {
    match (&err.err, &err.catalog) {
        (CirrusError::Catalog(CatalogError::Json(json)), Some((name, src))) => {
            Reportable::Catalog(CatalogSourceAdapter::new(json, name, src))
        }
        (other, _) => Reportable::Error(ErrorAdapter(other)),
    }
}

/// Byte offset of a 1-based line and column, clamped to the end of `src`.
fn line_column_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}
