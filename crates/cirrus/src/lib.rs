//! Cirrus - turns cloud architecture descriptions into laid-out graphs.
//!
//! Input is either free text naming cloud services or a structured payload
//! embedded in that text. The pipeline extracts candidate names, resolves
//! them against provider catalogs, nests the resulting services in groups,
//! lays everything out and assembles a renderable node/edge list.

pub mod assemble;
pub mod config;
pub mod containment;
pub mod layout;

mod error;
mod ingest;

pub use cirrus_core::{architecture, geometry, group, provider, service};
pub use cirrus_parser::{CatalogSet, Resolver, error::CatalogError};

pub use error::CirrusError;

use log::{debug, info, trace, warn};
use serde_json::Value;

use cirrus_core::architecture::{LayoutMode, ParsedArchitecture};
use cirrus_parser::{
    Extraction, Extractor,
    payload::{RawPayload, is_architecture_object},
};

use assemble::RenderGraph;
use config::AppConfig;
use containment::ContainmentBuilder;
use ingest::Draft;
use layout::{LayoutEngine, LayoutResult};

/// The result of parsing one input.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// At least one service or group was resolved.
    Architecture(ParsedArchitecture),
    /// The input named no services and no groups.
    NoArchitecture,
}

impl ParseOutcome {
    pub fn architecture(&self) -> Option<&ParsedArchitecture> {
        match self {
            Self::Architecture(arch) => Some(arch),
            Self::NoArchitecture => None,
        }
    }

    pub fn into_architecture(self) -> Option<ParsedArchitecture> {
        match self {
            Self::Architecture(arch) => Some(arch),
            Self::NoArchitecture => None,
        }
    }

    pub fn is_architecture(&self) -> bool {
        matches!(self, Self::Architecture(_))
    }
}

/// Builder for parsing, laying out and rendering architectures.
///
/// The builder owns the resolver with its lazily built title index, so build
/// it once and reuse it for every input. It is `Send + Sync`; concurrent
/// calls share nothing mutable.
///
/// # Examples
///
/// ```
/// use cirrus::{ArchitectureBuilder, config::AppConfig};
///
/// let builder = ArchitectureBuilder::new(AppConfig::default());
///
/// let outcome = builder.parse("Use Azure Functions to write into Cosmos DB.");
/// let arch = outcome.architecture().expect("services found");
/// assert_eq!(arch.services().len(), 2);
/// assert_eq!(arch.connections().len(), 1);
///
/// let graph = builder.render(arch);
/// assert_eq!(graph.nodes().len(), 2);
/// assert_eq!(graph.edges()[0].id(), "edge-azure-functions-azure-cosmos-db");
/// ```
#[derive(Debug)]
pub struct ArchitectureBuilder {
    config: AppConfig,
    resolver: Resolver,
    extractor: Extractor,
    engine: LayoutEngine,
}

impl Default for ArchitectureBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl ArchitectureBuilder {
    /// Create a builder over the built-in provider catalogs.
    pub fn new(config: AppConfig) -> Self {
        Self::with_catalogs(config, CatalogSet::builtin())
    }

    /// Create a builder over `catalogs`, configuring the resolver from `config`.
    pub fn with_catalogs(config: AppConfig, catalogs: CatalogSet) -> Self {
        let resolver_config = config.resolver();
        let resolver = Resolver::new(catalogs)
            .with_threshold(resolver_config.fuzzy_threshold())
            .with_preferred_provider(resolver_config.preferred_provider())
            .with_extra_aliases(
                resolver_config
                    .extra_aliases()
                    .iter()
                    .map(|(alias, title)| (alias.as_str(), title.as_str())),
            );
        Self::with_resolver(config, resolver)
    }

    /// Create a builder around an already configured resolver.
    ///
    /// The resolver settings of `config` are ignored.
    pub fn with_resolver(config: AppConfig, resolver: Resolver) -> Self {
        let extractor = Extractor::new(resolver.catalogs());
        let engine = LayoutEngine::new(config.layout().clone());
        Self {
            config,
            resolver,
            extractor,
            engine,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Parse raw input into an architecture.
    ///
    /// An embedded structured payload takes precedence; otherwise the text is
    /// scanned for service names and the connections between them.
    pub fn parse(&self, input: &str) -> ParseOutcome {
        info!(bytes = input.len(); "Parsing architecture input");

        let draft = match self.extractor.extract(input) {
            Extraction::Payload(payload) => ingest::from_payload(&payload, &self.resolver, input),
            Extraction::Candidates(candidates) => {
                ingest::from_text(&candidates, input, &self.resolver)
            }
        };
        self.finish(draft)
    }

    /// Parse an already decoded structured payload.
    ///
    /// Values without any recognised architecture field, or that do not
    /// decode, yield [`ParseOutcome::NoArchitecture`].
    pub fn parse_value(&self, value: &Value) -> ParseOutcome {
        if !is_architecture_object(value) {
            warn!("Value has no architecture fields");
            return ParseOutcome::NoArchitecture;
        }
        let payload: RawPayload = match serde_json::from_value(value.clone()) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(err:% = err; "Malformed architecture payload");
                return ParseOutcome::NoArchitecture;
            }
        };

        let context = value.to_string();
        self.finish(ingest::from_payload(&payload, &self.resolver, &context))
    }

    /// Compute positions for every service and group of `arch`.
    pub fn layout(&self, arch: &ParsedArchitecture) -> LayoutResult {
        self.engine.compute(arch)
    }

    /// Lay out `arch` and assemble the renderable graph.
    pub fn render(&self, arch: &ParsedArchitecture) -> RenderGraph {
        let layout = self.layout(arch);
        assemble::assemble(arch, &layout)
    }

    fn finish(&self, mut draft: Draft) -> ParseOutcome {
        let connections = ingest::validate_connections(
            std::mem::take(&mut draft.connections),
            &draft.entity_ids(),
        );

        let (services, groups) = ContainmentBuilder::new(draft.services)
            .with_declarations(draft.declarations)
            .with_claims(draft.claims)
            .with_connections(&connections)
            .build()
            .into_parts();
        if services.is_empty() && groups.is_empty() {
            info!("No architecture found in input");
            return ParseOutcome::NoArchitecture;
        }

        let requested = draft.layout.as_deref();
        let mode = LayoutMode::parse_or(requested, self.config.layout().default_mode());
        if requested.is_some_and(|requested| requested.parse::<LayoutMode>().is_err()) {
            debug!(requested:?, mode = mode.as_str(); "Unknown layout mode, default used");
        }

        let arch = ParsedArchitecture::new(services, connections, groups, mode)
            .with_layout_hints(draft.group_hints);
        info!(
            services = arch.services().len(),
            groups = arch.groups().len(),
            connections = arch.connections().len(),
            mode = mode.as_str();
            "Architecture parsed"
        );
        trace!(arch:?; "Parsed architecture");
        ParseOutcome::Architecture(arch)
    }
}
