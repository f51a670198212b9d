//! Cirrus CLI library
//!
//! This module contains the core CLI logic for the Cirrus architecture tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use cirrus::{ArchitectureBuilder, CatalogSet, CirrusError, ParseOutcome, assemble::RenderGraph};

use error_adapter::RunError;

/// Run the Cirrus CLI application
///
/// This function processes the input file through the Cirrus pipeline
/// and writes the resulting render graph as JSON to the output file. An
/// input that names no architecture produces an empty graph.
///
/// # Errors
///
/// Returns [`RunError`] for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed extra catalogs
/// - Serialization errors
pub fn run(args: &Args) -> Result<(), RunError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing architecture"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let catalogs = load_catalogs(&args.catalogs)?;

    let source = fs::read_to_string(&args.input)?;

    let builder = ArchitectureBuilder::with_catalogs(app_config, catalogs);
    let graph = match builder.parse(&source) {
        ParseOutcome::Architecture(arch) => builder.render(&arch),
        ParseOutcome::NoArchitecture => {
            warn!(input_path = args.input; "No architecture found, writing an empty graph");
            RenderGraph::default()
        }
    };

    let json = serde_json::to_string_pretty(&graph)?;
    fs::write(&args.output, json)?;

    info!(
        output_file = args.output,
        nodes = graph.nodes().len(),
        edges = graph.edges().len();
        "Render graph exported successfully"
    );

    Ok(())
}

/// Built-in catalogs extended with every file in `paths`, in order.
fn load_catalogs(paths: &[String]) -> Result<CatalogSet, RunError> {
    let mut catalogs = CatalogSet::builtin();
    for path in paths {
        let content = fs::read_to_string(path)?;
        match catalogs.extend_from_json(&content) {
            Ok(added) => info!(path, entries = added; "Extra catalog loaded"),
            Err(err) => return Err(RunError::in_catalog(CirrusError::from(err), path, content)),
        }
    }
    Ok(catalogs)
}
