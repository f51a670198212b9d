use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::tempdir;

use cirrus_cli::{Args, run};

fn demos_dir() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all demo inputs (.txt, .md, .json) from a directory
fn collect_inputs(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = if let Ok(entries) = fs::read_dir(dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && matches!(
                        path.extension().and_then(|s| s.to_str()),
                        Some("txt" | "md" | "json")
                    )
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &Path, output: &Path, catalogs: &[&Path]) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        catalogs: catalogs
            .iter()
            .map(|path| path.to_string_lossy().to_string())
            .collect(),
        log_level: "off".to_string(),
    }
}

fn read_graph(path: &Path) -> Value {
    let content = fs::read_to_string(path).expect("Output should be written");
    serde_json::from_str(&content).expect("Output should be valid JSON")
}

#[test]
fn e2e_smoke_test_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = demos_dir();
    let extra_catalog = demos.join("catalogs").join("acme.json");
    let inputs = collect_inputs(&demos);

    assert!(!inputs.is_empty(), "No demo inputs found in demos/");

    let mut failed = Vec::new();

    for input in &inputs {
        let output = temp_dir.path().join(format!(
            "{}.json",
            input.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args(input, &output, &[&extra_catalog])) {
            Ok(()) => {
                let graph = read_graph(&output);
                let nodes = graph["nodes"].as_array().map_or(0, Vec::len);
                if nodes == 0 {
                    failed.push((input.clone(), "empty render graph".to_string()));
                }
            }
            Err(e) => failed.push((input.clone(), e.to_string())),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }

    println!("✅ All {} demos passed", inputs.len());
}

#[test]
fn e2e_flow_demo_output_shape() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("flow.json");

    run(&args(&demos_dir().join("flow.txt"), &output, &[])).expect("Flow demo should run");

    let graph = read_graph(&output);
    let ids: Vec<_> = graph["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["azure-functions", "azure-cosmos-db"]);
    assert_eq!(graph["edges"][0]["source"], "azure-functions");
    assert_eq!(graph["edges"][0]["target"], "azure-cosmos-db");
}

#[test]
fn e2e_extra_catalog_resolves_alias() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = demos_dir();
    let output = temp_dir.path().join("ledger.json");

    run(&args(
        &demos.join("ledger.txt"),
        &output,
        &[&demos.join("catalogs").join("acme.json")],
    ))
    .expect("Ledger demo should run");

    let graph = read_graph(&output);
    let ledger = graph["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|node| node["id"] == "acme-ledger")
        .expect("Ledger should resolve through the extra catalog");
    assert_eq!(ledger["data"]["category"], "Database");
}

#[test]
fn e2e_no_architecture_writes_empty_graph() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("chatter.txt");
    fs::write(&input, "thanks, that is all for today").unwrap();
    let output = temp_dir.path().join("chatter.json");

    run(&args(&input, &output, &[])).expect("Empty input is not an error");

    let graph = read_graph(&output);
    assert_eq!(graph["nodes"].as_array().map(Vec::len), Some(0));
    assert_eq!(graph["edges"].as_array().map(Vec::len), Some(0));
}

#[test]
fn e2e_errors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = demos_dir();
    let output = temp_dir.path().join("error.json");

    let broken_catalog = demos.join("catalogs").join("broken.json");
    assert!(
        run(&args(&demos.join("flow.txt"), &output, &[&broken_catalog])).is_err(),
        "Malformed catalog should fail"
    );

    let missing_input = temp_dir.path().join("missing.txt");
    assert!(
        run(&args(&missing_input, &output, &[])).is_err(),
        "Missing input should fail"
    );

    let mut missing_config = args(&demos.join("flow.txt"), &output, &[]);
    missing_config.config = Some(temp_dir.path().join("none.toml").to_string_lossy().to_string());
    assert!(run(&missing_config).is_err(), "Missing config should fail");
}
