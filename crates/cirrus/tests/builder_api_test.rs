//! Integration tests for the ArchitectureBuilder API
//!
//! These tests drive the whole pipeline from raw input to render graph.

use std::collections::{HashMap, HashSet};

use cirrus::{
    ArchitectureBuilder, ParseOutcome,
    architecture::{LayoutMode, ParsedArchitecture},
    assemble::RenderNodeType,
    config::{AppConfig, LayoutConfig},
    layout::Strategy,
    service::{GENERIC_ICON, PLACEHOLDER_CATEGORY},
};

fn parse(input: &str) -> ParsedArchitecture {
    ArchitectureBuilder::default()
        .parse(input)
        .into_architecture()
        .expect("Input should contain an architecture")
}

fn assert_unique_ids(arch: &ParsedArchitecture) {
    let mut seen = HashSet::new();
    for service in arch.services() {
        assert!(seen.insert(service.id()), "Duplicate service id {}", service.id());
    }
}

fn assert_referential_integrity(arch: &ParsedArchitecture) {
    for connection in arch.connections() {
        assert!(arch.contains_entity(connection.from()), "Dangling {}", connection.from());
        assert!(arch.contains_entity(connection.to()), "Dangling {}", connection.to());
        assert_ne!(connection.from(), connection.to());
    }
}

fn assert_acyclic(arch: &ParsedArchitecture) {
    let parents: HashMap<&str, Option<&str>> = arch
        .groups()
        .iter()
        .map(|group| (group.id(), group.parent_id()))
        .collect();
    for group in arch.groups() {
        let mut seen = HashSet::from([group.id()]);
        let mut current = group.parent_id();
        while let Some(parent) = current {
            assert!(seen.insert(parent), "Cycle through {parent}");
            current = parents.get(parent).copied().flatten();
        }
    }
}

const HIERARCHY_PAYLOAD: &str = r#"
Here is the architecture:

```json
{
  "groups": [
    {"id": "mg", "label": "Contoso", "type": "managementGroup"},
    {"id": "sub", "label": "Production", "type": "subscription", "parentId": "mg"},
    {"id": "rg", "label": "Core Services", "type": "resourceGroup", "parentId": "sub"}
  ],
  "services": [
    {"id": "api", "title": "Azure App Service", "groupIds": ["rg"]},
    {"title": "Azure Cosmos DB", "groupIds": ["rg"]},
    {"title": "Azure Cosmos DB"}
  ],
  "connections": [
    {"from": "api", "to": "Azure Cosmos DB", "label": "reads"},
    {"from": "api", "to": "nowhere"},
    {"from": "api", "to": "api"}
  ],
  "layout": "vertical"
}
```
"#;

#[test]
fn test_builder_api_exists() {
    let _builder = ArchitectureBuilder::default();
    let _builder = ArchitectureBuilder::new(AppConfig::default());
}

#[test]
fn test_text_flow_scenario() {
    let builder = ArchitectureBuilder::default();
    let arch = builder
        .parse("Use Azure Functions to write into Cosmos DB.")
        .into_architecture()
        .expect("Failed to parse");

    let ids: Vec<_> = arch.services().iter().map(|s| s.id()).collect();
    assert_eq!(ids, ["azure-functions", "azure-cosmos-db"]);
    assert_eq!(arch.connections().len(), 1);

    let layout = builder.layout(&arch);
    assert_eq!(layout.strategy(), Strategy::Flow);
    let source = layout.position("azure-functions").unwrap();
    let target = layout.position("azure-cosmos-db").unwrap();
    assert!(target.x() > source.x(), "Target should sit in the next layer");
    assert_eq!(source.y(), target.y());
}

#[test]
fn test_hierarchy_scenario() {
    let arch = parse(HIERARCHY_PAYLOAD);

    assert_eq!(arch.layout_mode(), LayoutMode::Vertical);
    assert_eq!(arch.groups().len(), 3);
    assert_eq!(arch.service_depth("api"), 3);
    assert_eq!(arch.group_of_service("api").map(|g| g.id()), Some("rg"));
    assert_acyclic(&arch);
}

#[test]
fn test_payload_ids_and_connections() {
    let arch = parse(HIERARCHY_PAYLOAD);

    let ids: Vec<_> = arch.services().iter().map(|s| s.id()).collect();
    assert_eq!(ids, ["api", "azure-cosmos-db", "azure-cosmos-db-2"]);
    assert_unique_ids(&arch);

    assert_eq!(arch.connections().len(), 1);
    assert_eq!(arch.connections()[0].to(), "azure-cosmos-db");
    assert_eq!(arch.connections()[0].label(), Some("reads"));
    assert_referential_integrity(&arch);
}

#[test]
fn test_placeholder_scenario() {
    let builder = ArchitectureBuilder::default();
    let arch = parse("The SuperWidget Service handles billing.");

    let service = &arch.services()[0];
    assert_eq!(service.category(), PLACEHOLDER_CATEGORY);
    assert_eq!(service.icon_ref(), GENERIC_ICON);
    assert!(!service.id().is_empty());

    let graph = builder.render(&arch);
    assert!(graph.node(service.id()).is_some());
}

#[test]
fn test_conflicting_membership_scenario() {
    let arch = parse(
        r#"{
            "groups": [
                {"id": "sub", "type": "subscription", "members": ["fn"]},
                {"id": "subnet", "type": "subnet", "members": ["fn"]},
                {"id": "rg-1", "type": "resourceGroup", "members": ["x", "y"]},
                {"id": "rg-2", "type": "resourceGroup", "members": ["y"]}
            ],
            "services": [
                {"id": "fn", "title": "Azure Functions"},
                {"id": "x", "title": "Azure Blob Storage"},
                {"id": "y", "title": "Azure Key Vault"}
            ]
        }"#,
    );

    let members = |id: &str| arch.group(id).unwrap().members().to_vec();
    assert_eq!(members("subnet"), ["fn"]);
    assert!(members("sub").is_empty());
    assert_eq!(members("rg-1"), ["x"]);
    assert_eq!(members("rg-2"), ["y"]);
}

#[test]
fn test_cycle_scenario() {
    let builder = ArchitectureBuilder::default();
    let arch = parse(r#"{"groups": [{"id": "a", "parentId": "b"}, {"id": "b", "parentId": "a"}]}"#);

    assert_acyclic(&arch);
    assert_eq!(arch.root_groups().count(), 1);

    let graph = builder.render(&arch);
    assert_eq!(graph.nodes().len(), 2);
    for node in graph.nodes() {
        assert_eq!(node.node_type(), RenderNodeType::Group);
        assert!(node.position().x().is_finite());
        assert!(node.position().y().is_finite());
    }
}

#[test]
fn test_idempotent_parse() {
    let builder = ArchitectureBuilder::default();

    let first = builder.parse(HIERARCHY_PAYLOAD);
    let second = builder.parse(HIERARCHY_PAYLOAD);
    assert_eq!(first, second);

    let first = first.into_architecture().unwrap();
    let second = second.into_architecture().unwrap();
    assert_eq!(builder.render(&first), builder.render(&second));
}

#[test]
fn test_no_architecture() {
    let builder = ArchitectureBuilder::default();

    assert_eq!(builder.parse(""), ParseOutcome::NoArchitecture);
    assert_eq!(builder.parse("{\"services\": []}"), ParseOutcome::NoArchitecture);
}

#[test]
fn test_malformed_payload_falls_back_to_text() {
    let arch = parse("architecture: {\"services\": [\"Amazon S3\", } and also AWS Lambda");

    let ids: Vec<_> = arch.services().iter().map(|s| s.id()).collect();
    assert!(ids.contains(&"aws-lambda"), "Text path should find Lambda: {ids:?}");
}

#[test]
fn test_payload_with_null_fields_keeps_structure() {
    let arch = parse(
        r#"{"services": [
              {"id": "fn", "title": "Azure Functions", "groupIds": ["rg"]},
              {"id": "db", "title": "Cosmos DB", "groupIds": null}
            ],
            "groups": [{"id": "rg", "type": "resourceGroup", "members": null, "parentId": null}],
            "connections": [{"from": "fn", "to": "db"}]}"#,
    );

    let ids: Vec<_> = arch.services().iter().map(|s| s.id()).collect();
    assert_eq!(ids, ["fn", "db"]);
    assert_eq!(arch.group_of_service("fn").map(|g| g.id()), Some("rg"));
    assert_eq!(arch.connections().len(), 1);
    assert_eq!(arch.connections()[0].from(), "fn");
    assert_eq!(arch.connections()[0].to(), "db");
}

#[test]
fn test_payload_with_numeric_ids_keeps_structure() {
    let arch = parse(
        r#"{"services": [
              {"id": 1, "title": "Azure Functions", "groupIds": [7]},
              {"id": 2, "title": "Cosmos DB"},
              17
            ],
            "groups": [{"id": 7, "type": "resourceGroup"}],
            "connections": [{"from": 1, "to": 2}, "broken"]}"#,
    );

    let ids: Vec<_> = arch.services().iter().map(|s| s.id()).collect();
    assert_eq!(ids, ["1", "2"]);
    assert_eq!(arch.group_of_service("1").map(|g| g.id()), Some("7"));
    assert_eq!(arch.connections().len(), 1);
    assert_referential_integrity(&arch);
}

#[test]
fn test_render_graph_nesting() {
    let builder = ArchitectureBuilder::default();
    let arch = parse(HIERARCHY_PAYLOAD);

    let graph = builder.render(&arch);

    let ids: Vec<_> = graph.nodes().iter().map(|n| n.id()).collect();
    assert_eq!(&ids[..3], ["mg", "sub", "rg"]);
    let api = graph.node("api").unwrap();
    let rg = graph.node("rg").unwrap();
    assert_eq!(api.parent_id(), Some("rg"));
    assert_eq!(api.relative_position(), api.position().sub_point(rg.position()));
    assert_eq!(graph.edges().len(), 1);
    assert_eq!(graph.edges()[0].id(), "edge-api-azure-cosmos-db");
}

#[test]
fn test_builder_with_config() {
    let config = AppConfig::new(
        LayoutConfig::default().with_default_mode(LayoutMode::Grid),
        Default::default(),
    );
    let builder = ArchitectureBuilder::new(config);

    let arch = builder
        .parse("We use Amazon S3, AWS Lambda and Amazon SQS.")
        .into_architecture()
        .expect("Failed to parse");

    assert_eq!(arch.layout_mode(), LayoutMode::Grid);
    assert_eq!(builder.layout(&arch).strategy(), Strategy::Grid);
}

#[test]
fn test_builder_reusability() {
    let builder = ArchitectureBuilder::default();

    let first = builder.parse("AWS Lambda writes to Amazon S3.");
    let second = builder.parse("Google Cloud Run calls Cloud SQL.");

    let first = first.into_architecture().expect("Failed to parse first");
    let second = second.into_architecture().expect("Failed to parse second");
    assert_eq!(builder.render(&first).nodes().len(), 2);
    assert_ne!(first, second);
}
