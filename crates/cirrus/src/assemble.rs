//! Output assembly: the node and edge lists handed to a renderer.
//!
//! Assembly only reshapes data. Group nodes come first with every parent
//! before its children, so a renderer can create containers before their
//! contents. Service nodes follow in service order. Each nested node carries
//! both its absolute position and its position relative to its container.

use std::collections::HashSet;

use log::{debug, warn};
use serde::Serialize;

use cirrus_core::{
    architecture::ParsedArchitecture,
    geometry::{Point, Size},
    group::{Group, GroupMetadata, GroupType},
    provider::Provider,
    service::ServiceDescriptor,
};

use crate::{
    ingest::IdAllocator,
    layout::{LayoutResult, Placement},
};

/// What a [`RenderNode`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderNodeType {
    Group,
    Service,
}

/// Descriptive fields shown on a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<Provider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_type: Option<GroupType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<GroupMetadata>,
}

impl NodeData {
    fn for_service(service: &ServiceDescriptor) -> Self {
        Self {
            label: service.title().to_string(),
            category: Some(service.category().to_string()),
            provider: Some(service.provider()),
            icon_ref: Some(service.icon_ref().to_string()),
            description: Some(service.description().to_string()),
            group_type: None,
            metadata: None,
        }
    }

    fn for_group(group: &Group) -> Self {
        Self {
            label: group.label().to_string(),
            category: None,
            provider: None,
            icon_ref: None,
            description: None,
            group_type: Some(group.group_type()),
            metadata: group.metadata().cloned(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn provider(&self) -> Option<Provider> {
        self.provider
    }

    pub fn icon_ref(&self) -> Option<&str> {
        self.icon_ref.as_deref()
    }

    pub fn group_type(&self) -> Option<GroupType> {
        self.group_type
    }
}

/// One positioned node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    id: String,
    #[serde(rename = "type")]
    node_type: RenderNodeType,
    position: Point,
    relative_position: Point,
    size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extent: Option<&'static str>,
    data: NodeData,
}

impl RenderNode {
    fn new(
        id: &str,
        node_type: RenderNodeType,
        placement: &Placement,
        layout: &LayoutResult,
        data: NodeData,
    ) -> Self {
        let position = placement.position();
        let parent = placement
            .parent_id()
            .and_then(|parent| layout.position(parent).map(|origin| (parent, origin)));
        let relative_position = parent.map_or(position, |(_, origin)| position.sub_point(origin));

        Self {
            id: id.to_string(),
            node_type,
            position,
            relative_position,
            size: placement.size(),
            parent_id: parent.map(|(parent, _)| parent.to_string()),
            extent: parent.map(|_| "parent"),
            data,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> RenderNodeType {
        self.node_type
    }

    /// Absolute top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Top-left corner relative to the parent container.
    pub fn relative_position(&self) -> Point {
        self.relative_position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }
}

/// One directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderEdge {
    id: String,
    source: String,
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl RenderEdge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// The complete renderable graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
}

impl RenderGraph {
    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RenderEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Merges an architecture with its layout into a [`RenderGraph`].
///
/// Entities without a placement in `layout` are left out with a warning.
pub fn assemble(arch: &ParsedArchitecture, layout: &LayoutResult) -> RenderGraph {
    let mut nodes = Vec::with_capacity(arch.groups().len() + arch.services().len());

    let mut groups: Vec<(usize, &Group)> = arch
        .groups()
        .iter()
        .map(|group| (nesting_depth(layout, group.id()), group))
        .collect();
    groups.sort_by_key(|&(depth, _)| depth);

    for (_, group) in groups {
        match layout.get(group.id()) {
            Some(placement) => nodes.push(RenderNode::new(
                group.id(),
                RenderNodeType::Group,
                placement,
                layout,
                NodeData::for_group(group),
            )),
            None => warn!(group = group.id(); "Group without placement left out"),
        }
    }
    for service in arch.services() {
        match layout.get(service.id()) {
            Some(placement) => nodes.push(RenderNode::new(
                service.id(),
                RenderNodeType::Service,
                placement,
                layout,
                NodeData::for_service(service),
            )),
            None => warn!(service = service.id(); "Service without placement left out"),
        }
    }

    let mut edge_ids = IdAllocator::default();
    let edges: Vec<RenderEdge> = arch
        .connections()
        .iter()
        .map(|connection| RenderEdge {
            id: edge_ids.reserve(&format!("edge-{}-{}", connection.from(), connection.to())),
            source: connection.from().to_string(),
            target: connection.to().to_string(),
            label: connection.label().map(str::to_string),
        })
        .collect();

    debug!(nodes = nodes.len(), edges = edges.len(); "Render graph assembled");
    RenderGraph { nodes, edges }
}

/// Number of containers above `id` in the layout.
fn nesting_depth(layout: &LayoutResult, id: &str) -> usize {
    let mut seen = HashSet::from([id]);
    let mut depth = 0;
    let mut current = id;
    while let Some(parent) = layout.get(current).and_then(Placement::parent_id) {
        if !seen.insert(parent) {
            break;
        }
        depth += 1;
        current = parent;
    }
    depth
}
