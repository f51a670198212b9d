//! Layered placement for flat graphs.
//!
//! Nodes are assigned layers by longest path from a source, layers run left
//! to right, and the nodes of a layer are stacked around a common vertical
//! center.

use std::collections::{HashMap, VecDeque};

use log::{trace, warn};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use cirrus_core::{
    architecture::Connection,
    geometry::{Point, Size},
};

use crate::config::LayoutConfig;

/// A node to place.
#[derive(Debug, Clone, Copy)]
pub(super) struct FlowNode<'a> {
    id: &'a str,
    size: Size,
}

impl<'a> FlowNode<'a> {
    pub(super) fn new(id: &'a str, size: Size) -> Self {
        Self { id, size }
    }

    pub(super) fn id(&self) -> &'a str {
        self.id
    }

    pub(super) fn size(&self) -> Size {
        self.size
    }
}

/// Returns the top-left position of every node, in input order.
///
/// Only connections between two of `nodes` take part in layering.
pub(super) fn arrange(
    nodes: &[FlowNode<'_>],
    connections: &[Connection],
    origin: Point,
    config: &LayoutConfig,
) -> Vec<Point> {
    let ids: Vec<&str> = nodes.iter().map(FlowNode::id).collect();
    let node_layers = assign_layers(&ids, connections);

    let layer_count = node_layers.iter().max().map_or(0, |max| max + 1);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (node, &layer) in node_layers.iter().enumerate() {
        layers[layer].push(node);
    }
    for layer in &mut layers {
        layer.sort_by(|&a, &b| nodes[a].id.cmp(nodes[b].id).then(a.cmp(&b)));
    }

    let layer_widths: Vec<f32> = layers
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|&node| nodes[node].size.width())
                .fold(0.0, f32::max)
        })
        .collect();
    let layer_heights: Vec<f32> = layers
        .iter()
        .map(|layer| stacked_height(layer.iter().map(|&node| nodes[node].size), config))
        .collect();
    let tallest = layer_heights.iter().copied().fold(0.0, f32::max);
    let layer_x_positions = calculate_layer_x_positions(&layer_widths, config.layer_spacing());

    let mut positions = vec![origin; nodes.len()];
    for (index, layer) in layers.iter().enumerate() {
        let mut y = origin.y() + (tallest - layer_heights[index]) / 2.0;
        for &node in layer {
            let size = nodes[node].size;
            let x = origin.x() + layer_x_positions[index] + (layer_widths[index] - size.width()) / 2.0;
            positions[node] = Point::new(x, y);
            y += size.height() + config.sibling_spacing();
        }
    }
    positions
}

/// Assigns every id the length of the longest path reaching it.
///
/// A Kahn traversal assigns each node one more than the highest layer among
/// its predecessors. When the connections contain a cycle the traversal
/// stalls; every node is then processed in input order instead, counting only
/// predecessors that come earlier. Returns one layer per id, in input order.
pub(super) fn assign_layers(ids: &[&str], connections: &[Connection]) -> Vec<usize> {
    let mut graph: DiGraph<&str, ()> = DiGraph::with_capacity(ids.len(), connections.len());
    let mut indices: HashMap<&str, NodeIndex> = HashMap::with_capacity(ids.len());
    for &id in ids {
        indices.entry(id).or_insert_with(|| graph.add_node(id));
    }
    for connection in connections {
        let (Some(&from), Some(&to)) = (indices.get(connection.from()), indices.get(connection.to()))
        else {
            continue;
        };
        if from != to {
            graph.update_edge(from, to, ());
        }
    }

    let layers = longest_path_layers(&graph).unwrap_or_else(|| {
        warn!(nodes = graph.node_count(); "Connections contain a cycle, layering in input order");
        input_order_layers(&graph)
    });
    trace!(layers:? = layers; "Layers assigned");

    ids.iter()
        .map(|id| indices.get(id).map_or(0, |index| layers[index.index()]))
        .collect()
}

fn longest_path_layers(graph: &DiGraph<&str, ()>) -> Option<Vec<usize>> {
    let mut indegree: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.neighbors_directed(node, Direction::Incoming).count())
        .collect();
    let mut layers = vec![0; graph.node_count()];
    let mut queue: VecDeque<NodeIndex> = graph
        .node_indices()
        .filter(|node| indegree[node.index()] == 0)
        .collect();

    let mut processed = 0;
    while let Some(node) = queue.pop_front() {
        processed += 1;
        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            layers[next.index()] = layers[next.index()].max(layers[node.index()] + 1);
            indegree[next.index()] -= 1;
            if indegree[next.index()] == 0 {
                queue.push_back(next);
            }
        }
    }

    (processed == graph.node_count()).then_some(layers)
}

fn input_order_layers(graph: &DiGraph<&str, ()>) -> Vec<usize> {
    let mut layers = vec![0; graph.node_count()];
    for node in graph.node_indices() {
        let layer = graph
            .neighbors_directed(node, Direction::Incoming)
            .filter(|predecessor| predecessor.index() < node.index())
            .map(|predecessor| layers[predecessor.index()] + 1)
            .max()
            .unwrap_or(0);
        layers[node.index()] = layer;
    }
    layers
}

/// Calculate the left edge of each layer based on widths and spacing
fn calculate_layer_x_positions(layer_widths: &[f32], spacing: f32) -> Vec<f32> {
    let mut layer_x_positions = Vec::with_capacity(layer_widths.len());
    let mut x_pos = 0.0;

    for width in layer_widths {
        layer_x_positions.push(x_pos);
        x_pos += width + spacing;
    }

    layer_x_positions
}

fn stacked_height(sizes: impl Iterator<Item = Size>, config: &LayoutConfig) -> f32 {
    let (total, count) = sizes.fold((0.0_f32, 0_usize), |(total, count), size| {
        (total + size.height(), count + 1)
    });
    total + config.sibling_spacing() * count.saturating_sub(1) as f32
}
