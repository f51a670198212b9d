//! Layout engine: computes a concrete position and size for every node.
//!
//! Exactly one strategy runs per architecture, chosen in priority order:
//!
//! 1. [`Strategy::Manual`] when any service carries an explicit layout hint
//! 2. [`Strategy::Grouped`] when the architecture has groups
//! 3. [`Strategy::Flow`] when it has connections
//! 4. [`Strategy::Grid`] otherwise
//!
//! All positions are absolute top-left corners. Automatic strategies shift
//! the whole drawing so no node starts above or left of the configured
//! minimum offset; manual coordinates are kept verbatim.

mod flow;
mod grid;
mod grouped;
mod manual;

use indexmap::IndexMap;
use log::debug;

use cirrus_core::{
    architecture::ParsedArchitecture,
    geometry::{Bounds, Point, Size},
    group::Group,
    service::ServiceDescriptor,
};

use crate::config::LayoutConfig;

/// The placement strategy chosen for an architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Manual,
    Grouped,
    Flow,
    Grid,
}

/// Whether a placement belongs to a group or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Service,
}

/// The computed box of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    bounds: Bounds,
    parent_id: Option<String>,
    kind: NodeKind,
}

impl Placement {
    fn new(bounds: Bounds, parent_id: Option<&str>, kind: NodeKind) -> Self {
        Self {
            bounds,
            parent_id: parent_id.map(str::to_string),
            kind,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Absolute top-left corner.
    pub fn position(&self) -> Point {
        self.bounds.min_point()
    }

    pub fn size(&self) -> Size {
        self.bounds.to_size()
    }

    /// The group this node is drawn inside, if any.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }
}

/// Positions for every service and group of one architecture.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    strategy: Strategy,
    placements: IndexMap<String, Placement>,
}

impl LayoutResult {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn get(&self, id: &str) -> Option<&Placement> {
        self.placements.get(id)
    }

    /// Absolute top-left corner of the node `id`.
    pub fn position(&self, id: &str) -> Option<Point> {
        self.get(id).map(Placement::position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Placement)> {
        self.placements
            .iter()
            .map(|(id, placement)| (id.as_str(), placement))
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// The box enclosing every node, or `None` for an empty layout.
    pub fn extent(&self) -> Option<Bounds> {
        extent(&self.placements)
    }
}

/// Computes layouts with a fixed set of spacing constants.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Picks the strategy [`LayoutEngine::compute`] will use for `arch`.
    pub fn select_strategy(&self, arch: &ParsedArchitecture) -> Strategy {
        if arch.has_service_hints() {
            Strategy::Manual
        } else if !arch.groups().is_empty() {
            Strategy::Grouped
        } else if !arch.connections().is_empty() {
            Strategy::Flow
        } else {
            Strategy::Grid
        }
    }

    /// Lays out `arch`. Every service and group receives exactly one placement.
    pub fn compute(&self, arch: &ParsedArchitecture) -> LayoutResult {
        let strategy = self.select_strategy(arch);
        let mut placements = match strategy {
            Strategy::Manual => manual::layout(arch, &self.config),
            Strategy::Grouped => grouped::layout(arch, &self.config),
            Strategy::Flow => self.flat(arch, flow_arrange),
            Strategy::Grid => self.flat(arch, grid_arrange),
        };
        if strategy != Strategy::Manual {
            enforce_min_offset(&mut placements, self.config.min_offset());
        }

        debug!(
            strategy:? = strategy,
            mode = arch.layout_mode().as_str(),
            nodes = placements.len();
            "Layout computed"
        );
        LayoutResult {
            strategy,
            placements,
        }
    }

    /// Places ungrouped services with `arrange`, which returns one position per node.
    fn flat(
        &self,
        arch: &ParsedArchitecture,
        arrange: fn(&ParsedArchitecture, &[flow::FlowNode<'_>], &LayoutConfig) -> Vec<Point>,
    ) -> IndexMap<String, Placement> {
        let nodes: Vec<_> = arch
            .services()
            .iter()
            .map(|service| flow::FlowNode::new(service.id(), service_size(service, &self.config)))
            .collect();
        let positions = arrange(arch, &nodes, &self.config);

        nodes
            .iter()
            .zip(positions)
            .map(|(node, position)| {
                let bounds = Bounds::new_from_top_left(position, node.size());
                (
                    node.id().to_string(),
                    Placement::new(bounds, None, NodeKind::Service),
                )
            })
            .collect()
    }
}

fn flow_arrange(
    arch: &ParsedArchitecture,
    nodes: &[flow::FlowNode<'_>],
    config: &LayoutConfig,
) -> Vec<Point> {
    flow::arrange(nodes, arch.connections(), Point::default(), config)
}

fn grid_arrange(
    _arch: &ParsedArchitecture,
    nodes: &[flow::FlowNode<'_>],
    config: &LayoutConfig,
) -> Vec<Point> {
    let sizes: Vec<Size> = nodes.iter().map(flow::FlowNode::size).collect();
    grid::arrange(&sizes, Point::default(), config.sibling_spacing())
}

/// The drawn size of a service: its hinted size, else the configured default.
fn service_size(service: &ServiceDescriptor, config: &LayoutConfig) -> Size {
    service
        .layout_hint()
        .map_or(config.service_size(), |hint| hint.size_or(config.service_size()))
}

/// The group `service_id` is drawn inside.
fn service_parent<'a>(arch: &'a ParsedArchitecture, service_id: &str) -> Option<&'a str> {
    arch.group_of_service(service_id).map(Group::id)
}

fn extent(placements: &IndexMap<String, Placement>) -> Option<Bounds> {
    placements
        .values()
        .map(Placement::bounds)
        .reduce(|acc, bounds| acc.merge(&bounds))
}

/// Shifts every node so the drawing starts at least `min_offset` from the origin.
fn enforce_min_offset(placements: &mut IndexMap<String, Placement>, min_offset: f32) {
    let Some(extent) = extent(placements) else {
        return;
    };
    let shift = Point::new(
        (min_offset - extent.min_x()).max(0.0),
        (min_offset - extent.min_y()).max(0.0),
    );
    if shift.is_zero() {
        return;
    }
    for placement in placements.values_mut() {
        placement.bounds = placement.bounds.translate(shift);
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use cirrus_core::{
        architecture::{Connection, LayoutMode},
        group::GroupType,
        provider::Provider,
        service::LayoutHint,
    };

    use super::*;

    fn service(id: &str) -> ServiceDescriptor {
        ServiceDescriptor::new(id, id.to_uppercase(), Provider::Generic)
    }

    fn arch(
        services: Vec<ServiceDescriptor>,
        connections: Vec<Connection>,
        groups: Vec<Group>,
    ) -> ParsedArchitecture {
        ParsedArchitecture::new(services, connections, groups, LayoutMode::Horizontal)
    }

    #[test]
    fn test_strategy_priority() {
        let engine = LayoutEngine::default();
        let hinted = service("a").with_layout_hint(Some(LayoutHint::new(0.0, 0.0)));
        let grouped = vec![Group::new("g", "G", GroupType::ResourceGroup)];
        let connected = vec![Connection::new("a", "b")];

        let manual = arch(vec![hinted, service("b")], connected.clone(), grouped.clone());
        let with_groups = arch(vec![service("a"), service("b")], connected.clone(), grouped);
        let flat = arch(vec![service("a"), service("b")], connected, vec![]);
        let bare = arch(vec![service("a")], vec![], vec![]);

        assert_eq!(engine.select_strategy(&manual), Strategy::Manual);
        assert_eq!(engine.select_strategy(&with_groups), Strategy::Grouped);
        assert_eq!(engine.select_strategy(&flat), Strategy::Flow);
        assert_eq!(engine.select_strategy(&bare), Strategy::Grid);
    }

    #[test]
    fn test_flow_layers_left_to_right() {
        let engine = LayoutEngine::default();
        let result = engine.compute(&arch(
            vec![service("fn"), service("db")],
            vec![Connection::new("fn", "db")],
            vec![],
        ));

        let source = result.position("fn").unwrap();
        let target = result.position("db").unwrap();
        assert_eq!(result.strategy(), Strategy::Flow);
        assert!(target.x() > source.x());
        assert_approx_eq!(f32, source.y(), target.y());
        assert_approx_eq!(f32, source.x(), 40.0);
        assert_approx_eq!(f32, target.x(), 40.0 + 160.0 + 100.0);
    }

    #[test]
    fn test_min_offset_applied_to_automatic_layouts() {
        let result = LayoutEngine::default().compute(&arch(vec![service("a")], vec![], vec![]));

        let extent = result.extent().unwrap();
        assert_approx_eq!(f32, extent.min_x(), 40.0);
        assert_approx_eq!(f32, extent.min_y(), 40.0);
    }

    #[test]
    fn test_manual_coordinates_verbatim() {
        let hinted = service("a").with_layout_hint(Some(
            LayoutHint::new(5.0, 7.0).with_dimensions(Some(200.0), None),
        ));
        let result = LayoutEngine::default().compute(&arch(vec![hinted], vec![], vec![]));

        let placement = result.get("a").unwrap();
        assert_eq!(placement.position(), Point::new(5.0, 7.0));
        assert_eq!(placement.size(), Size::new(200.0, 80.0));
    }

    #[test]
    fn test_every_node_placed() {
        let groups = vec![
            Group::new("rg", "RG", GroupType::ResourceGroup).with_members(vec!["a".into()]),
            Group::new("empty", "Empty", GroupType::Subnet),
        ];
        let result = LayoutEngine::default().compute(&arch(
            vec![service("a"), service("b")],
            vec![],
            groups,
        ));

        assert_eq!(result.len(), 4);
        assert_eq!(result.get("a").unwrap().parent_id(), Some("rg"));
        assert_eq!(result.get("b").unwrap().parent_id(), None);
        assert_eq!(result.get("rg").unwrap().kind(), NodeKind::Group);
    }

    #[test]
    fn test_empty_architecture() {
        let result = LayoutEngine::default().compute(&ParsedArchitecture::default());

        assert!(result.is_empty());
        assert!(result.extent().is_none());
    }

    mod proptest_tests {
        use std::collections::HashMap;

        use proptest::{prelude::*, strategy::Strategy, test_runner::TestCaseError};

        use super::*;
        use crate::containment::{ContainmentBuilder, GroupDeclaration};

        const SERVICES: usize = 6;

        fn mode_strategy() -> impl Strategy<Value = LayoutMode> {
            prop::sample::select(vec![
                LayoutMode::Horizontal,
                LayoutMode::Vertical,
                LayoutMode::Grid,
            ])
        }

        fn architecture_strategy() -> impl Strategy<Value = ParsedArchitecture> {
            let groups = prop::collection::vec(
                (
                    prop::sample::select(GroupType::ALL.to_vec()),
                    prop::option::of(0usize..6),
                    prop::collection::vec(0usize..SERVICES, 0..3),
                ),
                0..6,
            );
            let connections =
                prop::collection::vec((0usize..SERVICES, 0usize..SERVICES), 0..8);

            (groups, connections, mode_strategy()).prop_map(|(groups, connections, mode)| {
                let declarations = groups
                    .into_iter()
                    .enumerate()
                    .map(|(index, (group_type, parent, members))| {
                        GroupDeclaration::new(format!("g{index}"), format!("G{index}"), group_type)
                            .with_parent_id(parent.map(|parent| format!("g{parent}")))
                            .with_members(members.iter().map(|m| format!("s{m}")).collect())
                    })
                    .collect();
                let connections: Vec<_> = connections
                    .into_iter()
                    .filter(|(from, to)| from != to)
                    .map(|(from, to)| Connection::new(format!("s{from}"), format!("s{to}")))
                    .collect();
                let services = (0..SERVICES).map(|index| service(&format!("s{index}"))).collect();

                let (services, groups) = ContainmentBuilder::new(services)
                    .with_declarations(declarations)
                    .with_connections(&connections)
                    .build()
                    .into_parts();
                ParsedArchitecture::new(services, connections, groups, mode)
            })
        }

        fn hint_strategy() -> impl Strategy<Value = LayoutHint> {
            (
                -400.0f32..400.0,
                -400.0f32..400.0,
                prop::option::of(100.0f32..600.0),
                prop::option::of(80.0f32..400.0),
            )
                .prop_map(|(x, y, width, height)| {
                    LayoutHint::new(x, y).with_dimensions(width, height)
                })
        }

        /// Hints ungrouped services and leaf groups, so every hinted node's
        /// ancestors are unhinted and explicit coordinates never contradict
        /// the hierarchy. One ungrouped service is always hinted.
        fn manual_architecture_strategy() -> impl Strategy<Value = ParsedArchitecture> {
            (
                architecture_strategy(),
                prop::collection::vec(prop::option::of(hint_strategy()), SERVICES),
                prop::collection::vec(prop::option::of(hint_strategy()), 6),
                hint_strategy(),
            )
                .prop_map(|(arch, service_hints, group_hints, pin)| {
                    let mut services: Vec<_> = arch
                        .services()
                        .iter()
                        .zip(service_hints)
                        .map(|(service, hint)| {
                            let grouped = arch.group_of_service(service.id()).is_some();
                            service.clone().with_layout_hint(hint.filter(|_| !grouped))
                        })
                        .collect();
                    services.push(super::service("pin").with_layout_hint(Some(pin)));

                    let hints = arch
                        .groups()
                        .iter()
                        .zip(group_hints)
                        .filter(|(group, _)| arch.child_groups(group.id()).next().is_none())
                        .filter_map(|(group, hint)| Some((group.id().to_string(), hint?)))
                        .collect();

                    ParsedArchitecture::new(
                        services,
                        arch.connections().to_vec(),
                        arch.groups().to_vec(),
                        LayoutMode::Manual,
                    )
                    .with_layout_hints(hints)
                })
        }

        fn check_every_node_placed(
            arch: &ParsedArchitecture,
            result: &LayoutResult,
        ) -> Result<(), TestCaseError> {
            for id in arch
                .services()
                .iter()
                .map(ServiceDescriptor::id)
                .chain(arch.groups().iter().map(Group::id))
            {
                prop_assert!(result.get(id).is_some(), "{} not placed", id);
            }
            prop_assert_eq!(result.len(), arch.services().len() + arch.groups().len());
            Ok(())
        }

        fn check_siblings_disjoint(result: &LayoutResult) -> Result<(), TestCaseError> {
            let mut siblings: HashMap<Option<&str>, Vec<(&str, Bounds)>> = HashMap::new();
            for (id, placement) in result.iter() {
                siblings
                    .entry(placement.parent_id())
                    .or_default()
                    .push((id, placement.bounds()));
            }

            for nodes in siblings.values() {
                for (index, (a, a_bounds)) in nodes.iter().enumerate() {
                    for (b, b_bounds) in &nodes[index + 1..] {
                        prop_assert!(!a_bounds.intersects(b_bounds), "{} overlaps {}", a, b);
                    }
                }
            }
            Ok(())
        }

        fn check_children_inside_parents(result: &LayoutResult) -> Result<(), TestCaseError> {
            for (id, placement) in result.iter() {
                let Some(parent) = placement.parent_id() else {
                    continue;
                };
                let parent_bounds = result.get(parent).map(Placement::bounds);
                prop_assert!(parent_bounds.is_some(), "{} has unplaced parent {}", id, parent);
                if let Some(parent_bounds) = parent_bounds {
                    prop_assert!(
                        parent_bounds.inflate(0.01).contains(&placement.bounds()),
                        "{} escapes {}",
                        id,
                        parent
                    );
                }
            }
            Ok(())
        }

        fn check_min_offset(result: &LayoutResult) -> Result<(), TestCaseError> {
            if let Some(extent) = result.extent() {
                prop_assert!(extent.min_x() >= 40.0 - 0.01);
                prop_assert!(extent.min_y() >= 40.0 - 0.01);
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn layout_invariants(arch in architecture_strategy()) {
                let result = LayoutEngine::default().compute(&arch);

                check_every_node_placed(&arch, &result)?;
                check_siblings_disjoint(&result)?;
                check_children_inside_parents(&result)?;
                check_min_offset(&result)?;
            }

            #[test]
            fn manual_layout_invariants(arch in manual_architecture_strategy()) {
                let result = LayoutEngine::default().compute(&arch);

                prop_assert_eq!(result.strategy(), super::super::Strategy::Manual);
                check_every_node_placed(&arch, &result)?;
                check_children_inside_parents(&result)?;
            }
        }
    }
}
