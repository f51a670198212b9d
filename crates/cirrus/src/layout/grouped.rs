//! Nested placement for architectures with groups.
//!
//! Layout runs in two passes. Measurement walks the hierarchy bottom-up: a
//! group's content is its direct services in a single row, above its child
//! groups stacked top to bottom, and the group adds padding and a header
//! around that content. Placement then walks top-down, centering the service
//! row and every child group horizontally inside the parent. Root groups tile
//! according to the layout mode, and services outside every group are laid
//! out as a flat graph below the roots.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, warn};

use cirrus_core::{
    architecture::{LayoutMode, ParsedArchitecture},
    geometry::{Bounds, Point, Size},
    group::Group,
    service::ServiceDescriptor,
};

use super::{NodeKind, Placement, flow, grid, service_parent, service_size};
use crate::config::LayoutConfig;

pub(super) fn layout(
    arch: &ParsedArchitecture,
    config: &LayoutConfig,
) -> IndexMap<String, Placement> {
    let mut layout = GroupedLayout::new(arch, config);

    let roots = layout.roots();
    let sizes: Vec<Size> = roots
        .iter()
        .map(|&root| layout.measure(root, &mut HashSet::new()))
        .collect();
    let positions = tile_roots(&sizes, arch.layout_mode(), config.group_spacing());
    for (&root, position) in roots.iter().zip(positions) {
        layout.place(root, position, None);
    }

    layout.place_leftovers();
    layout.placements
}

struct GroupedLayout<'a> {
    arch: &'a ParsedArchitecture,
    config: &'a LayoutConfig,
    sizes: HashMap<&'a str, Size>,
    placements: IndexMap<String, Placement>,
}

impl<'a> GroupedLayout<'a> {
    fn new(arch: &'a ParsedArchitecture, config: &'a LayoutConfig) -> Self {
        Self {
            arch,
            config,
            sizes: HashMap::new(),
            placements: IndexMap::new(),
        }
    }

    /// Root groups in declaration order, followed by any group no root reaches.
    fn roots(&self) -> Vec<&'a Group> {
        let arch = self.arch;
        let mut roots: Vec<&'a Group> = arch.root_groups().collect();
        let mut reached: HashSet<&'a str> = HashSet::new();
        for &root in &roots {
            mark_reachable(arch, root, &mut reached);
        }

        for group in arch.groups() {
            if !reached.contains(group.id()) {
                warn!(group = group.id(); "Group unreachable from any root, laid out as a root");
                mark_reachable(arch, group, &mut reached);
                roots.push(group);
            }
        }
        roots
    }

    /// Returns the footprint of `group`, measuring its subtree first.
    ///
    /// Re-entering a group that is still being measured yields the minimum
    /// group size instead of recursing.
    fn measure(&mut self, group: &'a Group, visiting: &mut HashSet<&'a str>) -> Size {
        if let Some(&size) = self.sizes.get(group.id()) {
            return size;
        }
        if !visiting.insert(group.id()) {
            warn!(group = group.id(); "Group hierarchy cycle during measurement, fallback size used");
            return self.config.min_group_size();
        }

        let arch = self.arch;
        let row = self.service_row_size(group);
        let mut stack: Option<Size> = None;
        for child in arch.child_groups(group.id()).collect::<Vec<_>>() {
            let child_size = self.measure(child, visiting);
            stack = Some(match stack {
                Some(stack) => stack
                    .expand(0.0, self.config.group_spacing())
                    .merge_vertical(child_size),
                None => child_size,
            });
        }
        let content = match (row, stack) {
            (Some(row), Some(stack)) => row
                .expand(0.0, self.config.group_spacing())
                .merge_vertical(stack),
            (Some(content), None) | (None, Some(content)) => content,
            (None, None) => Size::default(),
        };

        let mut size = content
            .expand(
                2.0 * self.config.group_padding(),
                self.config.group_header() + self.config.group_padding(),
            )
            .max(self.config.min_group_size());
        if let Some(hint) = self.arch.group_hint(group.id()) {
            size = size.max(hint.size_or(size));
        }

        visiting.remove(group.id());
        self.sizes.insert(group.id(), size);
        size
    }

    /// Places `group` at `top_left` and everything inside it.
    fn place(&mut self, group: &'a Group, top_left: Point, parent: Option<&str>) {
        if self.placements.contains_key(group.id()) {
            return;
        }
        let size = self
            .sizes
            .get(group.id())
            .copied()
            .unwrap_or_else(|| self.config.min_group_size());
        self.placements.insert(
            group.id().to_string(),
            Placement::new(Bounds::new_from_top_left(top_left, size), parent, NodeKind::Group),
        );

        let content_x = top_left.x() + self.config.group_padding();
        let content_width = size.width() - 2.0 * self.config.group_padding();
        let mut y = top_left.y() + self.config.group_header();

        if let Some(row) = self.service_row_size(group) {
            let mut x = content_x + (content_width - row.width()) / 2.0;
            for service in self.members(group) {
                let service_size = service_size(service, self.config);
                let bounds = Bounds::new_from_top_left(Point::new(x, y), service_size);
                self.placements
                    .entry(service.id().to_string())
                    .or_insert_with(|| Placement::new(bounds, Some(group.id()), NodeKind::Service));
                x += service_size.width() + self.config.sibling_spacing();
            }
            y += row.height() + self.config.group_spacing();
        }

        let arch = self.arch;
        for child in arch.child_groups(group.id()).collect::<Vec<_>>() {
            let child_size = self
                .sizes
                .get(child.id())
                .copied()
                .unwrap_or_else(|| self.config.min_group_size());
            let x = content_x + (content_width - child_size.width()) / 2.0;
            self.place(child, Point::new(x, y), Some(group.id()));
            y += child_size.height() + self.config.group_spacing();
        }
    }

    /// Lays out every service not yet placed below the lowest group.
    fn place_leftovers(&mut self) {
        let arch = self.arch;
        let leftovers: Vec<&'a ServiceDescriptor> = arch
            .services()
            .iter()
            .filter(|service| !self.placements.contains_key(service.id()))
            .collect();
        if leftovers.is_empty() {
            return;
        }

        let bottom = self
            .placements
            .values()
            .filter(|placement| placement.kind() == NodeKind::Group)
            .map(|placement| placement.bounds().max_y())
            .fold(0.0, f32::max);
        let origin = Point::new(0.0, bottom + self.config.group_spacing());

        let nodes: Vec<_> = leftovers
            .iter()
            .map(|&service| flow::FlowNode::new(service.id(), service_size(service, self.config)))
            .collect();
        let positions = flow::arrange(&nodes, arch.connections(), origin, self.config);
        debug!(services = leftovers.len(); "Ungrouped services placed below groups");

        for (service, position) in leftovers.into_iter().zip(positions) {
            let bounds =
                Bounds::new_from_top_left(position, service_size(service, self.config));
            self.placements.insert(
                service.id().to_string(),
                Placement::new(bounds, service_parent(arch, service.id()), NodeKind::Service),
            );
        }
    }

    fn members(&self, group: &Group) -> Vec<&'a ServiceDescriptor> {
        let arch = self.arch;
        group
            .members()
            .iter()
            .filter_map(|member| arch.service(member))
            .collect()
    }

    /// The footprint of the direct services of `group` in one row, if it has any.
    fn service_row_size(&self, group: &Group) -> Option<Size> {
        self.members(group)
            .into_iter()
            .map(|service| service_size(service, self.config))
            .reduce(|row, size| {
                row.expand(self.config.sibling_spacing(), 0.0)
                    .merge_horizontal(size)
            })
    }
}

fn mark_reachable<'a>(
    arch: &'a ParsedArchitecture,
    start: &'a Group,
    reached: &mut HashSet<&'a str>,
) {
    let mut stack = vec![start];
    while let Some(group) = stack.pop() {
        if reached.insert(group.id()) {
            stack.extend(arch.child_groups(group.id()));
        }
    }
}

/// Returns the top-left corner of every root group.
fn tile_roots(sizes: &[Size], mode: LayoutMode, spacing: f32) -> Vec<Point> {
    match mode {
        LayoutMode::Grid => grid::arrange(sizes, Point::default(), spacing),
        LayoutMode::Vertical => {
            let mut y = 0.0;
            sizes
                .iter()
                .map(|size| {
                    let position = Point::new(0.0, y);
                    y += size.height() + spacing;
                    position
                })
                .collect()
        }
        LayoutMode::Horizontal | LayoutMode::Manual => {
            let mut x = 0.0;
            sizes
                .iter()
                .map(|size| {
                    let position = Point::new(x, 0.0);
                    x += size.width() + spacing;
                    position
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use cirrus_core::{
        architecture::Connection, group::GroupType, provider::Provider, service::LayoutHint,
    };

    use super::*;

    fn service(id: &str) -> ServiceDescriptor {
        ServiceDescriptor::new(id, id, Provider::Generic)
    }

    fn group(id: &str, parent: Option<&str>, members: &[&str]) -> Group {
        Group::new(id, id, GroupType::ResourceGroup)
            .with_parent_id(parent.map(str::to_string))
            .with_members(members.iter().map(|m| m.to_string()).collect())
    }

    fn run(arch: &ParsedArchitecture) -> IndexMap<String, Placement> {
        layout(arch, &LayoutConfig::default())
    }

    #[test]
    fn test_group_measures_service_row() {
        let arch = ParsedArchitecture::new(
            vec![service("a"), service("b")],
            vec![],
            vec![group("rg", None, &["a", "b"])],
            LayoutMode::Horizontal,
        );

        let placements = run(&arch);

        // Row is 160 + 40 + 160 wide, 80 tall.
        let rg = placements["rg"].bounds();
        assert_approx_eq!(f32, rg.width(), 360.0 + 48.0);
        assert_approx_eq!(f32, rg.height(), 80.0 + 36.0 + 24.0);
        assert_eq!(placements["a"].position(), Point::new(24.0, 36.0));
        assert_eq!(placements["b"].position(), Point::new(224.0, 36.0));
    }

    #[test]
    fn test_empty_group_gets_minimum_size() {
        let arch = ParsedArchitecture::new(
            vec![],
            vec![],
            vec![group("rg", None, &[])],
            LayoutMode::Horizontal,
        );

        let placements = run(&arch);

        assert_eq!(placements["rg"].size(), Size::new(220.0, 120.0));
    }

    #[test]
    fn test_nested_groups_contained_and_centered() {
        let arch = ParsedArchitecture::new(
            vec![service("a"), service("b"), service("c")],
            vec![],
            vec![
                group("sub", None, &["c"]),
                group("rg", Some("sub"), &["a", "b"]),
            ],
            LayoutMode::Horizontal,
        );

        let placements = run(&arch);

        let sub = placements["sub"].bounds();
        let rg = placements["rg"].bounds();
        let c = placements["c"].bounds();
        assert!(sub.contains(&rg));
        assert!(sub.contains(&c));
        assert!(!rg.intersects(&c));
        assert!(c.max_y() <= rg.min_y());
        assert_approx_eq!(f32, rg.min_x() - sub.min_x(), sub.max_x() - rg.max_x());
        assert_eq!(placements["rg"].parent_id(), Some("sub"));
    }

    #[test]
    fn test_roots_tile_by_mode() {
        let groups = vec![group("one", None, &[]), group("two", None, &[])];
        let horizontal =
            ParsedArchitecture::new(vec![], vec![], groups.clone(), LayoutMode::Horizontal);
        let vertical = ParsedArchitecture::new(vec![], vec![], groups, LayoutMode::Vertical);

        let across = run(&horizontal);
        let down = run(&vertical);

        assert_eq!(across["two"].position(), Point::new(220.0 + 48.0, 0.0));
        assert_eq!(down["two"].position(), Point::new(0.0, 120.0 + 48.0));
    }

    #[test]
    fn test_leftovers_below_groups() {
        let arch = ParsedArchitecture::new(
            vec![service("a"), service("x"), service("y")],
            vec![Connection::new("x", "y")],
            vec![group("rg", None, &["a"])],
            LayoutMode::Horizontal,
        );

        let placements = run(&arch);

        let bottom = placements["rg"].bounds().max_y();
        let x = placements["x"].position();
        let y = placements["y"].position();
        assert!(x.y() >= bottom + 48.0);
        assert!(y.x() > x.x());
        assert_eq!(placements["x"].parent_id(), None);
    }

    #[test]
    fn test_group_hint_enlarges_group() {
        let arch = ParsedArchitecture::new(
            vec![service("a")],
            vec![],
            vec![group("rg", None, &["a"])],
            LayoutMode::Horizontal,
        )
        .with_layout_hints(
            [(
                "rg".to_string(),
                LayoutHint::new(0.0, 0.0).with_dimensions(Some(600.0), None),
            )]
            .into(),
        );

        let placements = run(&arch);

        assert_approx_eq!(f32, placements["rg"].size().width(), 600.0);
        assert_approx_eq!(f32, placements["a"].position().x(), 220.0);
    }

    #[test]
    fn test_cycle_remnant_still_placed() {
        let arch = ParsedArchitecture::new(
            vec![service("a")],
            vec![],
            vec![
                group("a-group", Some("b-group"), &["a"]),
                group("b-group", Some("a-group"), &[]),
            ],
            LayoutMode::Horizontal,
        );

        let placements = run(&arch);

        assert!(placements.contains_key("a-group"));
        assert!(placements.contains_key("b-group"));
        assert!(placements.contains_key("a"));
    }
}
