//! Placement that honors explicit coordinates.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, warn};

use cirrus_core::{
    architecture::ParsedArchitecture,
    geometry::{Bounds, Point, Size},
    group::Group,
    service::LayoutHint,
};

use super::{NodeKind, Placement, extent, grid, service_parent, service_size};
use crate::config::LayoutConfig;

/// A node still waiting for a grid slot: id, size, kind and parent group.
type Pending<'a> = (&'a str, Size, NodeKind, Option<&'a str>);

/// The nearest hinted group an unhinted node is drawn inside.
struct Host<'a> {
    id: &'a str,
    area: Bounds,
    /// Unhinted groups between the node and the host.
    depth: usize,
}

/// Hinted nodes keep their coordinates. Unhinted services and empty unhinted
/// groups fill a grid inside their nearest hinted ancestor group, below its
/// hinted content, or a grid below the lowest hinted node when no ancestor is
/// hinted. Hinted groups keep their top-left corner and grow right and down
/// only to hold their contents; other groups enclose their contents.
pub(super) fn layout(
    arch: &ParsedArchitecture,
    config: &LayoutConfig,
) -> IndexMap<String, Placement> {
    let mut placements = IndexMap::new();
    let mut hinted: Option<Bounds> = None;
    let mut hinted_content: HashMap<&str, Bounds> = HashMap::new();

    for service in arch.services() {
        let Some(hint) = service.layout_hint() else {
            continue;
        };
        let bounds = Bounds::new_from_top_left(hint.position(), service_size(service, config));
        let parent = service_parent(arch, service.id());
        hinted = Some(merge(hinted, bounds));
        if let Some(host) = host(arch, config, parent) {
            let content = merge(hinted_content.get(host.id).copied(), bounds);
            hinted_content.insert(host.id, content);
        }
        placements.insert(
            service.id().to_string(),
            Placement::new(bounds, parent, NodeKind::Service),
        );
    }
    for group in arch.groups() {
        if let Some(hint) = arch.group_hint(group.id()) {
            let bounds = hint_area(hint, config);
            hinted = Some(merge(hinted, bounds));
            if let Some(host) = host(arch, config, group_parent(arch, group)) {
                let content = merge(hinted_content.get(host.id).copied(), bounds);
                hinted_content.insert(host.id, content);
            }
        }
    }

    let pending = arch
        .services()
        .iter()
        .filter(|service| service.layout_hint().is_none())
        .map(|service| {
            (
                service.id(),
                service_size(service, config),
                NodeKind::Service,
                service_parent(arch, service.id()),
            )
        })
        .chain(
            arch.groups()
                .iter()
                .filter(|group| is_empty_unhinted(arch, group))
                .map(|group| {
                    (
                        group.id(),
                        config.min_group_size(),
                        NodeKind::Group,
                        group_parent(arch, group),
                    )
                }),
        );

    let mut unhosted: Vec<Pending<'_>> = Vec::new();
    let mut hosted: IndexMap<&str, (Bounds, usize, Vec<Pending<'_>>)> = IndexMap::new();
    for item in pending {
        match host(arch, config, item.3) {
            Some(host) => {
                let (_, depth, items) =
                    hosted.entry(host.id).or_insert((host.area, 0, Vec::new()));
                *depth = (*depth).max(host.depth);
                items.push(item);
            }
            None => unhosted.push(item),
        }
    }

    for (id, (area, depth, items)) in &hosted {
        let origin = content_origin(*area, hinted_content.get(id).copied(), *depth, config);
        place_in_grid(&mut placements, items, origin, config);
        debug!(group = *id, nodes = items.len(); "Unhinted members placed inside hinted group");
    }

    // Hosted grids may push their hosts down; the free grid starts below them.
    let deepest = hosted.values().map(|&(_, depth, _)| depth + 1).max().unwrap_or(0);
    let occupied = extent(&placements).map_or(hinted, |extent| Some(merge(hinted, extent)));
    let origin = occupied.map_or(Point::default(), |extent| {
        Point::new(
            extent.min_x(),
            extent.max_y() + config.group_spacing() + config.group_padding() * deepest as f32,
        )
    });
    place_in_grid(&mut placements, &unhosted, origin, config);
    debug!(unhinted = unhosted.len(); "Unhinted nodes placed in grid");

    for group in arch.groups() {
        group_bounds(arch, config, group, &mut placements, &mut HashSet::new());
    }

    // Only groups caught in a parent cycle are still missing.
    let missing: Vec<Pending<'_>> = arch
        .groups()
        .iter()
        .filter(|group| !placements.contains_key(group.id()))
        .map(|group| (group.id(), config.min_group_size(), NodeKind::Group, None))
        .collect();
    if !missing.is_empty() {
        warn!(groups = missing.len(); "Groups without resolvable bounds placed in grid");
        let origin = extent(&placements).map_or(Point::default(), |extent| {
            Point::new(extent.min_x(), extent.max_y() + config.group_spacing())
        });
        place_in_grid(&mut placements, &missing, origin, config);
    }

    placements
}

fn place_in_grid(
    placements: &mut IndexMap<String, Placement>,
    items: &[Pending<'_>],
    origin: Point,
    config: &LayoutConfig,
) {
    let sizes: Vec<Size> = items.iter().map(|&(_, size, _, _)| size).collect();
    let positions = grid::arrange(&sizes, origin, config.sibling_spacing());
    for (&(id, size, kind, parent), position) in items.iter().zip(positions) {
        placements.insert(
            id.to_string(),
            Placement::new(Bounds::new_from_top_left(position, size), parent, kind),
        );
    }
}

/// Walks up from `group` to the first group with an explicit hint.
fn host<'a>(
    arch: &'a ParsedArchitecture,
    config: &LayoutConfig,
    group: Option<&'a str>,
) -> Option<Host<'a>> {
    let mut seen = HashSet::new();
    let mut depth = 0;
    let mut current = group.and_then(|id| arch.group(id));

    while let Some(group) = current {
        if !seen.insert(group.id()) {
            return None;
        }
        if let Some(hint) = arch.group_hint(group.id()) {
            return Some(Host {
                id: group.id(),
                area: hint_area(hint, config),
                depth,
            });
        }
        depth += 1;
        current = group.parent_id().and_then(|parent| arch.group(parent));
    }
    None
}

/// Top-left of the grid for unhinted nodes inside a hinted group.
///
/// The inset leaves room for the header and padding of each unhinted group
/// nested between the grid and the host.
fn content_origin(
    area: Bounds,
    hinted_content: Option<Bounds>,
    depth: usize,
    config: &LayoutConfig,
) -> Point {
    let levels = depth as f32;
    let x = area.min_x() + config.group_padding() * (levels + 1.0);
    let top = area.min_y() + config.group_header() * (levels + 1.0);
    let y = hinted_content.map_or(top, |content| {
        top.max(content.max_y() + config.sibling_spacing() + config.group_header() * levels)
    });
    Point::new(x, y)
}

/// Returns the box of `group`, deriving it from its contents when it has no hint.
fn group_bounds<'a>(
    arch: &'a ParsedArchitecture,
    config: &LayoutConfig,
    group: &'a Group,
    placements: &mut IndexMap<String, Placement>,
    visiting: &mut HashSet<&'a str>,
) -> Option<Bounds> {
    if let Some(placement) = placements.get(group.id()) {
        return Some(placement.bounds());
    }
    if !visiting.insert(group.id()) {
        warn!(group = group.id(); "Group hierarchy cycle, bounds left unresolved");
        return None;
    }

    let mut content: Option<Bounds> = group
        .members()
        .iter()
        .filter_map(|member| placements.get(member.as_str()))
        .map(Placement::bounds)
        .reduce(|acc, bounds| acc.merge(&bounds));
    for child in arch.child_groups(group.id()) {
        if let Some(child) = group_bounds(arch, config, child, placements, visiting) {
            content = Some(merge(content, child));
        }
    }
    let bounds = match arch.group_hint(group.id()) {
        Some(hint) => {
            let area = hint_area(hint, config);
            Some(content.map_or(area, |content| grow(area, content, config)))
        }
        None => content.map(|content| frame(content, config)),
    };

    visiting.remove(group.id());
    if let Some(bounds) = bounds {
        placements.insert(
            group.id().to_string(),
            Placement::new(bounds, group_parent(arch, group), NodeKind::Group),
        );
    }
    bounds
}

fn hint_area(hint: &LayoutHint, config: &LayoutConfig) -> Bounds {
    Bounds::new_from_top_left(hint.position(), hint.size_or(config.min_group_size()))
}

/// Extends `area` right and down until it holds `content` with padding.
fn grow(area: Bounds, content: Bounds, config: &LayoutConfig) -> Bounds {
    let needed = Size::new(
        content.max_x() + config.group_padding() - area.min_x(),
        content.max_y() + config.group_padding() - area.min_y(),
    );
    let size = area.to_size().max(needed);
    if size != area.to_size() {
        debug!(width = size.width(), height = size.height(); "Hinted group grown to hold its contents");
    }
    Bounds::new_from_top_left(area.min_point(), size)
}

fn merge(acc: Option<Bounds>, bounds: Bounds) -> Bounds {
    acc.map_or(bounds, |acc| acc.merge(&bounds))
}

/// Surrounds `content` with padding and a header, keeping the minimum group size.
fn frame(content: Bounds, config: &LayoutConfig) -> Bounds {
    let top_left = Point::new(
        content.min_x() - config.group_padding(),
        content.min_y() - config.group_header(),
    );
    let size = content
        .to_size()
        .expand(
            2.0 * config.group_padding(),
            config.group_header() + config.group_padding(),
        )
        .max(config.min_group_size());
    Bounds::new_from_top_left(top_left, size)
}

fn is_empty_unhinted(arch: &ParsedArchitecture, group: &Group) -> bool {
    arch.group_hint(group.id()).is_none()
        && group.members().iter().all(|member| arch.service(member).is_none())
        && arch.child_groups(group.id()).next().is_none()
}

fn group_parent<'a>(arch: &'a ParsedArchitecture, group: &Group) -> Option<&'a str> {
    group
        .parent_id()
        .and_then(|parent| arch.group(parent))
        .map(Group::id)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use cirrus_core::{
        architecture::LayoutMode, group::GroupType, provider::Provider,
        service::ServiceDescriptor,
    };

    use super::*;

    fn hinted(id: &str, x: f32, y: f32) -> ServiceDescriptor {
        ServiceDescriptor::new(id, id, Provider::Generic)
            .with_layout_hint(Some(LayoutHint::new(x, y)))
    }

    fn plain(id: &str) -> ServiceDescriptor {
        ServiceDescriptor::new(id, id, Provider::Generic)
    }

    #[test]
    fn test_unhinted_services_below_hinted() {
        let arch = ParsedArchitecture::new(
            vec![hinted("a", 100.0, 50.0), plain("b"), hinted("c", 400.0, 300.0)],
            vec![],
            vec![],
            LayoutMode::Manual,
        );

        let placements = layout(&arch, &LayoutConfig::default());

        assert_eq!(placements["a"].position(), Point::new(100.0, 50.0));
        assert_eq!(placements["c"].position(), Point::new(400.0, 300.0));
        // Lowest hinted bottom is 300 + 80.
        assert_eq!(placements["b"].position(), Point::new(100.0, 380.0 + 48.0));
    }

    #[test]
    fn test_group_encloses_contents() {
        let arch = ParsedArchitecture::new(
            vec![hinted("a", 100.0, 100.0), hinted("b", 400.0, 100.0)],
            vec![],
            vec![
                Group::new("rg", "RG", GroupType::ResourceGroup)
                    .with_members(vec!["a".into(), "b".into()]),
                Group::new("sub", "Sub", GroupType::Subscription),
                Group::new("inner", "Inner", GroupType::Subnet)
                    .with_parent_id(Some("rg".into())),
            ],
            LayoutMode::Manual,
        );

        let placements = layout(&arch, &LayoutConfig::default());

        let rg = placements["rg"].bounds();
        assert!(rg.contains(&placements["a"].bounds()));
        assert!(rg.contains(&placements["b"].bounds()));
        assert!(rg.contains(&placements["inner"].bounds()));
        assert_eq!(placements["inner"].parent_id(), Some("rg"));
        assert_eq!(placements["a"].parent_id(), Some("rg"));
        assert_eq!(placements["sub"].size(), Size::new(220.0, 120.0));
    }

    #[test]
    fn test_group_hint_used_verbatim() {
        let arch = ParsedArchitecture::new(
            vec![hinted("a", 10.0, 10.0)],
            vec![],
            vec![Group::new("rg", "RG", GroupType::ResourceGroup).with_members(vec!["a".into()])],
            LayoutMode::Manual,
        )
        .with_layout_hints(
            [(
                "rg".to_string(),
                LayoutHint::new(0.0, -20.0).with_dimensions(Some(500.0), Some(300.0)),
            )]
            .into(),
        );

        let placements = layout(&arch, &LayoutConfig::default());

        let rg = placements["rg"].bounds();
        assert_approx_eq!(f32, rg.min_y(), -20.0);
        assert_approx_eq!(f32, rg.width(), 500.0);
        assert_approx_eq!(f32, rg.height(), 300.0);
    }

    fn hinted_group(width: f32, height: f32) -> ParsedArchitecture {
        ParsedArchitecture::new(
            vec![hinted("fn", 20.0, 40.0), plain("db")],
            vec![],
            vec![
                Group::new("rg", "RG", GroupType::ResourceGroup)
                    .with_members(vec!["fn".into(), "db".into()]),
            ],
            LayoutMode::Manual,
        )
        .with_layout_hints(
            [(
                "rg".to_string(),
                LayoutHint::new(0.0, 0.0).with_dimensions(Some(width), Some(height)),
            )]
            .into(),
        )
    }

    #[test]
    fn test_unhinted_member_placed_inside_hinted_group() {
        let placements = layout(&hinted_group(600.0, 400.0), &LayoutConfig::default());

        let rg = placements["rg"].bounds();
        let db = &placements["db"];
        assert_eq!(db.parent_id(), Some("rg"));
        // Below fn (bottom 120) plus sibling spacing, inset by the padding.
        assert_eq!(db.position(), Point::new(24.0, 160.0));
        assert!(rg.contains(&db.bounds()));
        assert_eq!(rg.min_point(), Point::new(0.0, 0.0));
        assert_eq!(rg.to_size(), Size::new(600.0, 400.0));
    }

    #[test]
    fn test_hinted_group_grows_down_to_hold_members() {
        let placements = layout(&hinted_group(400.0, 200.0), &LayoutConfig::default());

        let rg = placements["rg"].bounds();
        let db = placements["db"].bounds();
        assert!(rg.contains(&db));
        assert!(rg.contains(&placements["fn"].bounds()));
        assert_eq!(rg.min_point(), Point::new(0.0, 0.0));
        assert_approx_eq!(f32, rg.width(), 400.0);
        assert_approx_eq!(f32, rg.height(), 240.0 + 24.0);
    }

    #[test]
    fn test_free_grid_starts_below_grown_group() {
        let base = hinted_group(400.0, 200.0);
        let mut services = base.services().to_vec();
        services.push(plain("loose"));
        let arch = ParsedArchitecture::new(
            services,
            vec![],
            base.groups().to_vec(),
            LayoutMode::Manual,
        )
        .with_layout_hints(base.layout_hints().cloned().unwrap_or_default());

        let placements = layout(&arch, &LayoutConfig::default());

        let rg = placements["rg"].bounds();
        let loose = placements["loose"].bounds();
        assert_eq!(placements["loose"].parent_id(), None);
        assert!(!rg.intersects(&loose));
        assert!(loose.min_y() > rg.max_y());
    }

    #[test]
    fn test_frame_adds_padding_and_header() {
        let content = Bounds::new_from_top_left(Point::new(100.0, 100.0), Size::new(400.0, 200.0));

        let framed = frame(content, &LayoutConfig::default());

        assert_eq!(framed.min_point(), Point::new(76.0, 64.0));
        assert_eq!(framed.to_size(), Size::new(448.0, 260.0));
    }
}
