//! Containment building.
//!
//! [`ContainmentBuilder`] turns explicit group declarations and container-like
//! services into a consistent forest of [`Group`]s and assigns every leaf
//! service to at most one group. The build runs in fixed stages:
//!
//! 1. declared groups are instantiated; services whose title names a
//!    container ("Virtual Network", "Resource Group", ...) are promoted to
//!    groups that keep the service id,
//! 2. `members` entries naming groups become child links,
//! 3. invalid parents are dropped and cycles are broken,
//! 4. groups without a parent are attached through their type's fallback
//!    preference list,
//! 5. services are assigned by explicit claim, then by connectivity, then by
//!    the service fallback types.
//!
//! Nothing here fails: inconsistent input yields a flatter hierarchy and a
//! log record.

use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace, warn};
use serde_json::Value;

use cirrus_core::{
    architecture::Connection,
    group::{Group, GroupMetadata, GroupType},
    service::ServiceDescriptor,
};
use cirrus_parser::catalog::group_type_for_title;

/// A group as declared by the input, before containment building.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDeclaration {
    id: String,
    label: String,
    group_type: GroupType,
    members: Vec<String>,
    parent_id: Option<String>,
    metadata: Option<GroupMetadata>,
}

impl GroupDeclaration {
    pub fn new(id: impl Into<String>, label: impl Into<String>, group_type: GroupType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            group_type,
            members: Vec::new(),
            parent_id: None,
            metadata: None,
        }
    }

    /// Sets the declared members; entries may name services or groups.
    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }

    pub fn with_parent_id(mut self, parent_id: Option<String>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_metadata(mut self, metadata: Option<GroupMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// The outcome of containment building.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Containment {
    services: Vec<ServiceDescriptor>,
    groups: Vec<Group>,
}

impl Containment {
    /// The leaf services, with promoted containers removed.
    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn into_parts(self) -> (Vec<ServiceDescriptor>, Vec<Group>) {
        (self.services, self.groups)
    }
}

/// Working state of one group during the build.
#[derive(Debug)]
struct GroupNode {
    label: String,
    group_type: GroupType,
    parent: Option<String>,
    declared_members: Vec<String>,
    metadata: Option<GroupMetadata>,
    pinned_root: bool,
}

/// Builds the group forest and the service assignment.
///
/// # Examples
///
/// ```
/// # use cirrus::containment::{ContainmentBuilder, GroupDeclaration};
/// # use cirrus_core::{group::GroupType, provider::Provider, service::ServiceDescriptor};
/// let services = vec![ServiceDescriptor::new("api", "Payments API", Provider::Generic)];
/// let containment = ContainmentBuilder::new(services)
///     .with_declarations(vec![
///         GroupDeclaration::new("sub", "Production", GroupType::Subscription),
///         GroupDeclaration::new("rg", "Core", GroupType::ResourceGroup),
///     ])
///     .build();
///
/// let rg = &containment.groups()[1];
/// assert_eq!(rg.parent_id(), Some("sub"));
/// assert_eq!(rg.members(), ["api"]);
/// ```
#[derive(Debug, Default)]
pub struct ContainmentBuilder {
    services: Vec<ServiceDescriptor>,
    declarations: Vec<GroupDeclaration>,
    claims: Vec<(String, String)>,
    links: Vec<(String, String)>,
}

impl ContainmentBuilder {
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        Self {
            services,
            ..Self::default()
        }
    }

    pub fn with_declarations(mut self, declarations: Vec<GroupDeclaration>) -> Self {
        self.declarations = declarations;
        self
    }

    /// Adds explicit `(service id, group id)` membership claims.
    pub fn with_claims(mut self, claims: impl IntoIterator<Item = (String, String)>) -> Self {
        self.claims.extend(claims);
        self
    }

    /// Sets the connections used for connectivity-based assignment.
    pub fn with_connections(mut self, connections: &[Connection]) -> Self {
        self.links = connections
            .iter()
            .map(|connection| (connection.from().to_string(), connection.to().to_string()))
            .collect();
        self
    }

    pub fn build(self) -> Containment {
        let Self {
            services,
            declarations,
            mut claims,
            links,
        } = self;

        let mut nodes = instantiate_declared(declarations);
        let services = promote_containers(services, &mut nodes, &mut claims);
        let service_ids: HashSet<&str> = services.iter().map(ServiceDescriptor::id).collect();

        link_declared_members(&mut nodes, &service_ids, &mut claims);
        drop_invalid_parents(&mut nodes);
        break_cycles(&mut nodes);
        infer_parents(&mut nodes);

        let assignment = Assignment::new(&nodes, &services)
            .apply_claims(&claims)
            .apply_connectivity(&links)
            .apply_fallback();

        let groups = nodes
            .iter()
            .map(|(id, node)| {
                Group::new(id.clone(), node.label.clone(), node.group_type)
                    .with_members(assignment.members_of(id))
                    .with_parent_id(node.parent.clone())
                    .with_metadata(node.metadata.clone())
            })
            .collect::<Vec<_>>();

        debug!(
            services = services.len(),
            groups = groups.len(),
            ungrouped = services.len() - assignment.assigned.len();
            "Containment built"
        );

        Containment { services, groups }
    }
}

fn instantiate_declared(declarations: Vec<GroupDeclaration>) -> IndexMap<String, GroupNode> {
    let mut nodes = IndexMap::new();
    for declaration in declarations {
        if nodes.contains_key(&declaration.id) {
            warn!(group = declaration.id; "Duplicate group declaration ignored");
            continue;
        }
        nodes.insert(
            declaration.id,
            GroupNode {
                label: declaration.label,
                group_type: declaration.group_type,
                parent: declaration.parent_id,
                declared_members: declaration.members,
                metadata: declaration.metadata,
                pinned_root: false,
            },
        );
    }
    nodes
}

/// Moves container-like services into `nodes`, returning the leaf services.
///
/// A promoted service's own claims become its parent link.
fn promote_containers(
    services: Vec<ServiceDescriptor>,
    nodes: &mut IndexMap<String, GroupNode>,
    claims: &mut Vec<(String, String)>,
) -> Vec<ServiceDescriptor> {
    let mut leaves = Vec::with_capacity(services.len());

    for service in services {
        let Some(group_type) = group_type_for_title(service.title()) else {
            leaves.push(service);
            continue;
        };
        debug!(service = service.id(), group_type:% = group_type; "Service promoted to group");

        let claimed_parent = claims
            .iter()
            .find(|(member, group)| member == service.id() && group != service.id())
            .map(|(_, group)| group.clone());
        claims.retain(|(member, _)| member != service.id());

        let metadata = container_metadata(&service);
        match nodes.get_mut(service.id()) {
            Some(node) => {
                let existing = node.metadata.get_or_insert_with(GroupMetadata::new);
                for (key, value) in metadata {
                    existing.entry(key).or_insert(value);
                }
                if node.parent.is_none() {
                    node.parent = claimed_parent;
                }
            }
            None => {
                nodes.insert(
                    service.id().to_string(),
                    GroupNode {
                        label: service.title().to_string(),
                        group_type,
                        parent: claimed_parent,
                        declared_members: Vec::new(),
                        metadata: Some(metadata),
                        pinned_root: false,
                    },
                );
            }
        }
    }
    leaves
}

fn container_metadata(service: &ServiceDescriptor) -> GroupMetadata {
    let mut metadata = GroupMetadata::new();
    metadata.insert("provider".into(), Value::from(service.provider().as_str()));
    metadata.insert("iconRef".into(), Value::from(service.icon_ref()));
    metadata.insert("category".into(), Value::from(service.category()));
    metadata
}

/// Turns declared `members` into child links (for groups) and claims (for services).
fn link_declared_members(
    nodes: &mut IndexMap<String, GroupNode>,
    service_ids: &HashSet<&str>,
    claims: &mut Vec<(String, String)>,
) {
    let mut child_links = Vec::new();

    for (group_id, node) in nodes.iter_mut() {
        for member in std::mem::take(&mut node.declared_members) {
            if &member == group_id {
                continue;
            }
            if service_ids.contains(member.as_str()) {
                claims.push((member, group_id.clone()));
            } else {
                child_links.push((member, group_id.clone()));
            }
        }
    }

    for (child, parent) in child_links {
        match nodes.get_mut(&child) {
            Some(node) if node.parent.is_none() => node.parent = Some(parent),
            Some(_) => trace!(child, parent; "Member group already has a parent"),
            None => warn!(member = child, group = parent; "Unknown group member dropped"),
        }
    }
}

fn drop_invalid_parents(nodes: &mut IndexMap<String, GroupNode>) {
    let known: HashSet<String> = nodes.keys().cloned().collect();
    for (id, node) in nodes.iter_mut() {
        let Some(parent) = &node.parent else {
            continue;
        };
        if parent == id || !known.contains(parent) {
            warn!(group = id, parent; "Invalid parent reference dropped");
            node.parent = None;
        }
    }
}

/// Walks every parent chain with a visiting set and cuts the link closing a cycle.
fn break_cycles(nodes: &mut IndexMap<String, GroupNode>) {
    for index in 0..nodes.len() {
        let mut visiting: HashSet<usize> = HashSet::from([index]);
        let mut current = index;

        while let Some(parent_index) = nodes[current]
            .parent
            .as_deref()
            .and_then(|parent| nodes.get_index_of(parent))
        {
            if !visiting.insert(parent_index) {
                if let Some((id, node)) = nodes.get_index_mut(current) {
                    warn!(
                        group = id,
                        parent:? = node.parent;
                        "Group hierarchy cycle detected, group made a root"
                    );
                    node.parent = None;
                    node.pinned_root = true;
                }
                break;
            }
            current = parent_index;
        }
    }
}

/// Attaches parentless groups to the least-populated group of a preferred parent type.
fn infer_parents(nodes: &mut IndexMap<String, GroupNode>) {
    for index in 0..nodes.len() {
        if nodes[index].parent.is_some() || nodes[index].pinned_root {
            continue;
        }

        let preferences = nodes[index].group_type.parent_preferences();
        let chosen = preferences.iter().find_map(|preferred| {
            (0..nodes.len())
                .filter(|&candidate| {
                    candidate != index
                        && nodes[candidate].group_type == *preferred
                        && !is_descendant(nodes, candidate, index)
                })
                .min_by_key(|&candidate| child_count(nodes, candidate))
        });

        if let Some(parent_index) = chosen {
            let parent_id = nodes.get_index(parent_index).map(|(id, _)| id.clone());
            debug!(group = nodes[index].label, parent:? = parent_id; "Parent inferred");
            nodes[index].parent = parent_id;
        }
    }
}

/// Returns true if `candidate` lies below `ancestor` in the current forest.
fn is_descendant(nodes: &IndexMap<String, GroupNode>, candidate: usize, ancestor: usize) -> bool {
    let mut visiting = HashSet::from([candidate]);
    let mut current = candidate;
    while let Some(parent_index) = nodes[current]
        .parent
        .as_deref()
        .and_then(|parent| nodes.get_index_of(parent))
    {
        if parent_index == ancestor {
            return true;
        }
        if !visiting.insert(parent_index) {
            return false;
        }
        current = parent_index;
    }
    false
}

fn child_count(nodes: &IndexMap<String, GroupNode>, index: usize) -> usize {
    let Some((id, _)) = nodes.get_index(index) else {
        return 0;
    };
    nodes
        .values()
        .filter(|node| node.parent.as_deref() == Some(id.as_str()))
        .count()
}

/// Service-to-group assignment state.
struct Assignment<'a> {
    nodes: &'a IndexMap<String, GroupNode>,
    services: &'a [ServiceDescriptor],
    assigned: HashMap<&'a str, usize>,
    population: Vec<usize>,
}

impl<'a> Assignment<'a> {
    fn new(nodes: &'a IndexMap<String, GroupNode>, services: &'a [ServiceDescriptor]) -> Self {
        Self {
            nodes,
            services,
            assigned: HashMap::new(),
            population: vec![0; nodes.len()],
        }
    }

    /// Explicit membership: the most specific claimed group wins.
    fn apply_claims(mut self, claims: &[(String, String)]) -> Self {
        let mut per_service: IndexMap<&str, IndexSet<usize>> = IndexMap::new();
        for (service, group) in claims {
            match self.nodes.get_index_of(group) {
                Some(group_index) => {
                    per_service
                        .entry(service.as_str())
                        .or_default()
                        .insert(group_index);
                }
                None => warn!(service, group; "Membership in unknown group dropped"),
            }
        }

        for service in self.services {
            let Some(candidates) = per_service.get(service.id()) else {
                continue;
            };
            if let Some(group_index) = self.best_of(candidates.iter().copied()) {
                if candidates.len() > 1 {
                    debug!(
                        service = service.id(),
                        claims = candidates.len(),
                        group = self.nodes[group_index].label;
                        "Membership conflict resolved"
                    );
                }
                self.assign(service.id(), group_index);
            }
        }
        self
    }

    /// Connectivity: unassigned services join the groups of their neighbours, to a fixpoint.
    fn apply_connectivity(mut self, links: &[(String, String)]) -> Self {
        let mut neighbours: HashMap<&str, Vec<&str>> = HashMap::new();
        for (from, to) in links {
            neighbours.entry(from.as_str()).or_default().push(to.as_str());
            neighbours.entry(to.as_str()).or_default().push(from.as_str());
        }

        loop {
            let mut changed = false;
            for service in self.services {
                if self.assigned.contains_key(service.id()) {
                    continue;
                }
                let affinities: Vec<usize> = neighbours
                    .get(service.id())
                    .into_iter()
                    .flatten()
                    .filter_map(|neighbour| {
                        self.assigned
                            .get(neighbour)
                            .copied()
                            .or_else(|| self.nodes.get_index_of(*neighbour))
                    })
                    .collect();

                if let Some(group_index) = self.best_of(affinities.into_iter()) {
                    trace!(service = service.id(), group = self.nodes[group_index].label; "Assigned by connectivity");
                    self.assign(service.id(), group_index);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        self
    }

    /// Services without affinity go to the least-populated group of the first available fallback type.
    fn apply_fallback(mut self) -> Self {
        if self.nodes.is_empty() {
            return self;
        }

        for service in self.services {
            if self.assigned.contains_key(service.id()) {
                continue;
            }
            let chosen = GroupType::SERVICE_FALLBACK.iter().find_map(|fallback| {
                (0..self.nodes.len())
                    .filter(|&index| self.nodes[index].group_type == *fallback)
                    .min_by_key(|&index| self.population[index])
            });
            match chosen {
                Some(group_index) => self.assign(service.id(), group_index),
                None => debug!(service = service.id(); "No fallback container, service left ungrouped"),
            }
        }
        self
    }

    /// Highest specificity, then fewest members, then declaration order.
    fn best_of(&self, candidates: impl Iterator<Item = usize>) -> Option<usize> {
        candidates.min_by_key(|&index| {
            (
                std::cmp::Reverse(self.nodes[index].group_type.specificity()),
                self.population[index],
                index,
            )
        })
    }

    fn assign(&mut self, service: &'a str, group_index: usize) {
        self.assigned.insert(service, group_index);
        self.population[group_index] += 1;
    }

    /// Members of `group_id`, in service order.
    fn members_of(&self, group_id: &str) -> Vec<String> {
        let Some(group_index) = self.nodes.get_index_of(group_id) else {
            return Vec::new();
        };
        self.services
            .iter()
            .filter(|service| self.assigned.get(service.id()) == Some(&group_index))
            .map(|service| service.id().to_string())
            .collect()
    }
}
