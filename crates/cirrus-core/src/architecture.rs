//! The parsed architecture aggregate.
//!
//! [`ParsedArchitecture`] is produced once per parse call and handed,
//! read-only, to the layout engine and the output assembler.

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{error::ModelError, group::Group, service::LayoutHint, service::ServiceDescriptor};

/// A directed edge between two services or groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    from: String,
    to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    /// Sets the optional edge label. Blank labels are discarded.
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label.filter(|label| !label.trim().is_empty());
        self
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns true if both endpoints are the same entity.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// How root containers and flat nodes are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Horizontal,
    Vertical,
    Grid,
    Manual,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Horizontal => "horizontal",
            LayoutMode::Vertical => "vertical",
            LayoutMode::Grid => "grid",
            LayoutMode::Manual => "manual",
        }
    }

    /// Parses `value` case-insensitively, falling back to `default` when it is
    /// missing or unknown.
    pub fn parse_or(value: Option<&str>, default: LayoutMode) -> LayoutMode {
        value
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "horizontal" | "row" | "lr" => Ok(LayoutMode::Horizontal),
            "vertical" | "column" | "tb" => Ok(LayoutMode::Vertical),
            "grid" => Ok(LayoutMode::Grid),
            "manual" => Ok(LayoutMode::Manual),
            _ => Err(ModelError::UnknownLayoutMode(s.to_string())),
        }
    }
}

/// The validated graph produced by one parse call.
///
/// Services, groups and connections keep the order in which they were
/// discovered, which makes every downstream step deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedArchitecture {
    services: Vec<ServiceDescriptor>,
    connections: Vec<Connection>,
    groups: Vec<Group>,
    layout_mode: LayoutMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layout_hints: Option<BTreeMap<String, LayoutHint>>,
}

impl ParsedArchitecture {
    pub fn new(
        services: Vec<ServiceDescriptor>,
        connections: Vec<Connection>,
        groups: Vec<Group>,
        layout_mode: LayoutMode,
    ) -> Self {
        Self {
            services,
            connections,
            groups,
            layout_mode,
            layout_hints: None,
        }
    }

    /// Attaches explicit group layout hints keyed by group id.
    ///
    /// An empty map is stored as `None`.
    pub fn with_layout_hints(mut self, hints: BTreeMap<String, LayoutHint>) -> Self {
        self.layout_hints = (!hints.is_empty()).then_some(hints);
        self
    }

    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn layout_hints(&self) -> Option<&BTreeMap<String, LayoutHint>> {
        self.layout_hints.as_ref()
    }

    /// Returns the explicit layout hint of a group, if any.
    pub fn group_hint(&self, group_id: &str) -> Option<&LayoutHint> {
        self.layout_hints.as_ref()?.get(group_id)
    }

    pub fn service(&self, id: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|service| service.id() == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id() == id)
    }

    /// Returns true if `id` names a service or a group of this architecture.
    pub fn contains_entity(&self, id: &str) -> bool {
        self.service(id).is_some() || self.group(id).is_some()
    }

    /// Returns true if nothing at all was resolved.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.groups.is_empty()
    }

    /// Returns true if any service carries an explicit layout hint.
    pub fn has_service_hints(&self) -> bool {
        self.services
            .iter()
            .any(|service| service.layout_hint().is_some())
    }

    /// Returns the group that lists `service_id` as a direct member.
    pub fn group_of_service(&self, service_id: &str) -> Option<&Group> {
        self.groups
            .iter()
            .find(|group| group.members().iter().any(|member| member == service_id))
    }

    /// Returns the direct child groups of `group_id`, in declaration order.
    pub fn child_groups<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a Group> + 'a {
        self.groups
            .iter()
            .filter(move |group| group.parent_id() == Some(group_id))
    }

    /// Returns the groups without a parent, in declaration order.
    pub fn root_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|group| group.parent_id().is_none())
    }

    /// Returns the nesting depth of a group (root groups are at depth 0).
    ///
    /// The walk up the parent chain stops at the first repeated group, so a
    /// malformed hierarchy still yields a finite depth. Unknown ids yield `None`.
    pub fn group_depth(&self, group_id: &str) -> Option<usize> {
        let mut current = self.group(group_id)?;
        let mut visiting = HashSet::from([current.id()]);
        let mut depth = 0;

        while let Some(parent) = current.parent_id().and_then(|parent| self.group(parent)) {
            if !visiting.insert(parent.id()) {
                break;
            }
            depth += 1;
            current = parent;
        }
        Some(depth)
    }

    /// Returns the depth of a service: its group's depth + 1, or 0 when ungrouped.
    pub fn service_depth(&self, service_id: &str) -> usize {
        self.group_of_service(service_id)
            .and_then(|group| self.group_depth(group.id()))
            .map_or(0, |depth| depth + 1)
    }
}
