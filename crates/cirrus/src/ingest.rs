//! Turning extracted input into a draft architecture.
//!
//! Both input shapes end in a [`Draft`]: resolved services, raw connections,
//! group declarations and membership claims. The draft is then validated and
//! handed to the containment builder.

mod payload;
mod text;

pub(crate) use payload::from_payload;
pub(crate) use text::from_text;

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexSet;
use log::{debug, warn};

use cirrus_core::{
    architecture::Connection,
    service::{LayoutHint, ServiceDescriptor},
};

use crate::containment::GroupDeclaration;

/// Everything one input contributed, before containment building.
#[derive(Debug, Default)]
pub(crate) struct Draft {
    pub(crate) services: Vec<ServiceDescriptor>,
    pub(crate) connections: Vec<Connection>,
    pub(crate) declarations: Vec<GroupDeclaration>,
    /// `(service id, group id)` pairs from `groupIds`.
    pub(crate) claims: Vec<(String, String)>,
    pub(crate) layout: Option<String>,
    pub(crate) group_hints: BTreeMap<String, LayoutHint>,
}

impl Draft {
    /// Ids of every service and declared group.
    pub(crate) fn entity_ids(&self) -> HashSet<&str> {
        self.services
            .iter()
            .map(ServiceDescriptor::id)
            .chain(self.declarations.iter().map(GroupDeclaration::id))
            .collect()
    }
}

/// Hands out unique ids, suffixing collisions with `-2`, `-3`, ...
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    pub(crate) fn reserve(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let id = (2..)
            .map(|suffix| format!("{base}-{suffix}"))
            .find(|candidate| !self.used.contains(candidate))
            .unwrap_or_else(|| base.to_string());
        debug!(base, id; "Id collision, suffix added");
        self.used.insert(id.clone());
        id
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }
}

/// Drops connections with a dangling endpoint and self-loops, and collapses duplicates.
pub(crate) fn validate_connections(
    connections: Vec<Connection>,
    entity_ids: &HashSet<&str>,
) -> Vec<Connection> {
    let mut seen: IndexSet<(String, String)> = IndexSet::new();
    let mut valid = Vec::with_capacity(connections.len());

    for connection in connections {
        if !entity_ids.contains(connection.from()) || !entity_ids.contains(connection.to()) {
            warn!(
                from = connection.from(),
                to = connection.to();
                "Connection with dangling endpoint dropped"
            );
            continue;
        }
        if connection.is_self_loop() {
            warn!(entity = connection.from(); "Self-loop dropped");
            continue;
        }
        if !seen.insert((connection.from().to_string(), connection.to().to_string())) {
            debug!(from = connection.from(), to = connection.to(); "Duplicate connection collapsed");
            continue;
        }
        valid.push(connection);
    }
    valid
}
