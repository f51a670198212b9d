//! Structured payload path.

use std::collections::HashMap;

use log::{debug, warn};

use cirrus_core::{
    architecture::Connection, group::GroupType, provider::Provider, service::ServiceDescriptor,
};
use cirrus_parser::{
    Resolver,
    catalog::group_type_for_title,
    payload::{RawPayload, RawService},
    score::{normalize, slugify},
};

use super::{Draft, IdAllocator};
use crate::containment::GroupDeclaration;

/// Builds a draft from a decoded payload.
///
/// `context` is the text the payload came from; it biases resolution toward
/// the vendor it mentions.
pub(crate) fn from_payload(payload: &RawPayload, resolver: &Resolver, context: &str) -> Draft {
    let mut draft = Draft {
        layout: payload.layout().map(str::to_string),
        ..Draft::default()
    };
    let mut ids = IdAllocator::default();
    let mut endpoints = EndpointIndex::default();

    for (index, raw) in payload.groups().iter().enumerate() {
        let label = raw.label().or(raw.id());
        let base = raw
            .id()
            .map(str::to_string)
            .or_else(|| label.map(slugify))
            .unwrap_or_else(|| format!("group-{}", index + 1));
        let id = ids.reserve(&base);
        let group_type = match raw.group_type() {
            Some(name) => GroupType::parse_lenient(name),
            None => label
                .and_then(group_type_for_title)
                .unwrap_or_default(),
        };

        if let Some(hint) = raw.layout_hint() {
            draft.group_hints.insert(id.clone(), hint);
        }
        endpoints.insert(&id, &id);
        if let Some(label) = label {
            endpoints.insert(&normalize(label), &id);
        }

        draft.declarations.push(
            GroupDeclaration::new(id.clone(), label.unwrap_or(&id), group_type)
                .with_members(raw.members().to_vec())
                .with_parent_id(raw.parent_id().map(str::to_string))
                .with_metadata(raw.metadata().cloned()),
        );
    }

    for raw in payload.services() {
        let Some(query) = raw.query() else {
            warn!("Service entry without a name or id skipped");
            continue;
        };
        let resolved = resolver.resolve_with_context(query, context);
        let canonical_id = resolved.id().to_string();
        let mut descriptor = resolved.with_layout_hint(raw.layout_hint());
        descriptor = apply_overrides(descriptor, raw);

        let base = raw.id().unwrap_or(&canonical_id).to_string();
        let merges_into_group = ids.contains(&base)
            && draft.declarations.iter().any(|group| group.id() == base)
            && group_type_for_title(descriptor.title()).is_some();
        let id = if merges_into_group {
            base
        } else {
            ids.reserve(&base)
        };

        if let Some(explicit) = raw.id() {
            endpoints.insert(explicit, &id);
        }
        endpoints.insert(&id, &id);
        endpoints.insert(&normalize(query), &id);
        endpoints.insert(&normalize(descriptor.title()), &id);
        endpoints.insert(&canonical_id, &id);

        draft.claims.extend(
            raw.group_ids()
                .iter()
                .map(|group| (id.clone(), group.trim().to_string())),
        );
        draft.services.push(descriptor.with_id(id));
    }

    for raw in payload.connections() {
        let (Some(from), Some(to)) = (raw.from(), raw.to()) else {
            warn!("Connection without both endpoints skipped");
            continue;
        };
        let from = endpoints.lookup(from, resolver, context);
        let to = endpoints.lookup(to, resolver, context);
        draft.connections.push(
            Connection::new(from, to).with_label(raw.label().map(str::to_string)),
        );
    }

    debug!(
        services = draft.services.len(),
        groups = draft.declarations.len(),
        connections = draft.connections.len();
        "Payload ingested"
    );
    draft
}

/// Applies the descriptive fields an entry spells out explicitly.
fn apply_overrides(mut descriptor: ServiceDescriptor, raw: &RawService) -> ServiceDescriptor {
    let Some(entry) = raw.entry() else {
        return descriptor;
    };

    if descriptor.is_placeholder() {
        if let Some(title) = raw.title() {
            descriptor = descriptor.with_title(title);
        }
        match entry.provider().map(str::parse::<Provider>) {
            Some(Ok(provider)) => descriptor = descriptor.with_provider(provider),
            Some(Err(err)) => debug!(err:% = err; "Unknown provider ignored"),
            None => {}
        }
    }
    if let Some(category) = entry.category() {
        descriptor = descriptor.with_category(category);
    }
    if let Some(description) = entry.description() {
        descriptor = descriptor.with_description(description);
    }
    if let Some(icon) = entry.icon() {
        descriptor = descriptor.with_icon_ref(icon);
    }
    descriptor
}

/// Maps the many ways a payload names an entity onto final ids.
#[derive(Debug, Default)]
struct EndpointIndex {
    names: HashMap<String, String>,
}

impl EndpointIndex {
    /// Records `name` for `id` unless the name is already taken.
    fn insert(&mut self, name: &str, id: &str) {
        if name.is_empty() {
            return;
        }
        self.names
            .entry(name.to_string())
            .or_insert_with(|| id.to_string());
    }

    /// Resolves an endpoint by id, then by normalized name, then through the resolver.
    fn lookup(&self, endpoint: &str, resolver: &Resolver, context: &str) -> String {
        if let Some(id) = self.names.get(endpoint) {
            return id.clone();
        }
        if let Some(id) = self.names.get(&normalize(endpoint)) {
            return id.clone();
        }
        let canonical = resolver.resolve_with_context(endpoint, context);
        match self.names.get(canonical.id()) {
            Some(id) => id.clone(),
            None => endpoint.to_string(),
        }
    }
}
