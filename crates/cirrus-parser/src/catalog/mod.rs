//! Provider catalogs, alias tables and the group keyword table.
//!
//! The built-in catalogs ([`CatalogSet::builtin`]) cover the common services of
//! Azure, AWS and Google Cloud. Every entry carries aliases: short names,
//! abbreviations, Azure resource types, CloudFormation types and Terraform
//! resource names. Additional entries can be loaded from JSON:
//!
//! ```json
//! [
//!   { "id": "acme-ledger", "title": "Acme Ledger", "category": "Databases",
//!     "iconRef": "acme/ledger.svg", "provider": "generic", "aliases": ["ledger"] }
//! ]
//! ```

mod aws;
mod azure;
mod gcp;

use std::collections::HashSet;

use indexmap::IndexSet;
use serde::Deserialize;

use cirrus_core::{
    group::GroupType,
    provider::Provider,
    service::{GENERIC_ICON, ServiceDescriptor},
};

use crate::{error::CatalogError, score::normalize};

/// Container keywords matched against service titles, longest first.
///
/// A service whose title contains one of these phrases (as whole words) is a
/// container rather than a leaf and becomes a group of the given type.
pub const GROUP_KEYWORDS: &[(&str, GroupType)] = &[
    ("network security group", GroupType::NetworkSecurityGroup),
    ("policy assignment", GroupType::PolicyAssignment),
    ("security boundary", GroupType::SecurityBoundary),
    ("management group", GroupType::ManagementScope),
    ("role assignment", GroupType::RoleAssignment),
    ("virtual network", GroupType::VirtualNetwork),
    ("resource group", GroupType::ResourceGroup),
    ("security group", GroupType::NetworkSecurityGroup),
    ("landing zone", GroupType::LandingZone),
    ("subscription", GroupType::Subscription),
    ("aws account", GroupType::Subscription),
    ("subnetwork", GroupType::Subnet),
    ("project", GroupType::Subscription),
    ("cluster", GroupType::Cluster),
    ("region", GroupType::Region),
    ("subnet", GroupType::Subnet),
    ("vnet", GroupType::VirtualNetwork),
    ("vpc", GroupType::VirtualNetwork),
];

/// Returns the container type named by `title`, if any.
///
/// ```
/// # use cirrus_core::group::GroupType;
/// # use cirrus_parser::catalog::group_type_for_title;
/// assert_eq!(group_type_for_title("Azure Virtual Network"), Some(GroupType::VirtualNetwork));
/// assert_eq!(group_type_for_title("VPC Subnetwork"), Some(GroupType::Subnet));
/// assert_eq!(group_type_for_title("Azure Functions"), None);
/// ```
pub fn group_type_for_title(title: &str) -> Option<GroupType> {
    let padded = format!(" {} ", normalize(title));
    GROUP_KEYWORDS
        .iter()
        .find(|(keyword, _)| padded.contains(&format!(" {keyword} ")))
        .map(|&(_, group_type)| group_type)
}

/// A compiled-in catalog record.
struct StaticEntry {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    description: &'static str,
    aliases: &'static [&'static str],
}

impl StaticEntry {
    const fn new(
        id: &'static str,
        title: &'static str,
        category: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            title,
            category,
            description,
            aliases: &[],
        }
    }

    const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn to_entry(&self, provider: Provider) -> CatalogEntry {
        let short_id = self
            .id
            .strip_prefix(provider.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(self.id);
        let icon_ref = format!(
            "{provider}/{}/{short_id}.svg",
            normalize(self.category).replace(' ', "-")
        );

        CatalogEntry {
            id: self.id.to_string(),
            title: self.title.to_string(),
            category: self.category.to_string(),
            provider,
            icon_ref,
            description: self.description.to_string(),
            aliases: self.aliases.iter().map(|alias| alias.to_string()).collect(),
        }
    }
}

/// One canonical service record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    id: String,
    title: String,
    #[serde(default)]
    category: String,
    #[serde(default = "default_provider")]
    provider: Provider,
    #[serde(default)]
    icon_ref: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    aliases: Vec<String>,
}

fn default_provider() -> Provider {
    Provider::Generic
}

impl CatalogEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn icon_ref(&self) -> &str {
        &self.icon_ref
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Builds the canonical descriptor for this entry.
    pub fn to_descriptor(&self) -> ServiceDescriptor {
        ServiceDescriptor::new(&self.id, &self.title, self.provider)
            .with_category(&self.category)
            .with_icon_ref(&self.icon_ref)
            .with_description(&self.description)
    }

    fn validate(mut self, index: usize) -> Result<Self, CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::EmptyField { index, field: "id" });
        }
        if self.title.trim().is_empty() {
            return Err(CatalogError::EmptyField {
                index,
                field: "title",
            });
        }
        if self.icon_ref.trim().is_empty() {
            self.icon_ref = GENERIC_ICON.to_string();
        }
        Ok(self)
    }
}

/// An ordered collection of catalog entries across providers.
///
/// Order matters: it is the final tie-breaker of every lookup.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    entries: Vec<CatalogEntry>,
}

impl CatalogSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built-in Azure, AWS and Google Cloud catalogs.
    pub fn builtin() -> Self {
        let entries = [
            (Provider::Azure, azure::ENTRIES),
            (Provider::Aws, aws::ENTRIES),
            (Provider::Gcp, gcp::ENTRIES),
        ]
        .into_iter()
        .flat_map(|(provider, entries)| entries.iter().map(move |entry| entry.to_entry(provider)))
        .collect();

        Self { entries }
    }

    /// Parses a JSON array of catalog entries into a new set.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for invalid JSON, empty ids or titles, and
    /// duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let mut set = Self::new();
        set.extend_from_json(json)?;
        Ok(set)
    }

    /// Appends the entries of a JSON array, returning how many were added.
    ///
    /// Either every entry is added or none is.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for invalid JSON, empty ids or titles, and ids
    /// that collide with each other or with entries already in the set.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let raw: Vec<CatalogEntry> = serde_json::from_str(json)?;

        let mut seen: HashSet<String> = self.entries.iter().map(|entry| entry.id.clone()).collect();
        let mut accepted = Vec::with_capacity(raw.len());
        for (index, entry) in raw.into_iter().enumerate() {
            let entry = entry.validate(index)?;
            if !seen.insert(entry.id.clone()) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
            accepted.push(entry);
        }

        let added = accepted.len();
        self.entries.extend(accepted);
        Ok(added)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Every title and alias, deduplicated case-insensitively, in catalog order.
    ///
    /// These are the phrases free text is scanned for.
    pub fn mention_phrases(&self) -> Vec<&str> {
        let mut seen = IndexSet::new();
        self.entries
            .iter()
            .flat_map(|entry| {
                std::iter::once(entry.title.as_str()).chain(entry.aliases.iter().map(String::as_str))
            })
            .filter(|phrase| !phrase.trim().is_empty() && seen.insert(phrase.to_lowercase()))
            .collect()
    }
}
