//! Containment groups.
//!
//! A [`Group`] is a logical or administrative boundary (a subscription, a
//! virtual network, a resource group, ...) that owns services and nested
//! groups. The nesting is expressed through [`Group::parent_id`]; the direct
//! services of a group are listed in [`Group::members`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arbitrary key/value metadata attached to a group by a structured payload.
pub type GroupMetadata = serde_json::Map<String, serde_json::Value>;

/// The closed set of container kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupType {
    ManagementScope,
    Subscription,
    LandingZone,
    Region,
    ResourceGroup,
    VirtualNetwork,
    Subnet,
    Cluster,
    NetworkSecurityGroup,
    SecurityBoundary,
    PolicyAssignment,
    RoleAssignment,
    #[default]
    Default,
}

impl GroupType {
    /// Every group type, in nesting order.
    pub const ALL: [GroupType; 13] = [
        GroupType::ManagementScope,
        GroupType::Subscription,
        GroupType::LandingZone,
        GroupType::PolicyAssignment,
        GroupType::RoleAssignment,
        GroupType::Region,
        GroupType::SecurityBoundary,
        GroupType::ResourceGroup,
        GroupType::VirtualNetwork,
        GroupType::NetworkSecurityGroup,
        GroupType::Subnet,
        GroupType::Cluster,
        GroupType::Default,
    ];

    /// Container types a service without any group affinity falls back to, in order.
    pub const SERVICE_FALLBACK: [GroupType; 6] = [
        GroupType::ResourceGroup,
        GroupType::LandingZone,
        GroupType::VirtualNetwork,
        GroupType::Subscription,
        GroupType::ManagementScope,
        GroupType::Default,
    ];

    /// Parses a group type name leniently.
    ///
    /// Case, separators and common abbreviations are accepted (`managementGroup`,
    /// `management-scope`, `rg`, `vnet`, `vpc`, ...). Unknown names map to
    /// [`GroupType::Default`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use cirrus_core::group::GroupType;
    /// assert_eq!(GroupType::parse_lenient("managementGroup"), GroupType::ManagementScope);
    /// assert_eq!(GroupType::parse_lenient("resource_group"), GroupType::ResourceGroup);
    /// assert_eq!(GroupType::parse_lenient("VPC"), GroupType::VirtualNetwork);
    /// assert_eq!(GroupType::parse_lenient("whatever"), GroupType::Default);
    /// ```
    pub fn parse_lenient(name: &str) -> GroupType {
        let compact: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match compact.as_str() {
            "managementscope" | "managementgroup" | "managementgroups" | "mg" | "tenant"
            | "organization" | "org" | "rootmanagementgroup" => GroupType::ManagementScope,
            "subscription" | "sub" | "account" | "awsaccount" | "project" | "gcpproject" => {
                GroupType::Subscription
            }
            "landingzone" | "lz" => GroupType::LandingZone,
            "region" | "location" | "availabilityzone" | "zone" => GroupType::Region,
            "resourcegroup" | "resourcegroups" | "rg" => GroupType::ResourceGroup,
            "virtualnetwork" | "vnet" | "vpc" | "network" => GroupType::VirtualNetwork,
            "subnet" | "subnetwork" => GroupType::Subnet,
            "cluster" | "akscluster" | "kubernetescluster" | "k8s" => GroupType::Cluster,
            "networksecuritygroup" | "nsg" | "securitygroup" => GroupType::NetworkSecurityGroup,
            "securityboundary" | "boundary" | "trustboundary" | "perimeter" => {
                GroupType::SecurityBoundary
            }
            "policyassignment" | "policy" => GroupType::PolicyAssignment,
            "roleassignment" | "rbac" | "role" => GroupType::RoleAssignment,
            _ => GroupType::Default,
        }
    }

    /// Returns the kebab-case name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            GroupType::ManagementScope => "management-scope",
            GroupType::Subscription => "subscription",
            GroupType::LandingZone => "landing-zone",
            GroupType::Region => "region",
            GroupType::ResourceGroup => "resource-group",
            GroupType::VirtualNetwork => "virtual-network",
            GroupType::Subnet => "subnet",
            GroupType::Cluster => "cluster",
            GroupType::NetworkSecurityGroup => "network-security-group",
            GroupType::SecurityBoundary => "security-boundary",
            GroupType::PolicyAssignment => "policy-assignment",
            GroupType::RoleAssignment => "role-assignment",
            GroupType::Default => "default",
        }
    }

    /// How deeply this kind of container usually nests; higher is more specific.
    pub fn specificity(self) -> u8 {
        match self {
            GroupType::Default => 0,
            GroupType::ManagementScope => 1,
            GroupType::Subscription => 2,
            GroupType::LandingZone | GroupType::PolicyAssignment | GroupType::RoleAssignment => 3,
            GroupType::Region | GroupType::SecurityBoundary => 4,
            GroupType::ResourceGroup => 5,
            GroupType::VirtualNetwork => 6,
            GroupType::NetworkSecurityGroup | GroupType::Subnet => 7,
            GroupType::Cluster => 8,
        }
    }

    /// Parent types tried, in order, when a group declares no parent.
    pub fn parent_preferences(self) -> &'static [GroupType] {
        use GroupType::*;

        match self {
            ManagementScope | Default => &[],
            Subscription => &[ManagementScope],
            LandingZone => &[Subscription, ManagementScope],
            Region => &[LandingZone, Subscription, ManagementScope],
            ResourceGroup => &[Region, LandingZone, Subscription, ManagementScope],
            VirtualNetwork => &[ResourceGroup, Region, LandingZone, Subscription],
            Subnet => &[VirtualNetwork],
            Cluster => &[Subnet, VirtualNetwork, ResourceGroup, Region],
            NetworkSecurityGroup => &[ResourceGroup, VirtualNetwork, Subscription],
            SecurityBoundary => &[LandingZone, Subscription, ManagementScope],
            PolicyAssignment => &[Subscription, ManagementScope],
            RoleAssignment => &[ResourceGroup, Subscription, ManagementScope],
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A containment group in a parsed architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    id: String,
    label: String,
    #[serde(rename = "type")]
    group_type: GroupType,
    #[serde(default)]
    members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<GroupMetadata>,
}

impl Group {
    /// Creates a root group with no members.
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

    /// Sets the direct service members.
    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }

    /// Sets the parent group.
    pub fn with_parent_id(mut self, parent_id: Option<String>) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Attaches payload metadata.
    pub fn with_metadata(mut self, metadata: Option<GroupMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn group_type(&self) -> GroupType {
        self.group_type
    }

    /// Ids of the services directly contained by this group.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn metadata(&self) -> Option<&GroupMetadata> {
        self.metadata.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_variants() {
        let cases = [
            ("management-scope", GroupType::ManagementScope),
            ("Management Group", GroupType::ManagementScope),
            ("subscription", GroupType::Subscription),
            ("landingZone", GroupType::LandingZone),
            ("resourceGroup", GroupType::ResourceGroup),
            ("vnet", GroupType::VirtualNetwork),
            ("subnet", GroupType::Subnet),
            ("NSG", GroupType::NetworkSecurityGroup),
            ("security-boundary", GroupType::SecurityBoundary),
            ("policy_assignment", GroupType::PolicyAssignment),
            ("roleAssignment", GroupType::RoleAssignment),
            ("", GroupType::Default),
        ];

        for (name, expected) in cases {
            assert_eq!(GroupType::parse_lenient(name), expected, "parsing {name:?}");
        }
    }

    #[test]
    fn test_kebab_names_roundtrip_through_lenient_parse() {
        for group_type in GroupType::ALL {
            assert_eq!(GroupType::parse_lenient(group_type.as_str()), group_type);
        }
    }

    #[test]
    fn test_parent_preferences_are_less_specific() {
        for group_type in GroupType::ALL {
            for parent in group_type.parent_preferences() {
                assert!(
                    parent.specificity() < group_type.specificity(),
                    "{parent} should be less specific than {group_type}"
                );
            }
        }
    }

    #[test]
    fn test_resource_group_fallback_chain() {
        assert_eq!(
            GroupType::ResourceGroup.parent_preferences(),
            &[
                GroupType::Region,
                GroupType::LandingZone,
                GroupType::Subscription,
                GroupType::ManagementScope
            ]
        );
    }

    #[test]
    fn test_group_serializes_type_field() {
        let group = Group::new("rg", "Core RG", GroupType::ResourceGroup)
            .with_parent_id(Some("sub".to_string()))
            .with_members(vec!["api".to_string()]);
        let value = serde_json::to_value(&group).unwrap();

        assert_eq!(value["type"], "resource-group");
        assert_eq!(value["parentId"], "sub");
        assert_eq!(value["members"][0], "api");
    }
}
