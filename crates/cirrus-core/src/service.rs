//! Resolved service descriptors.
//!
//! A [`ServiceDescriptor`] is the canonical representation of one cloud service
//! in a parsed architecture. Descriptors are created by the resolver, either
//! from a provider catalog entry or as a placeholder, and are never mutated
//! after they have been handed to a [`ParsedArchitecture`](crate::architecture::ParsedArchitecture).

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Size},
    provider::Provider,
};

/// Category assigned to placeholder descriptors.
pub const PLACEHOLDER_CATEGORY: &str = "Custom";

/// Description assigned to placeholder descriptors.
pub const PLACEHOLDER_DESCRIPTION: &str = "AI Detected";

/// Icon reference assigned to placeholder descriptors.
pub const GENERIC_ICON: &str = "generic/service.svg";

/// An explicit position (and optional size) supplied by a structured payload.
///
/// When any service in an architecture carries a hint, the layout engine
/// switches to manual placement and honors the coordinates verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutHint {
    x: f32,
    y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f32>,
}

impl LayoutHint {
    /// Creates a hint for the given top-left coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
        }
    }

    /// Sets the optional explicit width and height.
    pub fn with_dimensions(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Returns the hinted top-left position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the explicit width, if any.
    pub fn width(&self) -> Option<f32> {
        self.width
    }

    /// Returns the explicit height, if any.
    pub fn height(&self) -> Option<f32> {
        self.height
    }

    /// Returns the hinted size, filling missing dimensions from `fallback`.
    pub fn size_or(&self, fallback: Size) -> Size {
        Size::new(
            self.width.unwrap_or(fallback.width()),
            self.height.unwrap_or(fallback.height()),
        )
    }
}

/// The canonical description of a single cloud service.
///
/// # Examples
///
/// ```
/// # use cirrus_core::{provider::Provider, service::ServiceDescriptor};
/// let functions = ServiceDescriptor::new("azure-functions", "Azure Functions", Provider::Azure)
///     .with_category("Compute")
///     .with_icon_ref("azure/compute/functions.svg");
///
/// assert_eq!(functions.id(), "azure-functions");
/// assert!(!functions.is_placeholder());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    id: String,
    title: String,
    category: String,
    provider: Provider,
    icon_ref: String,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layout_hint: Option<LayoutHint>,
}

impl ServiceDescriptor {
    /// Creates a descriptor with a generic icon and no category.
    pub fn new(id: impl Into<String>, title: impl Into<String>, provider: Provider) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: String::new(),
            provider,
            icon_ref: GENERIC_ICON.to_string(),
            description: String::new(),
            layout_hint: None,
        }
    }

    /// Creates a placeholder descriptor for a name no catalog could resolve.
    ///
    /// Placeholders always have a non-empty id and title.
    pub fn placeholder(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        let title = title.into();
        let title = if title.trim().is_empty() {
            id.clone()
        } else {
            title
        };
        Self::new(id, title, Provider::Generic)
            .with_category(PLACEHOLDER_CATEGORY)
            .with_description(PLACEHOLDER_DESCRIPTION)
    }

    /// Replaces the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replaces the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the provider.
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the icon reference.
    pub fn with_icon_ref(mut self, icon_ref: impl Into<String>) -> Self {
        self.icon_ref = icon_ref.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attaches an explicit layout hint.
    pub fn with_layout_hint(mut self, hint: Option<LayoutHint>) -> Self {
        self.layout_hint = hint;
        self
    }

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

    pub fn layout_hint(&self) -> Option<&LayoutHint> {
        self.layout_hint.as_ref()
    }

    /// Returns true if this descriptor was synthesized rather than resolved from a catalog.
    pub fn is_placeholder(&self) -> bool {
        self.provider == Provider::Generic && self.category == PLACEHOLDER_CATEGORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_fields() {
        let descriptor = ServiceDescriptor::placeholder("superwidget-service", "SuperWidget Service");

        assert_eq!(descriptor.category(), PLACEHOLDER_CATEGORY);
        assert_eq!(descriptor.icon_ref(), GENERIC_ICON);
        assert_eq!(descriptor.provider(), Provider::Generic);
        assert!(descriptor.is_placeholder());
    }

    #[test]
    fn test_placeholder_blank_title_uses_id() {
        let descriptor = ServiceDescriptor::placeholder("service", "   ");
        assert_eq!(descriptor.title(), "service");
    }

    #[test]
    fn test_layout_hint_size_or() {
        let hint = LayoutHint::new(10.0, 20.0).with_dimensions(Some(300.0), None);
        let size = hint.size_or(Size::new(160.0, 80.0));

        assert_eq!(size, Size::new(300.0, 80.0));
        assert_eq!(hint.position(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let descriptor = ServiceDescriptor::new("s3", "Amazon S3", Provider::Aws)
            .with_icon_ref("aws/storage/s3.svg");
        let value = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(value["iconRef"], "aws/storage/s3.svg");
        assert_eq!(value["provider"], "aws");
        assert!(value.get("layoutHint").is_none());
    }
}
