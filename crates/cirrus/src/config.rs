//! Configuration types for Cirrus.
//!
//! This module provides the configuration structures that control how
//! architectures are resolved and laid out. All types implement
//! [`serde::Deserialize`] so they can be loaded from external sources; every
//! field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and resolver settings.
//! - [`LayoutConfig`] - Spacing constants and the default [`LayoutMode`].
//! - [`ResolverConfig`] - Fuzzy threshold, extra aliases and the preferred provider.
//!
//! # Example
//!
//! ```
//! # use cirrus::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().service_width(), 160.0);
//! assert_eq!(config.resolver().fuzzy_threshold(), 0.35);
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use cirrus_core::{architecture::LayoutMode, geometry::Size, provider::Provider};
use cirrus_parser::score::DEFAULT_THRESHOLD;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Resolver configuration section.
    #[serde(default)]
    resolver: ResolverConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(layout: LayoutConfig, resolver: ResolverConfig) -> Self {
        Self { layout, resolver }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the resolver configuration.
    pub fn resolver(&self) -> &ResolverConfig {
        &self.resolver
    }
}

/// Spacing constants used by every layout strategy.
///
/// All lengths are in diagram units (pixels on the default canvas).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    service_width: f32,
    service_height: f32,
    sibling_spacing: f32,
    layer_spacing: f32,
    group_padding: f32,
    group_header: f32,
    group_spacing: f32,
    min_group_width: f32,
    min_group_height: f32,
    min_offset: f32,
    default_mode: LayoutMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            service_width: 160.0,
            service_height: 80.0,
            sibling_spacing: 40.0,
            layer_spacing: 100.0,
            group_padding: 24.0,
            group_header: 36.0,
            group_spacing: 48.0,
            min_group_width: 220.0,
            min_group_height: 120.0,
            min_offset: 40.0,
            default_mode: LayoutMode::default(),
        }
    }
}

impl LayoutConfig {
    /// Sets the size of a service node without an explicit size.
    pub fn with_service_size(mut self, size: Size) -> Self {
        self.service_width = size.width();
        self.service_height = size.height();
        self
    }

    /// Sets the layout mode used when the input does not request one.
    pub fn with_default_mode(mut self, mode: LayoutMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn service_width(&self) -> f32 {
        self.service_width
    }

    pub fn service_height(&self) -> f32 {
        self.service_height
    }

    /// The default service node size.
    pub fn service_size(&self) -> Size {
        Size::new(self.service_width, self.service_height)
    }

    /// Gap between sibling nodes in a row, a column or a grid.
    pub fn sibling_spacing(&self) -> f32 {
        self.sibling_spacing
    }

    /// Horizontal gap between flow layers.
    pub fn layer_spacing(&self) -> f32 {
        self.layer_spacing
    }

    /// Inner padding on every side of a group.
    pub fn group_padding(&self) -> f32 {
        self.group_padding
    }

    /// Height reserved for a group's label above its contents.
    pub fn group_header(&self) -> f32 {
        self.group_header
    }

    /// Gap between neighbouring groups.
    pub fn group_spacing(&self) -> f32 {
        self.group_spacing
    }

    /// The smallest size a group is ever given.
    pub fn min_group_size(&self) -> Size {
        Size::new(self.min_group_width, self.min_group_height)
    }

    /// The smallest coordinate any auto-placed node may have.
    pub fn min_offset(&self) -> f32 {
        self.min_offset
    }

    pub fn default_mode(&self) -> LayoutMode {
        self.default_mode
    }
}

/// Service resolver settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    fuzzy_threshold: f64,
    extra_aliases: BTreeMap<String, String>,
    preferred_provider: Option<Provider>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_THRESHOLD,
            extra_aliases: BTreeMap::new(),
            preferred_provider: None,
        }
    }
}

impl ResolverConfig {
    /// Overrides the minimum fuzzy score.
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// Adds an alias mapping onto a canonical service title.
    pub fn with_extra_alias(mut self, alias: impl Into<String>, title: impl Into<String>) -> Self {
        self.extra_aliases.insert(alias.into(), title.into());
        self
    }

    /// Sets the provider preferred when the input carries no vendor hint.
    pub fn with_preferred_provider(mut self, provider: Option<Provider>) -> Self {
        self.preferred_provider = provider;
        self
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    /// Extra aliases, mapping alias to canonical title.
    pub fn extra_aliases(&self) -> &BTreeMap<String, String> {
        &self.extra_aliases
    }

    pub fn preferred_provider(&self) -> Option<Provider> {
        self.preferred_provider
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"layout": {"service_width": 200.0, "default_mode": "grid"},
                "resolver": {"preferred_provider": "aws", "extra_aliases": {"ledger": "Azure SQL Database"}}}"#,
        )
        .unwrap();

        assert_approx_eq!(f32, config.layout().service_width(), 200.0);
        assert_approx_eq!(f32, config.layout().service_height(), 80.0);
        assert_eq!(config.layout().default_mode(), LayoutMode::Grid);
        assert_eq!(config.resolver().preferred_provider(), Some(Provider::Aws));
        assert_approx_eq!(f64, config.resolver().fuzzy_threshold(), DEFAULT_THRESHOLD);
        assert_eq!(config.resolver().extra_aliases().len(), 1);
    }

    #[test]
    fn test_builders() {
        let layout = LayoutConfig::default()
            .with_service_size(Size::new(100.0, 50.0))
            .with_default_mode(LayoutMode::Vertical);
        let resolver = ResolverConfig::default()
            .with_fuzzy_threshold(0.5)
            .with_extra_alias("blob", "Azure Blob Storage");
        let config = AppConfig::new(layout, resolver);

        assert_eq!(config.layout().service_size(), Size::new(100.0, 50.0));
        assert_eq!(config.layout().default_mode(), LayoutMode::Vertical);
        assert_approx_eq!(f64, config.resolver().fuzzy_threshold(), 0.5);
        assert_eq!(
            config.resolver().extra_aliases().get("blob").map(String::as_str),
            Some("Azure Blob Storage")
        );
    }
}
