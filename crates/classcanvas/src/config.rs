//! Configuration types for ClassCanvas editing and rendering.
//!
//! This module provides configuration structures that control the canvas
//! geometry, edge routing, styling and storage location. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources, and
//! every section falls back to its defaults when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining all sections.
//! - [`CanvasConfig`] - Node footprint, snapping grid and zoom limits.
//! - [`RoutingConfig`] - Anchor auto-selection policy and corner scheme.
//! - [`StyleConfig`] - Visual styling options such as background color.
//! - [`StorageConfig`] - Where diagrams are persisted.
//!
//! # Example
//!
//! ```
//! # use classcanvas::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.canvas().grid_size(), 20.0);
//! assert!(config.validate().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use classcanvas_core::{
    anchor::{CornerScheme, NODE_HEIGHT, NODE_WIDTH, NodeGeometry},
    color::Color,
    geometry::Size,
    routing::{AutoAnchorPolicy, Router},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas geometry section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Edge routing section.
    #[serde(default)]
    routing: RoutingConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Storage configuration section.
    #[serde(default)]
    storage: StorageConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        canvas: CanvasConfig,
        routing: RoutingConfig,
        style: StyleConfig,
        storage: StorageConfig,
    ) -> Self {
        Self {
            canvas,
            routing,
            style,
            storage,
        }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the routing configuration.
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the storage configuration.
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Returns the node geometry described by the canvas and routing sections.
    pub fn geometry(&self) -> NodeGeometry {
        NodeGeometry::new(self.canvas.node_size(), self.routing.corners)
    }

    /// Returns a router configured from this configuration.
    pub fn router(&self) -> Router {
        Router::new(self.geometry(), self.routing.auto_anchor)
    }

    /// Checks that the configured values are usable.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first offending value.
    pub fn validate(&self) -> Result<(), String> {
        self.canvas.validate()?;
        self.style.background_color()?;
        Ok(())
    }
}

/// Node footprint, snapping grid and zoom limits.
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_node_width")]
    node_width: f32,

    #[serde(default = "default_node_height")]
    node_height: f32,

    /// Spacing of the snapping grid, in canvas units.
    #[serde(default = "default_grid_size")]
    grid_size: f32,

    #[serde(default = "default_min_zoom")]
    min_zoom: f32,

    #[serde(default = "default_max_zoom")]
    max_zoom: f32,
}

fn default_node_width() -> f32 {
    NODE_WIDTH
}

fn default_node_height() -> f32 {
    NODE_HEIGHT
}

fn default_grid_size() -> f32 {
    20.0
}

fn default_min_zoom() -> f32 {
    0.2
}

fn default_max_zoom() -> f32 {
    3.0
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            grid_size: default_grid_size(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

impl CanvasConfig {
    /// Returns the footprint shared by every node.
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.node_width > 0.0 && self.node_height > 0.0) {
            return Err(format!(
                "node size must be positive, got {}x{}",
                self.node_width, self.node_height
            ));
        }
        if self.grid_size < 0.0 {
            return Err(format!(
                "grid size must not be negative, got {}",
                self.grid_size
            ));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(format!(
                "zoom range must satisfy 0 < min_zoom <= max_zoom, got {}..{}",
                self.min_zoom, self.max_zoom
            ));
        }
        Ok(())
    }
}

/// Edge routing configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RoutingConfig {
    /// How ends without an explicit anchor are chosen.
    #[serde(default)]
    auto_anchor: AutoAnchorPolicy,

    /// Placement of the `nw` corner anchor.
    #[serde(default)]
    corners: CornerScheme,
}

impl RoutingConfig {
    pub fn new(auto_anchor: AutoAnchorPolicy, corners: CornerScheme) -> Self {
        Self {
            auto_anchor,
            corners,
        }
    }

    pub fn auto_anchor(&self) -> AutoAnchorPolicy {
        self.auto_anchor
    }

    pub fn corners(&self) -> CornerScheme {
        self.corners
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for diagrams, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// Persistence configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted diagram.
    #[serde(default)]
    directory: Option<PathBuf>,
}

impl StorageConfig {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    /// Returns the configured storage directory, if any.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.canvas().node_size(), Size::new(220.0, 140.0));
        assert_eq!(config.canvas().min_zoom(), 0.2);
        assert_eq!(config.canvas().max_zoom(), 3.0);
        assert_eq!(config.routing().auto_anchor(), AutoAnchorPolicy::Independent);
        assert_eq!(config.routing().corners(), CornerScheme::Corrected);
        assert_eq!(config.style().background_color(), Ok(None));
        assert!(config.storage().directory().is_none());
        assert_eq!(config.router(), Router::default());
    }

    #[test]
    fn test_invalid_background_color() {
        let style = StyleConfig::new(Some("not-a-color".to_string()));
        assert!(style.background_color().is_err());

        let config = AppConfig::new(
            CanvasConfig::default(),
            RoutingConfig::default(),
            style,
            StorageConfig::default(),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_zoom_range() {
        let canvas = CanvasConfig {
            min_zoom: 2.0,
            max_zoom: 1.0,
            ..CanvasConfig::default()
        };
        let err = canvas.validate().unwrap_err();
        assert!(err.contains("zoom range"));
    }

    #[test]
    fn test_router_follows_routing_section() {
        let config = AppConfig::new(
            CanvasConfig::default(),
            RoutingConfig::new(AutoAnchorPolicy::Bundled, CornerScheme::Legacy),
            StyleConfig::default(),
            StorageConfig::default(),
        );
        let router = config.router();
        assert_eq!(router.policy(), AutoAnchorPolicy::Bundled);
        assert_eq!(router.geometry().corners(), CornerScheme::Legacy);
    }
}
