//! ClassCanvas - editing, persistence and export of UML class diagrams.
//!
//! The geometry and routing core lives in `classcanvas-core` and is
//! re-exported here. This crate adds the editable [`diagram::Diagram`]
//! model, the pointer and keyboard [`interaction`] state machines, durable
//! [`store`]s and SVG export through the [`Canvas`] facade.

pub mod config;
pub mod diagram;
pub mod interaction;
pub mod store;

mod error;
mod export;

pub use classcanvas_core::{anchor, color, draw, geometry, routing, semantic};

pub use error::CanvasError;

use std::path::{Path, PathBuf};

use log::{debug, info};

use classcanvas_core::routing::Router;

use config::AppConfig;
use diagram::Diagram;
use export::Exporter;
use interaction::Viewport;
use store::{DiagramStore, FileBackend};

/// Entry point tying a configuration to routing, storage and export.
///
/// # Examples
///
/// ```rust,no_run
/// use classcanvas::{Canvas, config::AppConfig};
///
/// let canvas = Canvas::new(AppConfig::default());
///
/// // Load the stored diagram, or the example one on first use
/// let store = canvas.open_store("diagrams");
/// let diagram = store.load().expect("Failed to load");
///
/// // Render it with every edge routed
/// let svg = canvas.render_svg(&diagram)
///     .expect("Failed to render");
///
/// // Or use default config
/// let canvas = Canvas::default();
/// ```
#[derive(Debug, Default)]
pub struct Canvas {
    config: AppConfig,
}

impl Canvas {
    /// Create a canvas with the given configuration.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use classcanvas::{Canvas, config::AppConfig};
    ///
    /// let canvas = Canvas::new(AppConfig::default());
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Router built from the configured node size, corner scheme and
    /// auto-anchor policy.
    pub fn router(&self) -> Router {
        self.config.router()
    }

    /// A viewport at zoom 1 and no pan, clamped to the configured zoom range.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_config(self.config.canvas())
    }

    /// Opens a file store rooted at `directory`.
    ///
    /// Nothing is read or created until the store is used.
    pub fn open_store(&self, directory: impl Into<PathBuf>) -> DiagramStore<FileBackend> {
        let backend = FileBackend::new(directory);
        debug!(directory = backend.directory().display().to_string(); "Opening diagram store");
        DiagramStore::new(backend)
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `CanvasError::Export` if the configured style is invalid.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use classcanvas::{Canvas, diagram::Diagram};
    ///
    /// let svg = Canvas::default()
    ///     .render_svg(&Diagram::example())
    ///     .expect("Failed to render diagram");
    ///
    /// println!("{}", svg);
    /// ```
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, CanvasError> {
        info!(nodes = diagram.node_count(), edges = diagram.edge_count(); "Rendering diagram");

        // The file name is unused for in-memory rendering
        let exporter = export::svg::SvgBuilder::new("")
            .with_style(self.config.style())
            .with_router(self.router())
            .build()?;

        let svg_string = exporter.render_diagram(diagram).to_string();

        info!("SVG rendered successfully");
        Ok(svg_string)
    }

    /// Render a diagram and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns `CanvasError::Export` if the style is invalid or the file
    /// cannot be written.
    pub fn export_svg(&self, diagram: &Diagram, path: impl AsRef<Path>) -> Result<(), CanvasError> {
        let exporter = export::svg::SvgBuilder::new(path)
            .with_style(self.config.style())
            .with_router(self.router())
            .build()?;

        exporter.export_diagram(diagram)?;
        Ok(())
    }
}
