//! SVG rendering of class diagrams.
//!
//! Edges are drawn first so class boxes sit on top of them. Each
//! relationship kind gets one `<marker>` definition per document.

mod class;
mod relationship;

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use classcanvas_core::{
    color::Color,
    geometry::{Bounds, Point},
    routing::Router,
    semantic::RelationshipKind,
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    diagram::{Diagram, RoutedEdge},
};

/// Empty space kept around the diagram content.
const MARGIN: f32 = 40.0;

const DEFAULT_BACKGROUND: &str = "#020617";

const FONT_FAMILY: &str = "ui-sans-serif, system-ui, sans-serif";

/// Builder for an [`Svg`] exporter.
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    file_name: PathBuf,
    router: Router,
    style: StyleConfig,
}

impl SvgBuilder {
    /// Starts a builder writing to `file_name`.
    pub fn new(file_name: impl AsRef<Path>) -> Self {
        Self {
            file_name: file_name.as_ref().to_path_buf(),
            router: Router::default(),
            style: StyleConfig::default(),
        }
    }

    /// Sets the router used to lay out edges and size class boxes.
    pub fn with_router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the configured background color is invalid.
    pub fn build(self) -> Result<Svg, Error> {
        let background = match self.style.background_color().map_err(Error::Render)? {
            Some(color) => color,
            None => Color::new(DEFAULT_BACKGROUND).map_err(Error::Render)?,
        };

        Ok(Svg {
            file_name: self.file_name,
            router: self.router,
            background,
        })
    }
}

/// SVG exporter for class diagrams.
#[derive(Debug, Clone)]
pub struct Svg {
    file_name: PathBuf,
    router: Router,
    background: Color,
}

impl Svg {
    /// Renders `diagram` to an SVG document sized to its content.
    pub fn render_diagram(&self, diagram: &Diagram) -> Document {
        let routes = diagram.routes(&self.router);
        let bounds = self.calculate_diagram_bounds(diagram, &routes).expand(MARGIN);
        debug!(
            width = bounds.width(),
            height = bounds.height(),
            edges = routes.len();
            "Rendering SVG document"
        );

        let background = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", &self.background);

        let mut relationships = svg_element::Group::new().set("class", "relationships");
        for routed in &routes {
            if let Some(group) = self.render_relationship(routed) {
                relationships = relationships.add(group);
            }
        }

        let mut classes = svg_element::Group::new().set("class", "classes");
        for node in diagram.nodes() {
            classes = classes.add(self.render_class(node));
        }

        Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x(),
                    bounds.min_y(),
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", bounds.width())
            .set("height", bounds.height())
            .add(background)
            .add(self.render_marker_definitions(&routes))
            .add(relationships)
            .add(classes)
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, doc: Document) -> Result<(), Error> {
        let file_name = self.file_name.display().to_string();
        info!(file_name; "Creating SVG file");

        let mut file = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name, err:err; "Failed to create SVG file");
                return Err(Error::Io(err));
            }
        };

        if let Err(err) = write!(file, "{doc}") {
            error!(file_name, err:err; "Failed to write SVG content");
            return Err(Error::Io(err));
        }

        Ok(())
    }

    /// Bounding box of every class box and every routed point.
    fn calculate_diagram_bounds(&self, diagram: &Diagram, routes: &[RoutedEdge<'_>]) -> Bounds {
        let geometry = self.router.geometry();
        let mut node_bounds = diagram.nodes().map(|node| geometry.bounds(node.position()));

        let Some(first) = node_bounds.next() else {
            return Bounds::default();
        };
        let bounds = node_bounds.fold(first, |acc, b| acc.merge(&b));

        routes
            .iter()
            .flat_map(|routed| routed.path().points().iter().copied())
            .fold(bounds, |acc, point| acc.include_point(point))
    }

    /// One marker definition per relationship kind in use.
    fn render_marker_definitions(&self, routes: &[RoutedEdge<'_>]) -> svg_element::Definitions {
        let mut kinds: Vec<RelationshipKind> = Vec::new();
        for routed in routes.iter().filter(|routed| !routed.path().is_empty()) {
            if !kinds.contains(&routed.edge().kind) {
                kinds.push(routed.edge().kind);
            }
        }

        kinds
            .into_iter()
            .fold(svg_element::Definitions::new(), |defs, kind| {
                defs.add(kind.marker().to_svg(kind.color(), self.background))
            })
    }
}

/// A single-line text element at `position`.
fn text_line(position: Point, content: &str) -> svg_element::Text {
    svg_element::Text::new("")
        .set("x", position.x())
        .set("y", position.y())
        .set("font-family", FONT_FAMILY)
        .add(SvgText::new(content))
}

impl Exporter for Svg {
    fn export_diagram(&self, diagram: &Diagram) -> Result<(), Error> {
        let doc = self.render_diagram(diagram);
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}
