//! Relationship end markers and their SVG definitions.

use svg::node::element as svg_element;

use crate::color::Color;

/// Shape drawn at one end of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerShape {
    /// Open chevron, used by associations and dependencies
    OpenArrow,
    /// Hollow triangle, used by inheritance and realization
    HollowTriangle,
    /// Filled diamond on the owner side, used by composition
    FilledDiamond,
    /// Hollow diamond on the owner side, used by aggregation
    HollowDiamond,
}

impl MarkerShape {
    fn name(self) -> &'static str {
        match self {
            Self::OpenArrow => "association",
            Self::HollowTriangle => "inheritance",
            Self::FilledDiamond => "composition",
            Self::HollowDiamond => "aggregation",
        }
    }
}

/// Which end of the path carries the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerEnd {
    Start,
    End,
}

impl MarkerEnd {
    /// Returns the SVG attribute that references the marker
    pub fn svg_attribute(self) -> &'static str {
        match self {
            Self::Start => "marker-start",
            Self::End => "marker-end",
        }
    }
}

/// A marker shape placed at one end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    shape: MarkerShape,
    end: MarkerEnd,
}

impl Marker {
    pub const fn new(shape: MarkerShape, end: MarkerEnd) -> Self {
        Self { shape, end }
    }

    pub fn shape(self) -> MarkerShape {
        self.shape
    }

    pub fn end(self) -> MarkerEnd {
        self.end
    }

    /// Returns the SVG id of this marker drawn in `color`.
    ///
    /// ```
    /// use classcanvas_core::color::Color;
    /// use classcanvas_core::draw::{Marker, MarkerEnd, MarkerShape};
    ///
    /// let marker = Marker::new(MarkerShape::HollowTriangle, MarkerEnd::End);
    /// let id = marker.id(Color::new("#a78bfa").unwrap());
    /// assert!(id.starts_with("uml-inheritance-"));
    /// ```
    pub fn id(self, color: Color) -> String {
        format!("uml-{}-{}", self.shape.name(), color.to_id_safe_string())
    }

    /// Returns the `url(#...)` reference used by path attributes.
    pub fn reference(self, color: Color) -> String {
        format!("url(#{})", self.id(color))
    }

    /// Builds the `<marker>` definition for this marker.
    ///
    /// Hollow shapes are filled with `background` so the edge line does not
    /// show through them.
    pub fn to_svg(self, color: Color, background: Color) -> svg_element::Marker {
        let marker = svg_element::Marker::new()
            .set("id", self.id(color))
            .set("orient", "auto");

        match self.shape {
            MarkerShape::OpenArrow => marker
                .set("markerWidth", 14)
                .set("markerHeight", 12)
                .set("refX", 13)
                .set("refY", 6)
                .add(
                    svg_element::Path::new()
                        .set("d", "M1,1 L13,6 L1,11")
                        .set("fill", "none")
                        .set("stroke", &color)
                        .set("stroke-width", 2)
                        .set("stroke-linecap", "round")
                        .set("stroke-linejoin", "round"),
                ),
            MarkerShape::HollowTriangle => marker
                .set("markerWidth", 16)
                .set("markerHeight", 16)
                .set("refX", 15)
                .set("refY", 8)
                .add(
                    svg_element::Path::new()
                        .set("d", "M0,0 L16,8 L0,16 Z")
                        .set("fill", &background)
                        .set("stroke", &color)
                        .set("stroke-width", 2),
                ),
            MarkerShape::FilledDiamond => marker
                .set("markerWidth", 18)
                .set("markerHeight", 12)
                .set("refX", 0)
                .set("refY", 6)
                .add(
                    svg_element::Path::new()
                        .set("d", "M0,6 L9,0 L18,6 L9,12 Z")
                        .set("fill", &color),
                ),
            MarkerShape::HollowDiamond => marker
                .set("markerWidth", 18)
                .set("markerHeight", 12)
                .set("refX", 0)
                .set("refY", 6)
                .add(
                    svg_element::Path::new()
                        .set("d", "M0,6 L9,0 L18,6 L9,12 Z")
                        .set("fill", &background)
                        .set("stroke", &color)
                        .set("stroke-width", 2),
                ),
        }
    }
}
