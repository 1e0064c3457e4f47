use svg::node::element as svg_element;

use classcanvas_core::{apply_stroke, geometry::Point};

use super::{Svg, text_line};
use crate::diagram::RoutedEdge;

/// Vertical offset of the multiplicity caption above the path center.
const MULTIPLICITY_OFFSET: f32 = -6.0;

/// Vertical offset of the kind caption below the path center.
const KIND_OFFSET: f32 = 16.0;

impl Svg {
    /// Renders one routed relationship, or nothing when it has no path.
    pub(super) fn render_relationship(
        &self,
        routed: &RoutedEdge<'_>,
    ) -> Option<svg_element::Group> {
        let path = routed.path();
        if path.is_empty() {
            return None;
        }

        let edge = routed.edge();
        let kind = edge.kind;
        let color = kind.color();
        let marker = kind.marker();

        let line = svg_element::Path::new()
            .set("d", path.path_data())
            .set("fill", "none");
        let line = apply_stroke!(line, &kind.stroke())
            .set(marker.end().svg_attribute(), marker.reference(color));

        let mut group = svg_element::Group::new()
            .set("id", format!("edge-{}", edge.id))
            .set("class", format!("relationship {kind}"))
            .add(line);

        let center = path.center();
        if let Some(label) = edge.multiplicity_label() {
            let caption = text_line(center.add_point(Point::new(0.0, MULTIPLICITY_OFFSET)), &label)
                .set("text-anchor", "middle")
                .set("font-size", 12)
                .set("font-weight", "bold")
                .set("fill", &color);
            group = group.add(caption);
        }

        let caption = text_line(center.add_point(Point::new(0.0, KIND_OFFSET)), kind.label())
            .set("text-anchor", "middle")
            .set("font-size", 10)
            .set("fill", &color);

        Some(group.add(caption))
    }
}
