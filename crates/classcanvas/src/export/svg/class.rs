use svg::node::element as svg_element;

use classcanvas_core::{apply_stroke, draw::StrokeDefinition, geometry::Point, semantic::Node};

use super::{Svg, text_line};

const HEADER_HEIGHT: f32 = 44.0;
const LINE_HEIGHT: f32 = 18.0;
const PADDING_X: f32 = 12.0;
const CORNER_RADIUS: f32 = 8.0;

const BODY_FILL: &str = "#0f172a";
const NAME_FILL: &str = "#f1f5f9";
const MEMBER_FILL: &str = "#cbd5e1";
const SEPARATOR_STROKE: &str = "#334155";

impl Svg {
    /// Renders a class box with its header and both member compartments.
    pub(super) fn render_class(&self, node: &Node) -> svg_element::Group {
        let bounds = self.router.geometry().bounds(node.position());
        let data = &node.data;
        let accent = data.kind.accent();

        let frame = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", CORNER_RADIUS)
            .set("fill", BODY_FILL);
        let frame = apply_stroke!(frame, &StrokeDefinition::new(accent, 2.0));

        let mut group = svg_element::Group::new()
            .set("id", format!("class-{}", node.id))
            .set("class", "class")
            .add(frame);

        // A free-text stereotype takes precedence over the one implied by the kind
        let stereotype = if data.stereotype.trim().is_empty() {
            data.kind.stereotype().map(str::to_string)
        } else {
            Some(format!("«{}»", data.stereotype.trim()))
        };

        let center_x = bounds.center().x();
        let name_y = match stereotype {
            Some(stereotype) => {
                let caption = text_line(Point::new(center_x, bounds.min_y() + 16.0), &stereotype)
                    .set("text-anchor", "middle")
                    .set("font-size", 10)
                    .set("fill", &accent);
                group = group.add(caption);
                bounds.min_y() + 34.0
            }
            None => bounds.min_y() + 27.0,
        };

        let name = text_line(Point::new(center_x, name_y), &data.name)
            .set("text-anchor", "middle")
            .set("font-size", 14)
            .set("font-weight", "bold")
            .set("fill", NAME_FILL);
        group = group.add(name);

        let mut cursor = bounds.min_y() + HEADER_HEIGHT;
        group = group.add(separator(bounds.min_x(), bounds.max_x(), cursor));

        for attribute in &data.attributes {
            cursor += LINE_HEIGHT;
            group = group.add(member_line(bounds.min_x(), cursor, &attribute.to_string()));
        }

        cursor += LINE_HEIGHT / 2.0;
        group = group.add(separator(bounds.min_x(), bounds.max_x(), cursor));

        for operation in &data.operations {
            cursor += LINE_HEIGHT;
            group = group.add(member_line(bounds.min_x(), cursor, &operation.to_string()));
        }

        group
    }
}

fn separator(min_x: f32, max_x: f32, y: f32) -> svg_element::Line {
    svg_element::Line::new()
        .set("x1", min_x)
        .set("y1", y)
        .set("x2", max_x)
        .set("y2", y)
        .set("stroke", SEPARATOR_STROKE)
        .set("stroke-width", 1)
}

fn member_line(min_x: f32, y: f32, content: &str) -> svg_element::Text {
    text_line(Point::new(min_x + PADDING_X, y), content)
        .set("text-anchor", "start")
        .set("font-size", 12)
        .set("fill", MEMBER_FILL)
}
