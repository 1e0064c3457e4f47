//! Stroke definitions for edges and class box frames.
//!
//! A [`StrokeDefinition`] maps onto the SVG presentation attributes through
//! [`apply_stroke!`](crate::apply_stroke!):
//!
//! | Property | SVG attribute |
//! |----------|---------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width` |
//! | `style` | `stroke-dasharray` (dashed only) |
//! | `cap` | `stroke-linecap` |
//! | `join` | `stroke-linejoin` |

use crate::color::Color;

/// Line pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// 6px dash, 4px gap
    Dashed,
}

impl StrokeStyle {
    /// Dash array for patterned styles.
    pub fn dasharray(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
        }
    }
}

/// Shape of line endpoints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

impl StrokeCap {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// Shape of the elbows of a polyline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
}

impl StrokeJoin {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
        }
    }
}

/// How a line or frame is stroked.
///
/// # Examples
///
/// ```
/// use classcanvas_core::color::Color;
/// use classcanvas_core::draw::{StrokeCap, StrokeDefinition, StrokeStyle};
///
/// let stroke = StrokeDefinition::new(Color::new("#34d399").unwrap(), 2.0)
///     .with_style(StrokeStyle::Dashed)
///     .with_cap(StrokeCap::Round);
/// assert_eq!(stroke.style(), StrokeStyle::Dashed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// A solid stroke with butt caps and miter joins.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: StrokeJoin) -> Self {
        self.join = join;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }
}

/// Sets the stroke attributes of an SVG element from a [`StrokeDefinition`].
///
/// # Examples
///
/// ```
/// use classcanvas_core::color::Color;
/// use classcanvas_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
/// let rect = svg_element::Rectangle::new().set("width", 220).set("height", 140);
/// let rect = classcanvas_core::apply_stroke!(rect, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let mut elem = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
            .set("stroke-linecap", stroke.cap().to_svg_value())
            .set("stroke-linejoin", stroke.join().to_svg_value());

        if let Some(dasharray) = stroke.style().dasharray() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
