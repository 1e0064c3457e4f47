//! Canvas coordinates.
//!
//! Positions are stored in canvas space, which shares its axes with SVG
//! user space: `x` grows to the right and `y` grows downward. The canvas has
//! no edges, so negative coordinates are valid node positions.
//!
//! [`Point`] doubles as a 2D vector for pan offsets and deltas, [`Size`] is
//! the extent of a class box, and [`Bounds`] is an axis-aligned rectangle
//! used for node frames and the exported document area.

use serde::{Deserialize, Serialize};

/// A position or offset on the canvas.
///
/// ```
/// # use classcanvas_core::geometry::Point;
/// let node = Point::new(100.0, 80.0);
/// let pan = Point::new(-20.0, 15.0);
///
/// assert_eq!(node.add_point(pan), Point::new(80.0, 95.0));
/// assert_eq!(node.sub_point(pan), Point::new(120.0, 65.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// True for the origin, which is also the unpanned viewport offset.
    pub fn is_zero(self) -> bool {
        self == Self::default()
    }

    pub fn add_point(self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }

    pub fn sub_point(self, offset: Point) -> Self {
        Self::new(self.x - offset.x, self.y - offset.y)
    }

    /// Point halfway along the segment to `other`.
    pub fn midpoint(self, other: Point) -> Self {
        self.add_point(other).scale(0.5)
    }

    /// Straight-line distance to `other`.
    ///
    /// ```
    /// # use classcanvas_core::geometry::Point;
    /// assert_eq!(Point::new(1.0, 1.0).distance(Point::new(4.0, 5.0)), 5.0);
    /// ```
    pub fn distance(self, other: Point) -> f32 {
        let delta = other.sub_point(self);
        delta.x.hypot(delta.y)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// Width and height of a class box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Offset from a box's top-left corner to its center.
    pub fn half(self) -> Point {
        Point::new(self.width, self.height).scale(0.5)
    }
}

/// Axis-aligned rectangle spanned by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    top_left: Point,
    bottom_right: Point,
}

impl Bounds {
    /// Frame of a box of `size` placed at `origin`.
    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self {
            top_left: origin,
            bottom_right: origin.add_point(Point::new(size.width, size.height)),
        }
    }

    pub fn min_x(self) -> f32 {
        self.top_left.x
    }

    pub fn min_y(self) -> f32 {
        self.top_left.y
    }

    pub fn max_x(self) -> f32 {
        self.bottom_right.x
    }

    pub fn max_y(self) -> f32 {
        self.bottom_right.y
    }

    pub fn width(self) -> f32 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(self) -> f32 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn center(self) -> Point {
        self.top_left.midpoint(self.bottom_right)
    }

    /// Smallest rectangle covering both frames.
    ///
    /// ```
    /// # use classcanvas_core::geometry::{Bounds, Point, Size};
    /// let customer = Bounds::from_origin(Point::new(100.0, 150.0), Size::new(220.0, 140.0));
    /// let order = Bounds::from_origin(Point::new(500.0, 150.0), Size::new(220.0, 140.0));
    ///
    /// let both = customer.merge(&order);
    /// assert_eq!(both.width(), 620.0);
    /// assert_eq!(both.height(), 140.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        self.include_point(other.top_left)
            .include_point(other.bottom_right)
    }

    /// Grows the rectangle just enough to cover `point`.
    pub fn include_point(&self, point: Point) -> Self {
        Self {
            top_left: Point::new(self.top_left.x.min(point.x), self.top_left.y.min(point.y)),
            bottom_right: Point::new(
                self.bottom_right.x.max(point.x),
                self.bottom_right.y.max(point.y),
            ),
        }
    }

    /// Pads every side by `margin`.
    pub fn expand(&self, margin: f32) -> Self {
        let pad = Point::new(margin, margin);
        Self {
            top_left: self.top_left.sub_point(pad),
            bottom_right: self.bottom_right.add_point(pad),
        }
    }
}

/// Rounds `value` to the closest grid line, halves rounding toward +∞.
///
/// Snapping is off when `grid_size` is zero or negative.
///
/// ```
/// # use classcanvas_core::geometry::snap_to_grid;
/// assert_eq!(snap_to_grid(109.0, 20.0), 100.0);
/// assert_eq!(snap_to_grid(111.0, 20.0), 120.0);
/// assert_eq!(snap_to_grid(-31.0, 20.0), -40.0);
/// assert_eq!(snap_to_grid(-30.0, 20.0), -20.0);
/// assert_eq!(snap_to_grid(17.3, 0.0), 17.3);
/// ```
pub fn snap_to_grid(value: f32, grid_size: f32) -> f32 {
    if grid_size > 0.0 {
        (value / grid_size + 0.5).floor() * grid_size
    } else {
        value
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn canvas_point() -> impl Strategy<Value = Point> {
        (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn check_midpoint_lies_in_merged_frame(a: Point, b: Point) -> Result<(), TestCaseError> {
        let area = Bounds::from_origin(a, Size::default()).include_point(b);
        let mid = a.midpoint(b);
        prop_assert!(mid.x() >= area.min_x() && mid.x() <= area.max_x());
        prop_assert!(mid.y() >= area.min_y() && mid.y() <= area.max_y());
        Ok(())
    }

    fn check_snapped_value_is_on_grid(value: f32, grid: f32) -> Result<(), TestCaseError> {
        let snapped = snap_to_grid(value, grid);
        prop_assert!((snapped - value).abs() <= grid / 2.0 + 0.01);
        let cells = snapped / grid;
        prop_assert!(approx_eq!(f32, cells, cells.round(), epsilon = 0.01));
        Ok(())
    }

    proptest! {
        #[test]
        fn midpoint_lies_in_merged_frame(a in canvas_point(), b in canvas_point()) {
            check_midpoint_lies_in_merged_frame(a, b)?;
        }

        #[test]
        fn distance_is_symmetric(a in canvas_point(), b in canvas_point()) {
            prop_assert!(approx_eq!(f32, a.distance(b), b.distance(a)));
        }

        #[test]
        fn snapped_value_is_on_grid(value in -5000.0f32..5000.0, grid in 1.0f32..100.0) {
            check_snapped_value_is_on_grid(value, grid)?;
        }
    }
}
