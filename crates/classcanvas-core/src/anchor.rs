//! Connection anchors on the boundary of a class node.
//!
//! Every node exposes eight anchors: the midpoint of each side and the four
//! corners of its bounding rectangle. Anchors are always derived from the
//! node's live position and never cached.
//!
//! ```text
//!   nw ────── n ────── ne
//!    │                  │
//!    w                  e
//!    │                  │
//!   sw ────── s ────── se
//! ```
//!
//! # Corner schemes
//!
//! Diagrams saved by earlier editor versions placed the `nw` anchor on the
//! bottom-left corner, on top of `sw`. [`CornerScheme::Legacy`] reproduces
//! that placement; [`CornerScheme::Corrected`] (the default) puts `nw` on the
//! top-left corner.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Bounds, Point, Size};

/// Default width of every class node on the canvas.
pub const NODE_WIDTH: f32 = 220.0;

/// Default height of every class node on the canvas.
pub const NODE_HEIGHT: f32 = 140.0;

/// Compass label of an anchor.
///
/// The declaration order is the enumeration order used for tie-breaking in
/// [`NodeGeometry::nearest_anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// All directions in enumeration order.
    pub const ALL: [Direction; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Returns the lower-case label used in persisted edges.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::NE => "ne",
            Self::E => "e",
            Self::SE => "se",
            Self::S => "s",
            Self::SW => "sw",
            Self::W => "w",
            Self::NW => "nw",
        }
    }

    /// Returns true for anchors that leave the node sideways (`e` and `w`).
    ///
    /// Every other anchor, corners included, is treated as vertical-facing
    /// by the router.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::E | Self::W)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an anchor label is not one of the eight compass labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown anchor `{0}`, valid anchors: n, ne, e, se, s, sw, w, nw")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Self::N),
            "ne" => Ok(Self::NE),
            "e" => Ok(Self::E),
            "se" => Ok(Self::SE),
            "s" => Ok(Self::S),
            "sw" => Ok(Self::SW),
            "w" => Ok(Self::W),
            "nw" => Ok(Self::NW),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// A resolved anchor: an absolute canvas point tagged with its direction.
///
/// `key` is only populated by [`NodeGeometry::nearest_anchor`], mirroring the
/// label under which the anchor was found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnchorPoint {
    point: Point,
    direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<Direction>,
}

impl AnchorPoint {
    pub fn new(point: Point, direction: Direction) -> Self {
        Self {
            point,
            direction,
            key: None,
        }
    }

    /// Returns the absolute canvas position of the anchor
    pub fn point(self) -> Point {
        self.point
    }

    pub fn x(self) -> f32 {
        self.point.x()
    }

    pub fn y(self) -> f32 {
        self.point.y()
    }

    /// Returns the compass label of the anchor
    pub fn direction(self) -> Direction {
        self.direction
    }

    /// Returns the lookup key, set when found by nearest-match
    pub fn key(self) -> Option<Direction> {
        self.key
    }

    fn with_key(mut self) -> Self {
        self.key = Some(self.direction);
        self
    }
}

/// The eight anchors of one node at one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    n: AnchorPoint,
    ne: AnchorPoint,
    e: AnchorPoint,
    se: AnchorPoint,
    s: AnchorPoint,
    sw: AnchorPoint,
    w: AnchorPoint,
    nw: AnchorPoint,
}

impl Anchors {
    /// Returns the anchor for `direction`.
    pub fn get(&self, direction: Direction) -> AnchorPoint {
        match direction {
            Direction::N => self.n,
            Direction::NE => self.ne,
            Direction::E => self.e,
            Direction::SE => self.se,
            Direction::S => self.s,
            Direction::SW => self.sw,
            Direction::W => self.w,
            Direction::NW => self.nw,
        }
    }

    /// Iterates over all anchors in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = AnchorPoint> + '_ {
        Direction::ALL.into_iter().map(|direction| self.get(direction))
    }
}

/// Placement of the `nw` corner anchor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerScheme {
    /// `nw` sits on the top-left corner.
    #[default]
    Corrected,
    /// `nw` duplicates `sw` on the bottom-left corner.
    Legacy,
}

/// Fixed footprint shared by every node, plus the corner scheme used to
/// place anchors on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    size: Size,
    corners: CornerScheme,
}

impl Default for NodeGeometry {
    fn default() -> Self {
        Self {
            size: Size::new(NODE_WIDTH, NODE_HEIGHT),
            corners: CornerScheme::default(),
        }
    }
}

impl NodeGeometry {
    pub fn new(size: Size, corners: CornerScheme) -> Self {
        Self { size, corners }
    }

    /// Returns the node footprint
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the corner scheme
    pub fn corners(&self) -> CornerScheme {
        self.corners
    }

    /// Returns the bounding rectangle of a node whose top-left corner is `position`.
    pub fn bounds(&self, position: Point) -> Bounds {
        Bounds::from_origin(position, self.size)
    }

    /// Returns the center of a node whose top-left corner is `position`.
    pub fn center(&self, position: Point) -> Point {
        position.add_point(self.size.half())
    }

    /// Computes the eight anchors of a node whose top-left corner is `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use classcanvas_core::anchor::{Direction, NodeGeometry};
    /// # use classcanvas_core::geometry::Point;
    /// let anchors = NodeGeometry::default().anchors(Point::new(100.0, 150.0));
    ///
    /// let east = anchors.get(Direction::E);
    /// assert_eq!((east.x(), east.y()), (320.0, 220.0));
    ///
    /// let north = anchors.get(Direction::N);
    /// assert_eq!((north.x(), north.y()), (210.0, 150.0));
    /// ```
    pub fn anchors(&self, position: Point) -> Anchors {
        let (x, y) = (position.x(), position.y());
        let (w, h) = (self.size.width(), self.size.height());
        let at = |px: f32, py: f32, direction| AnchorPoint::new(Point::new(px, py), direction);

        let nw = match self.corners {
            CornerScheme::Corrected => at(x, y, Direction::NW),
            CornerScheme::Legacy => at(x, y + h, Direction::NW),
        };

        Anchors {
            n: at(x + w / 2.0, y, Direction::N),
            ne: at(x + w, y, Direction::NE),
            e: at(x + w, y + h / 2.0, Direction::E),
            se: at(x + w, y + h, Direction::SE),
            s: at(x + w / 2.0, y + h, Direction::S),
            sw: at(x, y + h, Direction::SW),
            w: at(x, y + h / 2.0, Direction::W),
            nw,
        }
    }

    /// Finds the anchor closest to `target`, with its `key` populated.
    ///
    /// Ties are resolved in favour of the earliest direction in
    /// [`Direction::ALL`]. The lookup never fails.
    pub fn nearest_anchor(&self, position: Point, target: Point) -> AnchorPoint {
        let anchors = self.anchors(position);

        let mut nearest = anchors.get(Direction::N);
        let mut min_dist = f32::INFINITY;
        for anchor in anchors.iter() {
            let dist = anchor.point().distance(target);
            if dist < min_dist {
                min_dist = dist;
                nearest = anchor;
            }
        }

        nearest.with_key()
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Opposite sides are exactly one footprint apart.
    fn check_sides_are_one_footprint_apart(position: Point) -> Result<(), TestCaseError> {
        let anchors = NodeGeometry::default().anchors(position);
        let n = anchors.get(Direction::N);
        let s = anchors.get(Direction::S);
        let e = anchors.get(Direction::E);
        let w = anchors.get(Direction::W);

        prop_assert!(approx_eq!(f32, n.y(), s.y() - NODE_HEIGHT, epsilon = 0.001));
        prop_assert!(approx_eq!(f32, e.x(), w.x() + NODE_WIDTH, epsilon = 0.001));
        Ok(())
    }

    /// Translating the node translates every anchor by the same offset.
    fn check_anchors_translate_rigidly(
        position: Point,
        offset: Point,
    ) -> Result<(), TestCaseError> {
        let geometry = NodeGeometry::default();
        let before = geometry.anchors(position);
        let after = geometry.anchors(position.add_point(offset));

        for direction in Direction::ALL {
            let moved = after.get(direction).point().sub_point(before.get(direction).point());
            prop_assert!(approx_eq!(f32, moved.x(), offset.x(), epsilon = 0.01));
            prop_assert!(approx_eq!(f32, moved.y(), offset.y(), epsilon = 0.01));
        }
        Ok(())
    }

    /// The nearest anchor is one of the node's anchors and no other anchor is closer.
    fn check_nearest_anchor_is_minimal(
        position: Point,
        target: Point,
    ) -> Result<(), TestCaseError> {
        let geometry = NodeGeometry::default();
        let anchors = geometry.anchors(position);
        let nearest = geometry.nearest_anchor(position, target);

        prop_assert_eq!(anchors.get(nearest.direction()).point(), nearest.point());
        prop_assert_eq!(nearest.key(), Some(nearest.direction()));

        let best = nearest.point().distance(target);
        for anchor in anchors.iter() {
            prop_assert!(best <= anchor.point().distance(target));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn sides_are_one_footprint_apart(position in point_strategy()) {
            check_sides_are_one_footprint_apart(position)?;
        }

        #[test]
        fn anchors_translate_rigidly(position in point_strategy(), offset in point_strategy()) {
            check_anchors_translate_rigidly(position, offset)?;
        }

        #[test]
        fn nearest_anchor_is_minimal(position in point_strategy(), target in point_strategy()) {
            check_nearest_anchor_is_minimal(position, target)?;
        }
    }
}
