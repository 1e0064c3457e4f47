//! Orthogonal edge routing between class nodes.
//!
//! The [`Router`] resolves the start and end anchors of an edge, picking them
//! automatically where none is given, and builds an axis-aligned polyline
//! `start -> waypoint -> waypoint -> end` together with its visual center.
//!
//! Routing is a pure function of the node positions and the anchor
//! selection. It is cheap enough to run for every edge on every state change.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    anchor::{AnchorPoint, Direction, NodeGeometry},
    geometry::Point,
    semantic::{Edge, Node, NodeId},
};

/// How ends without an explicit anchor are chosen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoAnchorPolicy {
    /// Explicit anchors are always honored. A missing end is picked on its
    /// own, facing the anchor already resolved at the other end.
    #[default]
    Independent,
    /// If either end is missing, both ends are picked from the relative
    /// node positions and explicit anchors are ignored.
    Bundled,
}

/// Result of routing one edge.
///
/// An empty result (no points, center at the origin, no anchors) stands for
/// an edge whose nodes could not both be found. It renders as nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    points: Vec<Point>,
    center: Point,
    start: Option<AnchorPoint>,
    end: Option<AnchorPoint>,
}

impl PathResult {
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            center: Point::default(),
            start: None,
            end: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Polyline vertices in drawing order.
    ///
    /// Always four points for a routed edge. The two waypoints coincide when
    /// the path has a single elbow.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Label anchor at the visual middle of the path
    pub fn center(&self) -> Point {
        self.center
    }

    /// Anchor the path leaves from
    pub fn start(&self) -> Option<AnchorPoint> {
        self.start
    }

    /// Anchor the path arrives at
    pub fn end(&self) -> Option<AnchorPoint> {
        self.end
    }

    /// Serializes the polyline as SVG path data, `M x y L x y L x y L x y`.
    ///
    /// Returns an empty string for an empty result.
    pub fn path_data(&self) -> String {
        let mut data = String::new();
        for (i, point) in self.points.iter().enumerate() {
            let command = if i == 0 { "M" } else { " L" };
            data.push_str(&format!("{command} {} {}", point.x(), point.y()));
        }
        data
    }
}

/// Routes edges between nodes that share one [`NodeGeometry`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Router {
    geometry: NodeGeometry,
    policy: AutoAnchorPolicy,
}

impl Router {
    pub fn new(geometry: NodeGeometry, policy: AutoAnchorPolicy) -> Self {
        Self { geometry, policy }
    }

    pub fn geometry(&self) -> &NodeGeometry {
        &self.geometry
    }

    pub fn policy(&self) -> AutoAnchorPolicy {
        self.policy
    }

    /// Routes a path from `from` to `to`.
    ///
    /// `start` and `end` pin the path to explicit anchors; ends left as
    /// `None` are picked automatically. If either node is missing the empty
    /// result is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use classcanvas_core::geometry::Point;
    /// # use classcanvas_core::routing::Router;
    /// # use classcanvas_core::semantic::{ClassData, EntityKind, Node};
    /// let a = Node::new("a", Point::new(100.0, 150.0), ClassData::new("A", EntityKind::Class));
    /// let b = Node::new("b", Point::new(500.0, 150.0), ClassData::new("B", EntityKind::Class));
    ///
    /// let path = Router::default().route(Some(&a), Some(&b), None, None);
    /// assert_eq!(path.path_data(), "M 320 220 L 410 220 L 410 220 L 500 220");
    /// assert_eq!(path.center(), Point::new(410.0, 220.0));
    /// ```
    pub fn route(
        &self,
        from: Option<&Node>,
        to: Option<&Node>,
        start: Option<Direction>,
        end: Option<Direction>,
    ) -> PathResult {
        let (Some(from), Some(to)) = (from, to) else {
            return PathResult::empty();
        };

        let (start, end) = self.resolve_anchors(from, to, start, end);
        let (first, second) = Self::waypoints(start, end);

        trace!(
            from = from.id.as_str(),
            to = to.id.as_str(),
            start = start.direction().as_str(),
            end = end.direction().as_str();
            "Routed path"
        );

        PathResult {
            points: vec![start.point(), first, second, end.point()],
            center: first.midpoint(second),
            start: Some(start),
            end: Some(end),
        }
    }

    /// Routes a stored edge, looking its nodes up through `lookup`.
    ///
    /// Anchor labels that do not name an anchor are treated as absent.
    pub fn route_edge<'a, F>(&self, lookup: F, edge: &Edge) -> PathResult
    where
        F: Fn(&NodeId) -> Option<&'a Node>,
    {
        let from = lookup(&edge.from);
        let to = lookup(&edge.to);
        if from.is_none() || to.is_none() {
            debug!(
                edge_id = edge.id.as_str(),
                from = edge.from.as_str(),
                to = edge.to.as_str();
                "Edge references a missing node"
            );
        }

        self.route(from, to, edge.start_direction(), edge.end_direction())
    }

    fn resolve_anchors(
        &self,
        from: &Node,
        to: &Node,
        start: Option<Direction>,
        end: Option<Direction>,
    ) -> (AnchorPoint, AnchorPoint) {
        let from_anchors = self.geometry.anchors(from.position());
        let to_anchors = self.geometry.anchors(to.position());

        let (start, end) = match (self.policy, start, end) {
            (_, Some(start), Some(end)) => (start, end),
            (AutoAnchorPolicy::Bundled, _, _) | (_, None, None) => {
                facing_pair(to.position().sub_point(from.position()))
            }
            (AutoAnchorPolicy::Independent, Some(start), None) => {
                let toward = self
                    .geometry
                    .center(to.position())
                    .sub_point(from_anchors.get(start).point());
                (start, facing_pair(toward).1)
            }
            (AutoAnchorPolicy::Independent, None, Some(end)) => {
                let toward = to_anchors
                    .get(end)
                    .point()
                    .sub_point(self.geometry.center(from.position()));
                (facing_pair(toward).0, end)
            }
        };

        (from_anchors.get(start), to_anchors.get(end))
    }

    /// Picks the two waypoints between resolved anchors.
    fn waypoints(start: AnchorPoint, end: AnchorPoint) -> (Point, Point) {
        let (s, e) = (start.point(), end.point());
        match (
            start.direction().is_horizontal(),
            end.direction().is_horizontal(),
        ) {
            (true, true) => {
                let mid_x = (s.x() + e.x()) / 2.0;
                (Point::new(mid_x, s.y()), Point::new(mid_x, e.y()))
            }
            (false, false) => {
                let mid_y = (s.y() + e.y()) / 2.0;
                (Point::new(s.x(), mid_y), Point::new(e.x(), mid_y))
            }
            (true, false) => {
                let elbow = Point::new(e.x(), s.y());
                (elbow, elbow)
            }
            (false, true) => {
                let elbow = Point::new(s.x(), e.y());
                (elbow, elbow)
            }
        }
    }
}

/// Returns the pair of facing anchors for a displacement from the source to
/// the target.
///
/// Horizontal separation must strictly dominate; ties go vertical.
fn facing_pair(delta: Point) -> (Direction, Direction) {
    if delta.x().abs() > delta.y().abs() {
        if delta.x() > 0.0 {
            (Direction::E, Direction::W)
        } else {
            (Direction::W, Direction::E)
        }
    } else if delta.y() > 0.0 {
        (Direction::S, Direction::N)
    } else {
        (Direction::N, Direction::S)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        anchor::CornerScheme,
        geometry::Size,
        semantic::{ClassData, EntityKind, RelationshipKind},
    };

    fn node(id: &str, x: f32, y: f32) -> Node {
        Node::new(id, Point::new(x, y), ClassData::new(id, EntityKind::Class))
    }

    fn directions(path: &PathResult) -> (Direction, Direction) {
        (
            path.start().unwrap().direction(),
            path.end().unwrap().direction(),
        )
    }

    #[test]
    fn test_route_side_by_side_nodes() {
        let a = node("a", 100.0, 150.0);
        let b = node("b", 500.0, 150.0);
        let path = Router::default().route(Some(&a), Some(&b), None, None);

        assert_eq!(path.start().unwrap().point(), Point::new(320.0, 220.0));
        assert_eq!(path.end().unwrap().point(), Point::new(500.0, 220.0));
        assert_eq!(
            path.points(),
            &[
                Point::new(320.0, 220.0),
                Point::new(410.0, 220.0),
                Point::new(410.0, 220.0),
                Point::new(500.0, 220.0),
            ]
        );
        assert_eq!(path.center(), Point::new(410.0, 220.0));
    }

    #[test]
    fn test_route_missing_node_is_empty() {
        let a = node("a", 0.0, 0.0);
        let router = Router::default();

        for path in [
            router.route(None, Some(&a), None, None),
            router.route(Some(&a), None, Some(Direction::N), Some(Direction::S)),
            router.route(None, None, None, None),
        ] {
            assert!(path.is_empty());
            assert_eq!(path.path_data(), "");
            assert_eq!(path.center(), Point::new(0.0, 0.0));
            assert_eq!(path.start(), None);
            assert_eq!(path.end(), None);
        }
    }

    #[test]
    fn test_auto_selection_horizontal_and_vertical() {
        let router = Router::default();
        let a = node("a", 0.0, 0.0);

        let right = node("b", 300.0, 0.0);
        let path = router.route(Some(&a), Some(&right), None, None);
        assert_eq!(directions(&path), (Direction::E, Direction::W));

        let left = node("b", -300.0, 10.0);
        let path = router.route(Some(&a), Some(&left), None, None);
        assert_eq!(directions(&path), (Direction::W, Direction::E));

        let below = node("b", 0.0, 300.0);
        let path = router.route(Some(&a), Some(&below), None, None);
        assert_eq!(directions(&path), (Direction::S, Direction::N));

        let above = node("b", 40.0, -300.0);
        let path = router.route(Some(&a), Some(&above), None, None);
        assert_eq!(directions(&path), (Direction::N, Direction::S));
    }

    #[test]
    fn test_auto_selection_tie_goes_vertical() {
        let a = node("a", 0.0, 0.0);
        let b = node("b", 100.0, 100.0);
        let path = Router::default().route(Some(&a), Some(&b), None, None);

        assert_eq!(directions(&path), (Direction::S, Direction::N));
        // s = (110, 140), n = (210, 100), horizontal middle segment at y = 120
        assert_eq!(
            path.path_data(),
            "M 110 140 L 110 120 L 210 120 L 210 100"
        );
        assert_eq!(path.center(), Point::new(160.0, 120.0));
    }

    #[test]
    fn test_explicit_anchors_override_auto_selection() {
        let a = node("a", 0.0, 0.0);
        let b = node("b", 300.0, 0.0);
        let path =
            Router::default().route(Some(&a), Some(&b), Some(Direction::N), Some(Direction::S));

        assert_eq!(directions(&path), (Direction::N, Direction::S));
        assert_eq!(path.start().unwrap().point(), Point::new(110.0, 0.0));
        assert_eq!(path.end().unwrap().point(), Point::new(410.0, 140.0));
        assert_eq!(path.center(), Point::new(260.0, 70.0));
    }

    #[test]
    fn test_mixed_facing_collapses_to_single_elbow() {
        let a = node("a", 0.0, 0.0);
        let b = node("b", 400.0, 300.0);
        let router = Router::default();

        let path = router.route(Some(&a), Some(&b), Some(Direction::E), Some(Direction::N));
        assert_eq!(path.path_data(), "M 220 70 L 510 70 L 510 70 L 510 300");
        assert_eq!(path.center(), Point::new(510.0, 70.0));

        let path = router.route(Some(&a), Some(&b), Some(Direction::S), Some(Direction::W));
        assert_eq!(path.path_data(), "M 110 140 L 110 370 L 110 370 L 400 370");
        assert_eq!(path.center(), Point::new(110.0, 370.0));
    }

    #[test]
    fn test_corner_anchors_are_vertical_facing() {
        let a = node("a", 0.0, 0.0);
        let b = node("b", 400.0, 0.0);
        let path =
            Router::default().route(Some(&a), Some(&b), Some(Direction::NE), Some(Direction::W));

        // ne is not e/w, so the elbow sits below/above the start
        assert_eq!(path.points()[1], Point::new(220.0, 70.0));
        assert_eq!(path.points()[1], path.points()[2]);
    }

    #[test]
    fn test_independent_policy_keeps_explicit_start() {
        let a = node("a", 0.0, 0.0);
        let b = node("b", 400.0, 0.0);
        let path = Router::default().route(Some(&a), Some(&b), Some(Direction::S), None);

        assert_eq!(directions(&path), (Direction::S, Direction::W));
        assert_eq!(path.start().unwrap().point(), Point::new(110.0, 140.0));
        assert_eq!(path.end().unwrap().point(), Point::new(400.0, 70.0));
    }

    #[test]
    fn test_independent_policy_keeps_explicit_end() {
        let a = node("a", 0.0, 0.0);
        let b = node("b", 0.0, 400.0);
        let path = Router::default().route(Some(&a), Some(&b), None, Some(Direction::W));

        assert_eq!(directions(&path), (Direction::S, Direction::W));
    }

    #[test]
    fn test_bundled_policy_ignores_partial_selection() {
        let a = node("a", 0.0, 0.0);
        let b = node("b", 400.0, 0.0);
        let router = Router::new(NodeGeometry::default(), AutoAnchorPolicy::Bundled);

        let path = router.route(Some(&a), Some(&b), Some(Direction::S), None);
        assert_eq!(directions(&path), (Direction::E, Direction::W));

        let path = router.route(Some(&a), Some(&b), Some(Direction::S), Some(Direction::S));
        assert_eq!(directions(&path), (Direction::S, Direction::S));
    }

    #[test]
    fn test_legacy_corner_scheme_routes_from_bottom_left() {
        let geometry = NodeGeometry::new(Size::new(220.0, 140.0), CornerScheme::Legacy);
        let router = Router::new(geometry, AutoAnchorPolicy::default());
        let a = node("a", 0.0, 0.0);
        let b = node("b", 400.0, 0.0);

        let path = router.route(Some(&a), Some(&b), Some(Direction::NW), Some(Direction::W));
        assert_eq!(path.start().unwrap().point(), Point::new(0.0, 140.0));
    }

    #[test]
    fn test_route_edge_resolves_nodes_and_labels() {
        let nodes = [node("1", 100.0, 150.0), node("2", 500.0, 150.0)];
        let lookup = |id: &NodeId| nodes.iter().find(|n| &n.id == id);
        let router = Router::default();

        let mut edge = Edge::new(
            "e1",
            NodeId::new("1"),
            NodeId::new("2"),
            RelationshipKind::Association,
        );
        let path = router.route_edge(lookup, &edge);
        assert_eq!(directions(&path), (Direction::E, Direction::W));

        edge.start_anchor = Some("bogus".to_string());
        edge.end_anchor = Some("n".to_string());
        let path = router.route_edge(lookup, &edge);
        assert_eq!(path.end().unwrap().direction(), Direction::N);

        edge.to = NodeId::new("gone");
        assert!(router.route_edge(lookup, &edge).is_empty());
    }

    #[test]
    fn test_path_data_format() {
        let a = node("a", 0.5, 0.0);
        let b = node("b", 300.0, 0.0);
        let path = Router::default().route(Some(&a), Some(&b), None, None);
        assert!(path.path_data().starts_with("M 220.5 70 L "));
        assert_eq!(path.path_data().matches(" L ").count(), 3);
    }
}
