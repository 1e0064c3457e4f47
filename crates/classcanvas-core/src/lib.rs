//! ClassCanvas Core Types and Routing
//!
//! This crate provides the geometry and routing engine behind ClassCanvas
//! class diagrams, together with the records it operates on. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Anchors**: The eight connection anchors of a node ([`anchor`] module)
//! - **Routing**: Orthogonal edge routing ([`routing`] module)
//! - **Semantic**: Nodes, edges and relationship kinds ([`semantic`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Stroke and marker definitions ([`draw`] module)
//!
//! Everything here is pure. Anchors and paths are recomputed from the current
//! node positions on every call and never cached.

pub mod anchor;
pub mod color;
pub mod draw;
pub mod geometry;
pub mod routing;
pub mod semantic;

use anchor::{AnchorPoint, Anchors, Direction, NodeGeometry};
use geometry::Point;
use routing::{PathResult, Router};
use semantic::Node;

/// Returns the eight anchors of `node` using the default node footprint.
pub fn anchors_of(node: &Node) -> Anchors {
    NodeGeometry::default().anchors(node.position())
}

/// Returns the anchor of `node` closest to `(x, y)`, using the default node
/// footprint.
///
/// ```
/// # use classcanvas_core::anchor::Direction;
/// # use classcanvas_core::geometry::Point;
/// # use classcanvas_core::semantic::{ClassData, EntityKind, Node};
/// let node = Node::new("a", Point::new(0.0, 0.0), ClassData::new("A", EntityKind::Class));
/// let anchor = classcanvas_core::nearest_anchor(&node, 230.0, 75.0);
/// assert_eq!(anchor.key(), Some(Direction::E));
/// ```
pub fn nearest_anchor(node: &Node, x: f32, y: f32) -> AnchorPoint {
    NodeGeometry::default().nearest_anchor(node.position(), Point::new(x, y))
}

/// Routes a path between two nodes with the default router.
pub fn route(
    from: Option<&Node>,
    to: Option<&Node>,
    start: Option<Direction>,
    end: Option<Direction>,
) -> PathResult {
    Router::default().route(from, to, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use semantic::{ClassData, EntityKind};

    fn node(x: f32, y: f32) -> Node {
        Node::new("n", Point::new(x, y), ClassData::new("N", EntityKind::Class))
    }

    #[test]
    fn test_free_helpers_use_default_geometry() {
        let a = node(0.0, 0.0);
        assert_eq!(anchors_of(&a).get(Direction::SE).point(), Point::new(220.0, 140.0));
        assert_eq!(nearest_anchor(&a, 110.0, -10.0).direction(), Direction::N);
    }

    #[test]
    fn test_route_pure_vertical() {
        let a = node(0.0, 0.0);
        let b = node(0.0, 300.0);
        let path = route(Some(&a), Some(&b), None, None);
        assert_eq!(path.start().unwrap().direction(), Direction::S);
        assert_eq!(path.end().unwrap().direction(), Direction::N);
        assert!(route(None, Some(&b), None, None).is_empty());
    }
}
