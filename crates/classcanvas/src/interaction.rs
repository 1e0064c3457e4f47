//! Transient editing state: viewport, drags and in-progress connections.
//!
//! Nothing here renders. Callers feed screen-space input (cursor positions
//! relative to the canvas element, wheel deltas, key presses) and read back
//! canvas-space results.
//!
//! - [`Viewport`] - zoom and pan, and conversion between screen and canvas
//! - [`PanDrag`] - dragging the canvas background
//! - [`NodeDrag`] - dragging a node with grid snapping
//! - [`ConnectionDraft`] - the anchor-click state machine creating edges

use log::{debug, info};

use classcanvas_core::{
    anchor::{AnchorPoint, Direction, NodeGeometry},
    geometry::{Point, Size, snap_to_grid},
    semantic::{EdgeId, Node, NodeId, RelationshipKind},
};

use crate::{CanvasError, config::CanvasConfig, diagram::Diagram};

/// Zoom change per unit of wheel delta.
pub const ZOOM_SENSITIVITY: f32 = 0.001;

/// Zoom change of one zoom button press.
pub const ZOOM_STEP: f32 = 0.1;

/// Pan distance of one pan button press, in screen pixels.
pub const PAN_STEP: f32 = 50.0;

/// Direction of a pan button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Zoom factor and pan offset of the canvas.
///
/// A canvas point `c` is shown at screen point `c * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f32,
    pan: Point,
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

impl Viewport {
    /// Creates an unzoomed, unpanned viewport with the given zoom limits.
    ///
    /// Limits passed in the wrong order are swapped.
    pub fn new(min_zoom: f32, max_zoom: f32) -> Self {
        Self {
            zoom: 1.0,
            pan: Point::default(),
            min_zoom: min_zoom.min(max_zoom),
            max_zoom: min_zoom.max(max_zoom),
        }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.min_zoom(), config.max_zoom())
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Converts a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        screen.sub_point(self.pan).scale(1.0 / self.zoom)
    }

    /// Converts a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        canvas.scale(self.zoom).add_point(self.pan)
    }

    /// Zooms by a wheel delta, keeping the canvas point under `cursor` fixed.
    ///
    /// A negative delta (wheel up) zooms in.
    pub fn zoom_at(&mut self, cursor: Point, wheel_delta: f32) {
        let zoom = self.clamp_zoom(self.zoom - wheel_delta * ZOOM_SENSITIVITY);
        let factor = zoom / self.zoom;

        self.pan = cursor.sub_point(cursor.sub_point(self.pan).scale(factor));
        self.zoom = zoom;
        debug!(zoom, pan_x = self.pan.x(), pan_y = self.pan.y(); "Viewport zoomed");
    }

    /// Scrolls the canvas by a wheel delta without zooming.
    pub fn scroll_by(&mut self, delta: Point) {
        self.pan = self.pan.sub_point(delta);
    }

    /// Moves the canvas content by `delta` screen pixels.
    pub fn pan_by(&mut self, delta: Point) {
        self.pan = self.pan.add_point(delta);
    }

    /// Applies one pan button press.
    pub fn nudge(&mut self, direction: PanDirection) {
        let delta = match direction {
            PanDirection::Up => Point::new(0.0, PAN_STEP),
            PanDirection::Down => Point::new(0.0, -PAN_STEP),
            PanDirection::Left => Point::new(PAN_STEP, 0.0),
            PanDirection::Right => Point::new(-PAN_STEP, 0.0),
        };
        self.pan_by(delta);
    }

    /// Applies one zoom button press. The pan offset is left unchanged.
    pub fn zoom_step(&mut self, zoom_in: bool) {
        let step = if zoom_in { ZOOM_STEP } else { -ZOOM_STEP };
        self.zoom = self.clamp_zoom(self.zoom + step);
    }

    /// Restores zoom `1` and no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::default();
    }

    /// Where a new node should go so it appears centered in a screen of
    /// `screen` size. Never negative.
    pub fn spawn_position(&self, screen: Size, node: Size) -> Point {
        let center = self.screen_to_canvas(screen.half());
        let top_left = center.sub_point(node.half());
        Point::new(top_left.x().max(0.0), top_left.y().max(0.0))
    }

    fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

/// Dragging the canvas background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanDrag {
    grab: Point,
}

impl PanDrag {
    /// Starts a pan drag at screen point `screen`.
    pub fn begin(viewport: &Viewport, screen: Point) -> Self {
        Self {
            grab: screen.sub_point(viewport.pan()),
        }
    }

    /// Follows the cursor to `screen`.
    pub fn update(&self, viewport: &mut Viewport, screen: Point) {
        viewport.pan = screen.sub_point(self.grab);
    }
}

/// Dragging a node. The grab offset inside the node is kept while moving.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDrag {
    node: NodeId,
    offset: Point,
}

impl NodeDrag {
    /// Starts dragging `node`, grabbed at screen point `screen`.
    pub fn begin(viewport: &Viewport, node: &Node, screen: Point) -> Self {
        Self {
            node: node.id.clone(),
            offset: viewport.screen_to_canvas(screen).sub_point(node.position()),
        }
    }

    pub fn node(&self) -> &NodeId {
        &self.node
    }

    /// Returns the grid-snapped top-left corner for a cursor at `screen`.
    pub fn target(&self, viewport: &Viewport, screen: Point, grid_size: f32) -> Point {
        let raw = viewport.screen_to_canvas(screen).sub_point(self.offset);
        Point::new(
            snap_to_grid(raw.x(), grid_size),
            snap_to_grid(raw.y(), grid_size),
        )
    }

    /// Moves the dragged node to follow a cursor at `screen`.
    pub fn drag_to(
        &self,
        diagram: &mut Diagram,
        viewport: &Viewport,
        screen: Point,
        grid_size: f32,
    ) -> Result<Point, CanvasError> {
        let target = self.target(viewport, screen, grid_size);
        diagram.move_node(&self.node, target, grid_size)
    }
}

/// A connection waiting for its second anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConnection {
    from: NodeId,
    anchor: Direction,
    kind: RelationshipKind,
    origin: Point,
    cursor: Point,
}

impl PendingConnection {
    pub fn source(&self) -> &NodeId {
        &self.from
    }

    pub fn anchor(&self) -> Direction {
        self.anchor
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    /// Start and end of the preview line, in canvas coordinates.
    pub fn preview(&self) -> (Point, Point) {
        (self.origin, self.cursor)
    }
}

/// What an anchor click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorClick {
    /// A new connection was started.
    Started,
    /// The start anchor was clicked again and the connection dropped.
    Cancelled,
    /// Another anchor of the start node became the start anchor.
    Retargeted,
    /// The connection was completed with a new edge.
    Completed(EdgeId),
}

/// The anchor-click state machine that creates edges.
///
/// Clicking an anchor starts a connection of kind association. Clicking the
/// same anchor again cancels it, another anchor on the same node moves the
/// start there, and an anchor on any other node creates the edge with both
/// anchors pinned and no multiplicities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionDraft {
    pending: Option<PendingConnection>,
}

impl ConnectionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingConnection> {
        self.pending.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Handles a click on `anchor` of `node`.
    ///
    /// # Errors
    ///
    /// Completing a connection fails if the diagram rejects the edge; the
    /// pending connection is dropped in that case.
    pub fn click_anchor(
        &mut self,
        diagram: &mut Diagram,
        node: &NodeId,
        anchor: AnchorPoint,
    ) -> Result<AnchorClick, CanvasError> {
        let Some(pending) = self.pending.take() else {
            self.pending = Some(PendingConnection {
                from: node.clone(),
                anchor: anchor.direction(),
                kind: RelationshipKind::default(),
                origin: anchor.point(),
                cursor: anchor.point(),
            });
            debug!(
                node_id = node.as_str(),
                anchor = anchor.direction().as_str();
                "Connection started"
            );
            return Ok(AnchorClick::Started);
        };

        if &pending.from == node {
            if pending.anchor == anchor.direction() {
                debug!(node_id = node.as_str(); "Connection cancelled");
                return Ok(AnchorClick::Cancelled);
            }
            self.pending = Some(PendingConnection {
                anchor: anchor.direction(),
                origin: anchor.point(),
                ..pending
            });
            return Ok(AnchorClick::Retargeted);
        }

        let edge = diagram.add_edge(
            &pending.from,
            node,
            pending.kind,
            Some(pending.anchor),
            Some(anchor.direction()),
        )?;

        info!(edge_id = edge.as_str(), kind:% = pending.kind; "Connection completed");
        Ok(AnchorClick::Completed(edge))
    }

    /// Handles a click at canvas point `target` on `node`, snapping it to
    /// the nearest anchor.
    pub fn click_near(
        &mut self,
        diagram: &mut Diagram,
        geometry: &NodeGeometry,
        node: &NodeId,
        target: Point,
    ) -> Result<AnchorClick, CanvasError> {
        let position = diagram
            .node(node)
            .ok_or_else(|| CanvasError::NodeNotFound(node.clone()))?
            .position();
        let anchor = geometry.nearest_anchor(position, target);
        self.click_anchor(diagram, node, anchor)
    }

    /// Switches the kind of the pending connection by hotkey `1` to `6`.
    ///
    /// Returns true if the key was used.
    pub fn select_kind(&mut self, hotkey: char) -> bool {
        match (self.pending.as_mut(), RelationshipKind::from_hotkey(hotkey)) {
            (Some(pending), Some(kind)) => {
                pending.kind = kind;
                true
            }
            _ => false,
        }
    }

    /// Follows the cursor with the preview line.
    pub fn track_cursor(&mut self, canvas: Point) {
        if let Some(pending) = self.pending.as_mut() {
            pending.cursor = canvas;
        }
    }

    /// Drops the pending connection (Escape).
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
