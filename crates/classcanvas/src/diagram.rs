//! The diagram model: ordered node and edge collections and their edits.
//!
//! [`Diagram`] owns every [`Node`] and [`Edge`] in insertion order. Edits
//! replace whole fields; anchors and routes are never stored and are
//! recomputed from the live node positions through [`Diagram::routes`].

use indexmap::IndexMap;
use log::{debug, info, warn};

use classcanvas_core::{
    anchor::Direction,
    geometry::{Point, snap_to_grid},
    routing::{PathResult, Router},
    semantic::{
        Attribute, ClassData, Edge, EdgeId, EntityKind, Node, NodeId, Operation,
        RelationshipKind, Visibility,
    },
};

use crate::CanvasError;

/// Offset applied to a duplicated node.
const DUPLICATE_OFFSET: Point = Point::new(50.0, 50.0);

/// Which member list of a class a [`MemberForm`] edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberGroup {
    Attribute,
    Operation,
}

/// An attribute or operation as entered by the user.
///
/// An empty `type_name` defaults to `string` for attributes and `void` for
/// operations. `index` selects the member to replace; `None` appends.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberForm {
    pub group: MemberGroup,
    pub visibility: Visibility,
    pub name: String,
    pub type_name: String,
    pub index: Option<usize>,
}

impl MemberForm {
    /// A form that appends a new attribute.
    pub fn attribute(
        visibility: Visibility,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            group: MemberGroup::Attribute,
            visibility,
            name: name.into(),
            type_name: type_name.into(),
            index: None,
        }
    }

    /// A form that appends a new operation.
    pub fn operation(
        visibility: Visibility,
        name: impl Into<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            group: MemberGroup::Operation,
            visibility,
            name: name.into(),
            type_name: return_type.into(),
            index: None,
        }
    }

    /// Targets the member at `index` for replacement.
    pub fn replacing(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    fn type_or_default(&self) -> String {
        let type_name = self.type_name.trim();
        match (type_name.is_empty(), self.group) {
            (false, _) => type_name.to_string(),
            (true, MemberGroup::Attribute) => "string".to_string(),
            (true, MemberGroup::Operation) => "void".to_string(),
        }
    }
}

/// An edge together with its freshly computed route.
#[derive(Debug, Clone)]
pub struct RoutedEdge<'a> {
    edge: &'a Edge,
    path: PathResult,
}

impl<'a> RoutedEdge<'a> {
    pub fn edge(&self) -> &'a Edge {
        self.edge
    }

    pub fn path(&self) -> &PathResult {
        &self.path
    }
}

/// Ordered collections of nodes and edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
}

impl Diagram {
    /// Creates an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a diagram from stored collections.
    ///
    /// A later record with an already seen id replaces the earlier one.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut diagram = Self::new();
        for node in nodes {
            if let Some(previous) = diagram.nodes.insert(node.id.clone(), node) {
                warn!(node_id = previous.id.as_str(); "Duplicate node id, keeping the last one");
            }
        }
        for edge in edges {
            if let Some(previous) = diagram.edges.insert(edge.id.clone(), edge) {
                warn!(edge_id = previous.id.as_str(); "Duplicate edge id, keeping the last one");
            }
        }
        diagram
    }

    /// Splits the diagram into its node and edge collections, in order.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (
            self.nodes.into_values().collect(),
            self.edges.into_values().collect(),
        )
    }

    /// The built-in starter diagram: a `Customer` associated with an `Order`.
    pub fn example() -> Self {
        let customer = Node::new(
            "1",
            Point::new(100.0, 150.0),
            ClassData {
                attributes: vec![
                    attribute(Visibility::Public, "customerId", "string"),
                    attribute(Visibility::Private, "email", "string"),
                ],
                operations: vec![operation(Visibility::Public, "register", "void")],
                ..ClassData::new("Customer", EntityKind::Class)
            },
        );
        let order = Node::new(
            "2",
            Point::new(500.0, 150.0),
            ClassData {
                attributes: vec![
                    attribute(Visibility::Public, "orderId", "string"),
                    attribute(Visibility::Public, "total", "number"),
                ],
                operations: vec![
                    operation(Visibility::Public, "calculate", "number"),
                    operation(Visibility::Public, "submit", "boolean"),
                ],
                ..ClassData::new("Order", EntityKind::Class)
            },
        );
        let places = Edge::new(
            "e1",
            customer.id.clone(),
            order.id.clone(),
            RelationshipKind::Association,
        )
        .with_multiplicities("1", "*");

        Self::from_parts(vec![customer, order], vec![places])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Adds an empty entity with its top-left corner at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Validation`] if `name` is blank.
    pub fn add_node(
        &mut self,
        name: &str,
        kind: EntityKind,
        position: Point,
    ) -> Result<NodeId, CanvasError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CanvasError::Validation(
                "entity name must not be empty".to_string(),
            ));
        }

        let id = NodeId::new(next_id("n", |id| self.nodes.contains_key(&NodeId::new(id))));
        let node = Node::new(id.clone(), position, ClassData::new(name, kind));
        self.nodes.insert(id.clone(), node);

        info!(node_id = id.as_str(), name; "Node added");
        Ok(id)
    }

    /// Moves a node, snapping its top-left corner to the grid.
    ///
    /// Returns the snapped position.
    pub fn move_node(
        &mut self,
        id: &NodeId,
        position: Point,
        grid_size: f32,
    ) -> Result<Point, CanvasError> {
        let node = self.node_mut(id)?;
        let snapped = Point::new(
            snap_to_grid(position.x(), grid_size),
            snap_to_grid(position.y(), grid_size),
        );
        node.set_position(snapped);

        debug!(node_id = id.as_str(), x = snapped.x(), y = snapped.y(); "Node moved");
        Ok(snapped)
    }

    /// Edits the class data of a node.
    ///
    /// The edit is applied to a copy and only stored if the resulting name is
    /// not blank.
    pub fn update_node<F>(&mut self, id: &NodeId, edit: F) -> Result<(), CanvasError>
    where
        F: FnOnce(&mut ClassData),
    {
        let node = self.node_mut(id)?;
        let mut data = node.data.clone();
        edit(&mut data);
        if data.name.trim().is_empty() {
            return Err(CanvasError::Validation(
                "entity name must not be empty".to_string(),
            ));
        }
        node.data = data;

        debug!(node_id = id.as_str(); "Node updated");
        Ok(())
    }

    /// Copies a node, offset down and to the right, with `Copy` appended to
    /// its name. Edges are not copied.
    pub fn duplicate_node(&mut self, id: &NodeId) -> Result<NodeId, CanvasError> {
        let source = self
            .nodes
            .get(id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.clone()))?;

        let mut data = source.data.clone();
        data.name.push_str("Copy");
        let position = source.position().add_point(DUPLICATE_OFFSET);

        let copy_id = NodeId::new(next_id("n", |id| self.nodes.contains_key(&NodeId::new(id))));
        self.nodes
            .insert(copy_id.clone(), Node::new(copy_id.clone(), position, data));

        info!(source = id.as_str(), node_id = copy_id.as_str(); "Node duplicated");
        Ok(copy_id)
    }

    /// Removes a node and every edge that references it.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Node, CanvasError> {
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.clone()))?;

        let before = self.edges.len();
        self.edges.retain(|_, edge| !edge.touches(id));

        info!(node_id = id.as_str(), removed_edges = before - self.edges.len(); "Node removed");
        Ok(node)
    }

    /// Connects two distinct existing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::NodeNotFound`] if either node is missing and
    /// [`CanvasError::Validation`] for a self-loop.
    pub fn add_edge(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        kind: RelationshipKind,
        start_anchor: Option<Direction>,
        end_anchor: Option<Direction>,
    ) -> Result<EdgeId, CanvasError> {
        self.check_endpoints(from, to)?;

        let id = EdgeId::new(next_id("e", |id| self.edges.contains_key(&EdgeId::new(id))));
        let edge = Edge::new(id.clone(), from.clone(), to.clone(), kind)
            .with_anchors(start_anchor, end_anchor);
        self.edges.insert(id.clone(), edge);

        info!(edge_id = id.as_str(), from = from.as_str(), to = to.as_str(), kind:%; "Edge added");
        Ok(id)
    }

    /// Edits an edge. The edit may not change the edge id and must leave the
    /// edge connecting two distinct existing nodes.
    pub fn update_edge<F>(&mut self, id: &EdgeId, edit: F) -> Result<(), CanvasError>
    where
        F: FnOnce(&mut Edge),
    {
        let mut edge = self
            .edges
            .get(id)
            .cloned()
            .ok_or_else(|| CanvasError::EdgeNotFound(id.clone()))?;
        edit(&mut edge);

        if &edge.id != id {
            return Err(CanvasError::Validation(format!(
                "edge id `{id}` cannot be changed to `{}`",
                edge.id
            )));
        }
        self.check_endpoints(&edge.from, &edge.to)?;

        self.edges.insert(id.clone(), edge);
        debug!(edge_id = id.as_str(); "Edge updated");
        Ok(())
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<Edge, CanvasError> {
        let edge = self
            .edges
            .shift_remove(id)
            .ok_or_else(|| CanvasError::EdgeNotFound(id.clone()))?;

        info!(edge_id = id.as_str(); "Edge removed");
        Ok(edge)
    }

    /// Inserts or replaces an attribute or operation of a node.
    pub fn save_member(&mut self, node: &NodeId, form: MemberForm) -> Result<(), CanvasError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(CanvasError::Validation(
                "member name must not be empty".to_string(),
            ));
        }
        let type_name = form.type_or_default();
        let data = &mut self.node_mut(node)?.data;

        match form.group {
            MemberGroup::Attribute => {
                let member = attribute(form.visibility, name, &type_name);
                place_member(&mut data.attributes, member, form.index)?;
            }
            MemberGroup::Operation => {
                let member = operation(form.visibility, name, &type_name);
                place_member(&mut data.operations, member, form.index)?;
            }
        }

        debug!(node_id = node.as_str(), member = name, group:? = form.group; "Member saved");
        Ok(())
    }

    pub fn remove_attribute(
        &mut self,
        node: &NodeId,
        index: usize,
    ) -> Result<Attribute, CanvasError> {
        let attributes = &mut self.node_mut(node)?.data.attributes;
        check_index(index, attributes.len())?;
        Ok(attributes.remove(index))
    }

    pub fn remove_operation(
        &mut self,
        node: &NodeId,
        index: usize,
    ) -> Result<Operation, CanvasError> {
        let operations = &mut self.node_mut(node)?.data.operations;
        check_index(index, operations.len())?;
        Ok(operations.remove(index))
    }

    /// Routes every edge against the current node positions, in edge order.
    ///
    /// Edges referencing a missing node get the empty route.
    pub fn routes(&self, router: &Router) -> Vec<RoutedEdge<'_>> {
        self.edges
            .values()
            .map(|edge| RoutedEdge {
                edge,
                path: router.route_edge(|id| self.nodes.get(id), edge),
            })
            .collect()
    }

    fn node_mut(&mut self, id: &NodeId) -> Result<&mut Node, CanvasError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.clone()))
    }

    fn check_endpoints(&self, from: &NodeId, to: &NodeId) -> Result<(), CanvasError> {
        for id in [from, to] {
            if !self.nodes.contains_key(id) {
                return Err(CanvasError::NodeNotFound(id.clone()));
            }
        }
        if from == to {
            return Err(CanvasError::Validation(format!(
                "node `{from}` cannot be connected to itself"
            )));
        }
        Ok(())
    }
}

/// Returns `<prefix>-<k>` for the smallest `k >= 1` not already taken.
fn next_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    (1..)
        .map(|k: usize| format!("{prefix}-{k}"))
        .find(|id| !taken(id))
        .unwrap_or_else(|| format!("{prefix}-0"))
}

fn attribute(visibility: Visibility, name: &str, type_name: &str) -> Attribute {
    Attribute {
        visibility,
        name: name.to_string(),
        type_name: type_name.to_string(),
    }
}

fn operation(visibility: Visibility, name: &str, return_type: &str) -> Operation {
    Operation {
        visibility,
        name: name.to_string(),
        return_type: return_type.to_string(),
    }
}

fn place_member<T>(
    members: &mut Vec<T>,
    member: T,
    index: Option<usize>,
) -> Result<(), CanvasError> {
    match index {
        Some(index) => {
            check_index(index, members.len())?;
            members[index] = member;
        }
        None => members.push(member),
    }
    Ok(())
}

fn check_index(index: usize, len: usize) -> Result<(), CanvasError> {
    if index < len {
        Ok(())
    } else {
        Err(CanvasError::Validation(format!(
            "member index {index} out of range (0..{len})"
        )))
    }
}
