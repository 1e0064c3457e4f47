use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use super::{NodeId, RelationshipKind};
use crate::anchor::Direction;

/// Opaque identifier of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A typed relationship between two nodes.
///
/// Anchor labels are kept exactly as persisted. A label that no longer names
/// an anchor is treated as absent when the edge is routed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type", default)]
    pub kind: RelationshipKind,
    #[serde(default)]
    pub start_mult: String,
    #[serde(default)]
    pub end_mult: String,
    #[serde(default)]
    pub start_anchor: Option<String>,
    #[serde(default)]
    pub end_anchor: Option<String>,
}

impl Edge {
    /// Creates an edge with auto-selected anchors and no multiplicities.
    pub fn new(id: impl Into<EdgeId>, from: NodeId, to: NodeId, kind: RelationshipKind) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            kind,
            start_mult: String::new(),
            end_mult: String::new(),
            start_anchor: None,
            end_anchor: None,
        }
    }

    /// Pins both ends to explicit anchors (`None` leaves an end auto-selected).
    pub fn with_anchors(mut self, start: Option<Direction>, end: Option<Direction>) -> Self {
        self.start_anchor = start.map(|d| d.to_string());
        self.end_anchor = end.map(|d| d.to_string());
        self
    }

    /// Sets the multiplicity labels of both ends.
    pub fn with_multiplicities(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_mult = start.into();
        self.end_mult = end.into();
        self
    }

    /// Explicit start anchor, if the stored label names one.
    pub fn start_direction(&self) -> Option<Direction> {
        self.resolve_anchor(self.start_anchor.as_deref(), "start")
    }

    /// Explicit end anchor, if the stored label names one.
    pub fn end_direction(&self) -> Option<Direction> {
        self.resolve_anchor(self.end_anchor.as_deref(), "end")
    }

    /// Returns true if either end references `node`
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.from == node || &self.to == node
    }

    /// Multiplicity caption drawn at the path center, e.g. `1 — *`.
    ///
    /// Returns `None` when neither end carries a multiplicity.
    pub fn multiplicity_label(&self) -> Option<String> {
        match (self.start_mult.is_empty(), self.end_mult.is_empty()) {
            (true, true) => None,
            (false, false) => Some(format!("{} — {}", self.start_mult, self.end_mult)),
            (false, true) => Some(self.start_mult.clone()),
            (true, false) => Some(self.end_mult.clone()),
        }
    }

    fn resolve_anchor(&self, label: Option<&str>, end: &str) -> Option<Direction> {
        let label = label?;
        match label.parse() {
            Ok(direction) => Some(direction),
            Err(err) => {
                warn!(edge_id = self.id.as_str(), end, err:%; "Ignoring unresolvable anchor");
                None
            }
        }
    }
}
