//! Semantic model of a UML class diagram.
//!
//! These are the records owned by the diagram model and persisted by the
//! store. The field names of their JSON form match the format written by
//! earlier versions of the editor, so existing saved diagrams keep loading.
//!
//! - [`Node`] - a class-like entity placed on the canvas
//! - [`Edge`] - a typed relationship between two nodes
//! - [`RelationshipKind`] - the closed set of UML relationship kinds
//! - [`Visibility`] - member visibility (`+ - # ~`)
//! - [`EntityKind`] - class, interface, enum, abstract or exception

mod edge;
mod node;
mod relationship;

pub use edge::{Edge, EdgeId};
pub use node::{Attribute, ClassData, EntityKind, Node, NodeId, Operation, Visibility};
pub use relationship::RelationshipKind;
