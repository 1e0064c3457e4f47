use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{color::Color, geometry::Point};

/// Opaque identifier of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Member visibility marker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    #[serde(rename = "+")]
    Public,
    #[serde(rename = "-")]
    Private,
    #[serde(rename = "#")]
    Protected,
    #[serde(rename = "~")]
    Package,
}

impl Visibility {
    pub const ALL: [Visibility; 4] = [
        Self::Public,
        Self::Private,
        Self::Protected,
        Self::Package,
    ];

    /// Returns the UML symbol (`+`, `-`, `#` or `~`)
    pub fn symbol(self) -> char {
        match self {
            Self::Public => '+',
            Self::Private => '-',
            Self::Protected => '#',
            Self::Package => '~',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
            Self::Protected => "Protected",
            Self::Package => "Package",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Public => "Accessible everywhere",
            Self::Private => "Class-internal only",
            Self::Protected => "Subclasses only",
            Self::Package => "Package-internal",
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" | "public" => Ok(Self::Public),
            "-" | "private" => Ok(Self::Private),
            "#" | "protected" => Ok(Self::Protected),
            "~" | "package" => Ok(Self::Package),
            _ => Err(format!(
                "invalid visibility `{s}`, valid values: +, -, #, ~"
            )),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Kind of class-like entity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Class,
    Interface,
    Enum,
    Abstract,
    Exception,
}

impl EntityKind {
    /// Returns the stereotype caption rendered above the entity name, if any.
    pub fn stereotype(self) -> Option<&'static str> {
        match self {
            Self::Class => None,
            Self::Interface => Some("«interface»"),
            Self::Enum => Some("«enumeration»"),
            Self::Abstract => Some("«abstract»"),
            Self::Exception => Some("«exception»"),
        }
    }

    /// Returns the theme accent color of the entity header.
    pub fn accent(self) -> Color {
        let hex = match self {
            Self::Class => "#2563eb",
            Self::Interface => "#059669",
            Self::Enum => "#9333ea",
            Self::Abstract => "#d97706",
            Self::Exception => "#dc2626",
        };
        Color::from_palette(hex)
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(Self::Class),
            "interface" => Ok(Self::Interface),
            "enum" => Ok(Self::Enum),
            "abstract" => Ok(Self::Abstract),
            "exception" => Ok(Self::Exception),
            _ => Err(format!(
                "invalid entity kind `{s}`, valid values: class, interface, enum, \
                 abstract, exception"
            )),
        }
    }
}

/// A structural attribute, rendered as `+ name: type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub visibility: Visibility,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.visibility, self.name, self.type_name)
    }
}

/// An operation, rendered as `+ name(): returnType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub visibility: Visibility,
    pub name: String,
    pub return_type: String,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(): {}", self.visibility, self.name, self.return_type)
    }
}

/// Editable content of a class node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassData {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: EntityKind,
    #[serde(default)]
    pub stereotype: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl ClassData {
    /// Creates an empty entity of the given kind.
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }
}

/// A class-like entity placed on the canvas by its top-left corner.
///
/// The footprint is not stored per node; every node shares the size held by
/// [`NodeGeometry`](crate::anchor::NodeGeometry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub data: ClassData,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, position: Point, data: ClassData) -> Self {
        Self {
            id: id.into(),
            x: position.x(),
            y: position.y(),
            data,
        }
    }

    /// Returns the top-left corner of the node
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Moves the node so its top-left corner is `position`
    pub fn set_position(&mut self, position: Point) {
        self.x = position.x();
        self.y = position.y();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_symbols_round_trip() {
        for visibility in Visibility::ALL {
            let parsed: Visibility = visibility.symbol().to_string().parse().unwrap();
            assert_eq!(parsed, visibility);
        }
        assert!("*".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_visibility_serializes_as_symbol() {
        let json = serde_json::to_string(&Visibility::Protected).unwrap();
        assert_eq!(json, "\"#\"");
    }

    #[test]
    fn test_member_display() {
        let attribute = Attribute {
            visibility: Visibility::Private,
            name: "email".to_string(),
            type_name: "string".to_string(),
        };
        assert_eq!(attribute.to_string(), "- email: string");

        let operation = Operation {
            visibility: Visibility::Public,
            name: "register".to_string(),
            return_type: "void".to_string(),
        };
        assert_eq!(operation.to_string(), "+ register(): void");
    }

    #[test]
    fn test_entity_kind_stereotypes() {
        assert_eq!(EntityKind::Class.stereotype(), None);
        assert_eq!(EntityKind::Interface.stereotype(), Some("«interface»"));
        assert_eq!("enum".parse::<EntityKind>().unwrap(), EntityKind::Enum);
        assert!("struct".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_node_deserializes_persisted_format() {
        let json = r#"{
            "id": "1",
            "x": 100,
            "y": 150,
            "data": {
                "name": "Customer",
                "type": "class",
                "stereotype": "",
                "attributes": [{ "visibility": "+", "name": "customerId", "type": "string" }],
                "operations": [{ "visibility": "+", "name": "register", "returnType": "void" }]
            }
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.id, NodeId::new("1"));
        assert_eq!(node.position(), Point::new(100.0, 150.0));
        assert_eq!(node.data.kind, EntityKind::Class);
        assert_eq!(node.data.attributes[0].type_name, "string");
        assert_eq!(node.data.operations[0].return_type, "void");
    }

    #[test]
    fn test_node_set_position() {
        let mut node = Node::new("a", Point::new(0.0, 0.0), ClassData::new("A", EntityKind::Class));
        node.set_position(Point::new(-20.0, 40.0));
        assert_eq!(node.position(), Point::new(-20.0, 40.0));
    }
}
