use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    draw::{Marker, MarkerEnd, MarkerShape, StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle},
};

/// UML relationship kind carried by an edge.
///
/// The router ignores the kind; it only drives how the routed path is
/// stroked, which marker it carries and how it is labelled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    #[default]
    Association,
    Inheritance,
    Realization,
    Composition,
    Aggregation,
    Dependency,
}

impl RelationshipKind {
    /// All kinds in hotkey order (`1` through `6`).
    pub const ALL: [RelationshipKind; 6] = [
        Self::Association,
        Self::Inheritance,
        Self::Realization,
        Self::Composition,
        Self::Aggregation,
        Self::Dependency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Association => "association",
            Self::Inheritance => "inheritance",
            Self::Realization => "realization",
            Self::Composition => "composition",
            Self::Aggregation => "aggregation",
            Self::Dependency => "dependency",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Association => "Association",
            Self::Inheritance => "Inheritance",
            Self::Realization => "Realization",
            Self::Composition => "Composition",
            Self::Aggregation => "Aggregation",
            Self::Dependency => "Dependency",
        }
    }

    /// Short explanation shown next to the label
    pub fn hint(self) -> &'static str {
        match self {
            Self::Association => "Structural link between classes",
            Self::Inheritance => "IS-A relationship (extends)",
            Self::Realization => "Interface implementation",
            Self::Composition => "Strong ownership (lifecycle bound)",
            Self::Aggregation => "Weak ownership (shared)",
            Self::Dependency => "Temporary usage relationship",
        }
    }

    pub fn stroke_style(self) -> StrokeStyle {
        match self {
            Self::Realization | Self::Dependency => StrokeStyle::Dashed,
            _ => StrokeStyle::Solid,
        }
    }

    /// Stroke used to draw an edge of this kind.
    pub fn stroke(self) -> StrokeDefinition {
        StrokeDefinition::new(self.color(), 2.0)
            .with_style(self.stroke_style())
            .with_cap(StrokeCap::Round)
            .with_join(StrokeJoin::Round)
    }

    /// Marker drawn on the routed path.
    ///
    /// Ownership kinds put a diamond on the owner (start) end; every other
    /// kind points at the target end.
    pub fn marker(self) -> Marker {
        match self {
            Self::Association | Self::Dependency => {
                Marker::new(MarkerShape::OpenArrow, MarkerEnd::End)
            }
            Self::Inheritance | Self::Realization => {
                Marker::new(MarkerShape::HollowTriangle, MarkerEnd::End)
            }
            Self::Composition => Marker::new(MarkerShape::FilledDiamond, MarkerEnd::Start),
            Self::Aggregation => Marker::new(MarkerShape::HollowDiamond, MarkerEnd::Start),
        }
    }

    pub fn color(self) -> Color {
        let hex = match self {
            Self::Association => "#60a5fa",
            Self::Inheritance => "#a78bfa",
            Self::Realization => "#34d399",
            Self::Composition => "#f87171",
            Self::Aggregation => "#fbbf24",
            Self::Dependency => "#94a3b8",
        };
        Color::from_palette(hex)
    }

    /// Keyboard digit selecting this kind while drafting a connection
    pub fn hotkey(self) -> char {
        match self {
            Self::Association => '1',
            Self::Inheritance => '2',
            Self::Realization => '3',
            Self::Composition => '4',
            Self::Aggregation => '5',
            Self::Dependency => '6',
        }
    }

    /// Looks up the kind bound to a hotkey digit.
    ///
    /// ```
    /// # use classcanvas_core::semantic::RelationshipKind;
    /// assert_eq!(RelationshipKind::from_hotkey('4'), Some(RelationshipKind::Composition));
    /// assert_eq!(RelationshipKind::from_hotkey('7'), None);
    /// ```
    pub fn from_hotkey(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.hotkey() == key)
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "invalid relationship `{s}`, valid values: association, inheritance, \
                     realization, composition, aggregation, dependency"
                )
            })
    }
}
