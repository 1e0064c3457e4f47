//! Visual definitions shared by the renderers.
//!
//! - [`StrokeDefinition`] and friends describe how lines are stroked.
//! - [`MarkerShape`] and [`Marker`] describe relationship end markers and
//!   produce their SVG `<marker>` definitions.

mod marker;
mod stroke;

pub use marker::{Marker, MarkerEnd, MarkerShape};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
