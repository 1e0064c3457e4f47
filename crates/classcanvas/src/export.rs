//! Writing diagrams to files.
//!
//! Edges are routed at export time from the current node positions, so an
//! exported file always matches what the canvas shows. Backend failures are
//! reported as [`Error`] and surface as [`CanvasError::Export`] from the
//! [`Canvas`](crate::Canvas) facade.
//!
//! [`CanvasError::Export`]: crate::CanvasError::Export

pub mod svg;

use std::io;

use thiserror::Error;

use crate::diagram::Diagram;

/// An output format a diagram can be written to.
pub trait Exporter {
    /// Writes `diagram` to the backend's destination.
    fn export_diagram(&self, diagram: &Diagram) -> Result<(), Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    /// The diagram or its style could not be turned into the output format.
    #[error("cannot render diagram: {0}")]
    Render(String),

    #[error("cannot write diagram: {0}")]
    Io(#[source] io::Error),
}
