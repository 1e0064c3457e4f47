//! Error types for ClassCanvas operations.
//!
//! This module provides the main error type [`CanvasError`] which wraps
//! the error conditions that can occur while editing, persisting and
//! exporting diagrams. Routing itself never fails.

use std::io;

use thiserror::Error;

use classcanvas_core::semantic::{EdgeId, NodeId};

/// The main error type for ClassCanvas operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Node `{0}` not found")]
    NodeNotFound(NodeId),

    #[error("Edge `{0}` not found")]
    EdgeNotFound(EdgeId),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for CanvasError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
