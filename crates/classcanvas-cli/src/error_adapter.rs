//! Error adapter for converting CanvasError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use classcanvas::CanvasError;

/// Adapter rendering a [`CanvasError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a CanvasError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CanvasError::Io(_) => "classcanvas::io",
            CanvasError::Serialization(_) => "classcanvas::serialization",
            CanvasError::NodeNotFound(_) => "classcanvas::node_not_found",
            CanvasError::EdgeNotFound(_) => "classcanvas::edge_not_found",
            CanvasError::Validation(_) => "classcanvas::validation",
            CanvasError::Export(_) => "classcanvas::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CanvasError::NodeNotFound(_) | CanvasError::EdgeNotFound(_) => {
                "run `classcanvas routes` to list the ids in the stored diagram"
            }
            CanvasError::Serialization(_) => {
                "run `classcanvas clear` to discard the stored diagram"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wraps a [`CanvasError`] for rendering by miette.
pub fn to_reportable(err: &CanvasError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use classcanvas::semantic::NodeId;

    use super::*;

    #[test]
    fn test_codes_per_variant() {
        let err = CanvasError::Validation("bad".to_string());
        let adapter = to_reportable(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "classcanvas::validation");
        assert_eq!(adapter.to_string(), "Validation error: bad");
        assert!(adapter.help().is_none());
    }

    #[test]
    fn test_missing_node_has_help() {
        let err = CanvasError::NodeNotFound(NodeId::new("n-9"));
        let adapter = to_reportable(&err);
        assert_eq!(
            adapter.code().unwrap().to_string(),
            "classcanvas::node_not_found"
        );
        assert!(adapter.help().is_some());
        assert_eq!(adapter.to_string(), "Node `n-9` not found");
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = CanvasError::Validation("entity name must not be empty".to_string());
        let mut writer = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut writer, &to_reportable(&err))
            .unwrap();
        assert!(writer.contains("entity name must not be empty"));
    }
}
