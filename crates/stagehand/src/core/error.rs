//! Core error types for diagram processing
//!
//! Most of the pipeline degrades instead of failing (unknown dialects become
//! `Unsupported`, malformed lines are skipped). These errors surface at the
//! API edges: reading inputs, decoding renderer geometry, and strict detection.

use thiserror::Error;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}")]
    ParseError { message: String, line: usize },

    #[error("Geometry error: {message}")]
    GeometryError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Unknown diagram type: {diagram_type}")]
    UnknownDiagramType { diagram_type: String },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize) -> Self {
        Self::ParseError { message, line }
    }

    /// Create a new geometry error
    pub fn geometry_error(message: String) -> Self {
        Self::GeometryError { message }
    }

    /// Create an unknown diagram type error from the offending header line
    pub fn unknown_diagram_type(diagram_type: impl Into<String>) -> Self {
        Self::UnknownDiagramType {
            diagram_type: diagram_type.into(),
        }
    }
}
