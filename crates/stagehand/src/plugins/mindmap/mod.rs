//! Mindmap plugin
//!
//! Syntax examples:
//! ```text
//! mindmap
//!   root((Project))
//!     Goals
//!       Ship v1
//!     Risks
//! ```
//!
//! Nesting is expressed by indentation, two spaces per level.

mod database;
mod detector;
mod layout;
mod parser;

pub use database::{MindmapDatabase, MindmapEntry};
pub use detector::MindmapDetector;
pub use layout::{MindmapConnection, MindmapLayout, MindmapLayoutAlgorithm, MindmapNode};
pub use parser::MindmapParser;

use crate::core::{Detector, Diagram};
use std::sync::Arc;

/// Mindmap implementation
pub struct MindmapDiagram;

impl Diagram for MindmapDiagram {
    type Database = MindmapDatabase;
    type Parser = MindmapParser;
    type Layout = MindmapLayoutAlgorithm;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(MindmapDetector::new())
    }

    fn create_parser() -> Self::Parser {
        MindmapParser::new()
    }

    fn create_database() -> Self::Database {
        MindmapDatabase::new()
    }

    fn create_layout() -> Self::Layout {
        MindmapLayoutAlgorithm::new()
    }

    fn name() -> &'static str {
        "mindmap"
    }
}
