//! Flowchart plugin
//!
//! Flowchart positions are not computed here. The text supplies ids, labels,
//! shapes and connections; node boxes come from renderer geometry attached
//! to the database before layout.
//!
//! Syntax examples:
//! ```text
//! flowchart TD
//!     A[Start] --> B{Ready?}
//!     B -->|yes| C((Go))
//!     B -.-> A
//! ```

mod database;
mod detector;
mod layout;
mod parser;

pub use database::{EdgeData, FlowchartDatabase, NodeData};
pub use detector::FlowchartDetector;
pub use layout::{FlowchartEdge, FlowchartLayout, FlowchartLayoutAlgorithm, FlowchartNode};
pub use parser::{FlowchartParser, Link, NodeRef, Statement};

use crate::core::{Detector, Diagram};
use std::sync::Arc;

/// Flowchart diagram implementation
pub struct FlowchartDiagram;

impl Diagram for FlowchartDiagram {
    type Database = FlowchartDatabase;
    type Parser = FlowchartParser;
    type Layout = FlowchartLayoutAlgorithm;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(FlowchartDetector::new())
    }

    fn create_parser() -> Self::Parser {
        FlowchartParser::new()
    }

    fn create_database() -> Self::Database {
        FlowchartDatabase::new()
    }

    fn create_layout() -> Self::Layout {
        FlowchartLayoutAlgorithm::new()
    }

    fn name() -> &'static str {
        "flowchart"
    }
}
