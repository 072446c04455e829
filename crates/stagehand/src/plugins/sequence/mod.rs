//! Sequence diagram plugin
//!
//! Syntax examples:
//! ```text
//! sequenceDiagram
//!     participant A as Alice
//!     participant B as Bob
//!     A->>B: Hello
//!     B-->>A: Hi there
//! ```

mod database;
mod detector;
mod layout;
mod parser;

pub use database::{Actor, ArrowHead, Message, SequenceDatabase};
pub use detector::SequenceDetector;
pub use layout::{SequenceActor, SequenceLayout, SequenceLayoutAlgorithm, SequenceMessage};
pub use parser::SequenceParser;

use crate::core::{Detector, Diagram};
use std::sync::Arc;

/// Sequence diagram implementation
pub struct SequenceDiagram;

impl Diagram for SequenceDiagram {
    type Database = SequenceDatabase;
    type Parser = SequenceParser;
    type Layout = SequenceLayoutAlgorithm;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(SequenceDetector::new())
    }

    fn create_parser() -> Self::Parser {
        SequenceParser::new()
    }

    fn create_database() -> Self::Database {
        SequenceDatabase::new()
    }

    fn create_layout() -> Self::Layout {
        SequenceLayoutAlgorithm::new()
    }

    fn name() -> &'static str {
        "sequence"
    }
}
