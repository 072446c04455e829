//! State diagram plugin
//!
//! Syntax examples:
//! ```text
//! stateDiagram-v2
//!     [*] --> Idle
//!     Idle --> Processing : start
//!     Processing --> Done : complete
//!     Done --> [*]
//! ```

mod database;
mod detector;
mod layout;
mod parser;

pub use database::{StateData, StateDatabase, StateKind, TransitionData, END_MARKER, START_MARKER};
pub use detector::StateDetector;
pub use layout::{StateGlyph, StateLayout, StateLayoutAlgorithm, StateNode, StateTransition};
pub use parser::{StateParser, StateRef, Statement};

use crate::core::{Detector, Diagram};
use std::sync::Arc;

/// State diagram implementation
pub struct StateDiagram;

impl Diagram for StateDiagram {
    type Database = StateDatabase;
    type Parser = StateParser;
    type Layout = StateLayoutAlgorithm;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(StateDetector::new())
    }

    fn create_parser() -> Self::Parser {
        StateParser::new()
    }

    fn create_database() -> Self::Database {
        StateDatabase::new()
    }

    fn create_layout() -> Self::Layout {
        StateLayoutAlgorithm::new()
    }

    fn name() -> &'static str {
        "state"
    }
}
