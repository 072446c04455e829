//! Pie chart plugin
//!
//! Syntax examples:
//! ```text
//! pie title Pets adopted
//!     "Dogs" : 386
//!     "Cats" : 85
//!     "Rats" : 15
//! ```

mod database;
mod detector;
mod layout;
mod parser;

pub use database::{PieDatabase, PieEntry};
pub use detector::PieDetector;
pub use layout::{PieLayout, PieLayoutAlgorithm, PieSegment, PIE_PALETTE};
pub use parser::PieParser;

use crate::core::{Detector, Diagram};
use std::sync::Arc;

/// Pie chart implementation
pub struct PieDiagram;

impl Diagram for PieDiagram {
    type Database = PieDatabase;
    type Parser = PieParser;
    type Layout = PieLayoutAlgorithm;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(PieDetector::new())
    }

    fn create_parser() -> Self::Parser {
        PieParser::new()
    }

    fn create_database() -> Self::Database {
        PieDatabase::new()
    }

    fn create_layout() -> Self::Layout {
        PieLayoutAlgorithm::new()
    }

    fn name() -> &'static str {
        "pie"
    }
}
