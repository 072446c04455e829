//! Core diagram trait tying one dialect's components together

use super::{Detector, LayoutAlgorithm, Parser};
use std::sync::Arc;

/// Core trait for diagram dialects
///
/// Each dialect plugin (flowchart, sequence, pie, state, mindmap) implements
/// this so the orchestrator can run detector, parser, and layout uniformly.
///
/// # Example
/// ```
/// use stagehand::core::Diagram;
/// use stagehand::plugins::state::StateDiagram;
///
/// assert_eq!(StateDiagram::name(), "state");
/// ```
pub trait Diagram: Send + Sync {
    /// The accumulator the parser folds facts into
    type Database: Send + Sync;

    /// The parser type for this diagram
    type Parser: Parser<Self::Database>;

    /// The layout algorithm for this diagram
    type Layout: LayoutAlgorithm<Self::Database>;

    /// Get the detector for this diagram type
    fn detector() -> Arc<dyn Detector>;

    /// Create a new parser instance
    fn create_parser() -> Self::Parser;

    /// Create a new, empty database instance
    fn create_database() -> Self::Database;

    /// Create the layout algorithm with default spacing
    fn create_layout() -> Self::Layout;

    /// Get the name of this diagram type
    fn name() -> &'static str;
}
