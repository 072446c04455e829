//! Dialect plugins
//!
//! Each dialect provides a detector, a parser, a database and a layout
//! algorithm, tied together by its [`Diagram`](crate::core::Diagram) impl.
//! The orchestrator classifies input and dispatches to the right plugin.

pub mod flowchart;
pub mod mindmap;
pub mod orchestrator;
pub mod pie;
pub mod sequence;
pub mod state;

// Both flowchart and state export a `Statement`; reach those through the module path
pub use flowchart::{
    FlowchartDatabase, FlowchartDetector, FlowchartDiagram, FlowchartEdge, FlowchartLayout,
    FlowchartLayoutAlgorithm, FlowchartNode, FlowchartParser,
};
pub use mindmap::*;
pub use orchestrator::*;
pub use pie::*;
pub use sequence::*;
pub use state::{
    StateDatabase, StateDetector, StateDiagram, StateGlyph, StateLayout, StateLayoutAlgorithm,
    StateNode, StateParser, StateTransition,
};
