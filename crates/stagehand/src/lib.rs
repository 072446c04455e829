//! Stagehand - turn Mermaid-style diagram markup into timed layouts
//!
//! Diagram text is classified into one of five dialects (flowchart,
//! sequence, pie, state, mindmap), parsed, laid out with deterministic
//! coordinates, and given a frame-based reveal schedule for animation.
//!
//! # Quick Start
//!
//! ```rust
//! use stagehand::{parse, ParsedDiagram};
//!
//! let diagram = parse("stateDiagram-v2\n[*] --> Idle\nIdle --> [*]", None);
//! match diagram {
//!     ParsedDiagram::State(layout) => assert_eq!(layout.states.len(), 3),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! # Flowcharts
//!
//! Flowchart boxes come from an external renderer. Pass its geometry
//! directly, or run a [`session::DiagramSession`] over a
//! [`GeometrySource`](core::GeometrySource):
//!
//! ```rust
//! use stagehand::prelude::*;
//!
//! let geometry = FlowchartGeometry::new(200.0, 200.0)
//!     .with_node(NodeGeometry::new("A", Point::new(100.0, 50.0), 80.0, 40.0))
//!     .with_node(NodeGeometry::new("B", Point::new(100.0, 150.0), 80.0, 40.0));
//!
//! let diagram = stagehand::parse("graph TD\nA --> B", Some(&geometry));
//! let sequencer = Sequencer::new(&diagram, AnimationConfig::default());
//!
//! // node A, edge A->B, node B
//! assert_eq!(sequencer.entries().len(), 3);
//! ```

pub mod core;
pub mod plugins;
pub mod sequencer;
pub mod session;

pub use core::*;
pub use plugins::orchestrator::{Orchestrator, ParsedDiagram};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Bounds, Database, Detector, DiagramDialect, FlowchartGeometry, GeometrySource,
        LayoutAlgorithm, NodeGeometry, NodeShape, Parser, Point, StaticGeometry,
        SvgGeometrySource,
    };
    pub use crate::plugins::orchestrator::{Orchestrator, ParsedDiagram};
    pub use crate::sequencer::{AnimationConfig, FrameState, Progress, Sequencer};
    pub use crate::session::{DiagramSession, ParseOutcome};
}

/// Classify diagram text by its header line
///
/// # Example
/// ```rust
/// use stagehand::{classify, DiagramDialect};
///
/// assert_eq!(classify("sequenceDiagram\nA->>B: hi"), DiagramDialect::Sequence);
/// assert_eq!(classify("gantt"), DiagramDialect::Unknown);
/// ```
pub fn classify(input: &str) -> DiagramDialect {
    Orchestrator::with_default_detectors().classify(input)
}

/// Classify and lay out diagram text
///
/// `geometry` is only used for flowcharts; without it a flowchart is empty.
pub fn parse(input: &str, geometry: Option<&FlowchartGeometry>) -> ParsedDiagram {
    Orchestrator::with_default_detectors().parse(input, geometry)
}
