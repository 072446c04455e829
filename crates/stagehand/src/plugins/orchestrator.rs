//! Plugin orchestrator for the classify, parse and layout pipeline
//!
//! The orchestrator owns the ordered detector table, classifies input once,
//! and dispatches to the matching plugin. Results are returned as a single
//! tagged union so consumers like the sequencer can treat every dialect
//! uniformly.

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{
    DiagramDialect, DiagramError, Detector, Diagram, FlowchartGeometry, LayoutAlgorithm, Parser,
};
use crate::plugins::flowchart::{FlowchartDiagram, FlowchartLayout};
use crate::plugins::mindmap::{MindmapDiagram, MindmapLayout};
use crate::plugins::pie::{PieDiagram, PieLayout};
use crate::plugins::sequence::{SequenceDiagram, SequenceLayout};
use crate::plugins::state::{StateDiagram, StateLayout};

/// A fully laid out diagram of any dialect
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "dialect", content = "layout", rename_all = "snake_case")]
pub enum ParsedDiagram {
    Flowchart(FlowchartLayout),
    Sequence(SequenceLayout),
    Pie(PieLayout),
    State(StateLayout),
    Mindmap(MindmapLayout),
    /// Input whose header matched no dialect
    Unsupported,
}

impl ParsedDiagram {
    pub fn dialect(&self) -> DiagramDialect {
        match self {
            ParsedDiagram::Flowchart(_) => DiagramDialect::Flowchart,
            ParsedDiagram::Sequence(_) => DiagramDialect::Sequence,
            ParsedDiagram::Pie(_) => DiagramDialect::Pie,
            ParsedDiagram::State(_) => DiagramDialect::State,
            ParsedDiagram::Mindmap(_) => DiagramDialect::Mindmap,
            ParsedDiagram::Unsupported => DiagramDialect::Unknown,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ParsedDiagram::Unsupported)
    }
}

/// Coordinates detection and the per-dialect pipelines
///
/// Detectors are consulted in registration order and the first match wins.
pub struct Orchestrator {
    detectors: Vec<Arc<dyn Detector>>,
}

impl Orchestrator {
    /// Create an orchestrator with no detectors
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Create an orchestrator with every dialect registered in classification order
    pub fn with_default_detectors() -> Self {
        let mut orchestrator = Self::new();
        orchestrator.register_detector(FlowchartDiagram::detector());
        orchestrator.register_detector(SequenceDiagram::detector());
        orchestrator.register_detector(PieDiagram::detector());
        orchestrator.register_detector(StateDiagram::detector());
        orchestrator.register_detector(MindmapDiagram::detector());
        orchestrator
    }

    /// Append a detector; earlier registrations take precedence
    pub fn register_detector(&mut self, detector: Arc<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Dialects of the registered detectors, in order
    pub fn detectors(&self) -> Vec<DiagramDialect> {
        self.detectors.iter().map(|d| d.dialect()).collect()
    }

    /// Classify input; unmatched input is [`DiagramDialect::Unknown`]
    pub fn classify(&self, input: &str) -> DiagramDialect {
        for detector in &self.detectors {
            trace!(dialect = %detector.dialect(), "Checking detector");
            if detector.detect(input) {
                debug!(dialect = %detector.dialect(), "Detected dialect");
                return detector.dialect();
            }
        }
        debug!("No detector matched input");
        DiagramDialect::Unknown
    }

    /// Classify input, failing when no detector matches
    pub fn detect_diagram_type(&self, input: &str) -> Result<DiagramDialect> {
        let span = span!(Level::INFO, "detect_diagram_type", input_len = input.len());
        let _enter = span.enter();

        match self.classify(input) {
            DiagramDialect::Unknown => {
                let header = crate::core::header_line(input).unwrap_or_default();
                Err(DiagramError::unknown_diagram_type(header).into())
            }
            dialect => Ok(dialect),
        }
    }

    /// Classify and lay out input
    ///
    /// `geometry` is only consulted for flowcharts. Parse or layout failures
    /// degrade to an empty layout of the detected dialect.
    pub fn parse(&self, input: &str, geometry: Option<&FlowchartGeometry>) -> ParsedDiagram {
        let span = span!(Level::INFO, "parse_diagram", input_len = input.len());
        let _enter = span.enter();

        let dialect = self.classify(input);
        self.parse_as(dialect, input, geometry)
    }

    /// Lay out input as an already-classified dialect
    pub fn parse_as(
        &self,
        dialect: DiagramDialect,
        input: &str,
        geometry: Option<&FlowchartGeometry>,
    ) -> ParsedDiagram {
        info!(%dialect, "Running dialect pipeline");

        match dialect {
            DiagramDialect::Flowchart => {
                let layout = run::<FlowchartDiagram>(input, |database| {
                    if let Some(geometry) = geometry {
                        database.set_geometry(geometry.clone());
                    }
                });
                ParsedDiagram::Flowchart(layout)
            }
            DiagramDialect::Sequence => ParsedDiagram::Sequence(run::<SequenceDiagram>(input, |_| {})),
            DiagramDialect::Pie => ParsedDiagram::Pie(run::<PieDiagram>(input, |_| {})),
            DiagramDialect::State => ParsedDiagram::State(run::<StateDiagram>(input, |_| {})),
            DiagramDialect::Mindmap => ParsedDiagram::Mindmap(run::<MindmapDiagram>(input, |_| {})),
            DiagramDialect::Unknown => {
                warn!("Unsupported diagram input");
                ParsedDiagram::Unsupported
            }
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

type LayoutOf<D> = <<D as Diagram>::Layout as LayoutAlgorithm<<D as Diagram>::Database>>::Output;

/// Parse into a fresh database, let the caller adjust it, then lay it out
fn run<D>(input: &str, prepare: impl FnOnce(&mut D::Database)) -> LayoutOf<D>
where
    D: Diagram,
    LayoutOf<D>: Default,
{
    let attempt = || -> Result<LayoutOf<D>> {
        let mut database = D::create_database();
        D::create_parser().parse(input, &mut database)?;
        prepare(&mut database);
        D::create_layout().layout(&database)
    };

    attempt().unwrap_or_else(|err| {
        warn!(dialect = D::name(), error = %err, "Pipeline failed, using empty layout");
        <LayoutOf<D> as Default>::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NodeGeometry, Point};
    use crate::plugins::pie::PieDetector;

    #[test]
    fn test_orchestrator_creation() {
        let orchestrator = Orchestrator::new();
        assert!(orchestrator.detectors().is_empty());
        assert_eq!(orchestrator.classify("pie\n\"A\" : 1"), DiagramDialect::Unknown);
    }

    #[test]
    fn test_default_detector_order() {
        let orchestrator = Orchestrator::with_default_detectors();
        assert_eq!(orchestrator.detectors(), DiagramDialect::supported().to_vec());
    }

    #[test]
    fn test_register_detector() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.register_detector(Arc::new(PieDetector::new()));
        assert_eq!(orchestrator.classify("pie title X"), DiagramDialect::Pie);
        assert_eq!(orchestrator.classify("graph TD"), DiagramDialect::Unknown);
    }

    #[test]
    fn test_classify_every_dialect() {
        let orchestrator = Orchestrator::with_default_detectors();
        let cases = [
            ("flowchart LR\nA-->B", DiagramDialect::Flowchart),
            ("graph TD\nA-->B", DiagramDialect::Flowchart),
            ("sequenceDiagram\nA->>B: hi", DiagramDialect::Sequence),
            ("pie\n\"A\" : 1", DiagramDialect::Pie),
            ("stateDiagram-v2\n[*] --> A", DiagramDialect::State),
            ("mindmap\n  root((R))", DiagramDialect::Mindmap),
            ("%% comment\n\n  PIE title X", DiagramDialect::Pie),
            ("classDiagram\nA <|-- B", DiagramDialect::Unknown),
            ("", DiagramDialect::Unknown),
        ];
        for (input, expected) in cases {
            assert_eq!(orchestrator.classify(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_detect_diagram_type_errors_on_unknown() {
        let orchestrator = Orchestrator::with_default_detectors();
        assert_eq!(
            orchestrator.detect_diagram_type("pie").unwrap(),
            DiagramDialect::Pie
        );
        let err = orchestrator.detect_diagram_type("gantt\ntitle X").unwrap_err();
        assert!(err.to_string().contains("gantt"));
    }

    #[test]
    fn test_parse_unsupported() {
        let orchestrator = Orchestrator::with_default_detectors();
        let parsed = orchestrator.parse("journey\ntitle Day", None);
        assert_eq!(parsed, ParsedDiagram::Unsupported);
        assert!(!parsed.is_supported());
        assert_eq!(parsed.dialect(), DiagramDialect::Unknown);
    }

    #[test]
    fn test_parse_dispatches_by_dialect() {
        let orchestrator = Orchestrator::with_default_detectors();

        match orchestrator.parse("pie title Pets\n\"Dogs\" : 3\n\"Cats\" : 1", None) {
            ParsedDiagram::Pie(pie) => {
                assert_eq!(pie.title.as_deref(), Some("Pets"));
                assert_eq!(pie.segments.len(), 2);
            }
            other => panic!("expected pie, got {other:?}"),
        }

        match orchestrator.parse("sequenceDiagram\nparticipant A\nparticipant B\nA->>B: hi", None) {
            ParsedDiagram::Sequence(seq) => {
                assert_eq!(seq.actors.len(), 2);
                assert_eq!(seq.messages.len(), 1);
            }
            other => panic!("expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn test_flowchart_uses_supplied_geometry() {
        let orchestrator = Orchestrator::with_default_detectors();
        let geometry = FlowchartGeometry::new(200.0, 200.0)
            .with_node(NodeGeometry::new("A", Point::new(100.0, 50.0), 60.0, 30.0))
            .with_node(NodeGeometry::new("B", Point::new(100.0, 150.0), 60.0, 30.0));

        let with = orchestrator.parse("graph TD\nA-->B", Some(&geometry));
        let ParsedDiagram::Flowchart(layout) = with else {
            panic!("expected flowchart");
        };
        assert_eq!(layout.nodes.len(), 2);
        assert_eq!(layout.edges.len(), 1);

        let without = orchestrator.parse("graph TD\nA-->B", None);
        let ParsedDiagram::Flowchart(layout) = without else {
            panic!("expected flowchart");
        };
        assert!(layout.nodes.is_empty());
    }

    #[test]
    fn test_serialized_tag() {
        let orchestrator = Orchestrator::with_default_detectors();
        let parsed = orchestrator.parse("pie\n\"A\" : 1", None);
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["dialect"], "pie");
        assert_eq!(json["layout"]["segments"][0]["label"], "A");

        let json = serde_json::to_value(ParsedDiagram::Unsupported).unwrap();
        assert_eq!(json["dialect"], "unsupported");
    }
}
