//! Flowchart detector implementation

use crate::core::{DiagramDialect, Detector};

/// Detector for flowchart syntax (`graph` and `flowchart` headers)
pub struct FlowchartDetector;

impl FlowchartDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlowchartDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for FlowchartDetector {
    fn dialect(&self) -> DiagramDialect {
        DiagramDialect::Flowchart
    }

    fn patterns(&self) -> &'static [&'static str] {
        &["flowchart", "graph"]
    }
}
