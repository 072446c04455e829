//! Sequence diagram detector

use crate::core::{DiagramDialect, Detector};

/// Detector for sequence diagram syntax
pub struct SequenceDetector;

impl SequenceDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SequenceDetector {
    fn dialect(&self) -> DiagramDialect {
        DiagramDialect::Sequence
    }

    fn patterns(&self) -> &'static [&'static str] {
        &["sequencediagram"]
    }
}
