//! State diagram detector
//!
//! Identifies state diagram syntax from input text.

use crate::core::{DiagramDialect, Detector};

/// Detector for state diagram syntax
pub struct StateDetector;

impl StateDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StateDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for StateDetector {
    fn dialect(&self) -> DiagramDialect {
        DiagramDialect::State
    }

    fn patterns(&self) -> &'static [&'static str] {
        // Also covers `stateDiagram-v2`
        &["statediagram"]
    }
}
