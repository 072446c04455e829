//! Pie chart detector

use crate::core::{DiagramDialect, Detector};

/// Detector for pie chart syntax
pub struct PieDetector;

impl PieDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PieDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for PieDetector {
    fn dialect(&self) -> DiagramDialect {
        DiagramDialect::Pie
    }

    fn patterns(&self) -> &'static [&'static str] {
        &["pie"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_pie_header() {
        let detector = PieDetector::new();
        assert!(detector.detect("pie\n\"A\" : 1"));
        assert!(detector.detect("PIE title Budget"));
        assert!(detector.detect("%% chart\npie showData"));
    }

    #[test]
    fn test_rejects_other_dialects() {
        let detector = PieDetector::new();
        assert!(!detector.detect("graph TD; A-->B"));
        assert!(!detector.detect("\"A\" : 1\npie"));
    }
}
