use crate::core::{DiagramDialect, Detector};

/// Detector for mindmap syntax
pub struct MindmapDetector;

impl MindmapDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MindmapDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MindmapDetector {
    fn dialect(&self) -> DiagramDialect {
        DiagramDialect::Mindmap
    }

    fn patterns(&self) -> &'static [&'static str] {
        &["mindmap"]
    }
}
