//! Core detector trait for dialect classification
//!
//! Classification looks only at the header: the first non-empty line that is
//! not a `%%` comment, trimmed and lowercased.

use super::DiagramDialect;

/// Core trait for dialect detectors
///
/// Each dialect plugin provides a detector that recognizes its header
/// keywords. Prefixes are mutually exclusive across dialects, so an
/// orchestrator can stop at the first match.
///
/// # Example
/// ```
/// use stagehand::core::Detector;
/// use stagehand::plugins::pie::PieDetector;
///
/// let detector = PieDetector::new();
/// assert!(detector.detect("pie title Pets\n\"Dogs\" : 3"));
/// ```
pub trait Detector: Send + Sync {
    /// The dialect this detector recognizes
    fn dialect(&self) -> DiagramDialect;

    /// Lowercase header prefixes that identify the dialect
    fn patterns(&self) -> &'static [&'static str];

    /// Detect if the input's header matches this dialect
    fn detect(&self, input: &str) -> bool {
        header_line(input)
            .is_some_and(|header| self.patterns().iter().any(|p| header.starts_with(p)))
    }
}

/// Normalized header line: first non-empty, non-comment line, trimmed and lowercased
pub fn header_line(input: &str) -> Option<String> {
    input
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("%%"))
        .map(str::to_lowercase)
}
