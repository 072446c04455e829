//! Tests for logging initialization
//!
//! Only one global subscriber can be installed per process, so most calls
//! here are allowed to fail once another test got there first.

use stagehand::core::logging::{init_logging, LogFormat};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert_eq!(variants, &["compact", "pretty", "json"]);
}

#[test]
fn test_init_logging_with_levels_and_formats() {
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("trace"), Some("pretty"));
    let _ = init_logging(Some("off"), Some("json"));
    let _ = init_logging(None, None);
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_pipeline_runs_with_subscriber() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let diagram = stagehand::parse("stateDiagram-v2\n[*] --> A", None);
    assert!(diagram.is_supported());
}
