//! Core parser trait for diagram markup
//!
//! Parsers are stateless: each recognized line yields at most one typed fact,
//! which is folded into the database passed in. Lines that do not match any
//! fact are skipped rather than rejected.

use anyhow::Result;

/// Core trait for diagram parsers
///
/// # Example
/// ```
/// use stagehand::core::Parser;
/// use stagehand::plugins::sequence::{SequenceDatabase, SequenceParser};
///
/// let parser = SequenceParser::new();
/// let mut db = SequenceDatabase::new();
/// parser.parse("sequenceDiagram\nparticipant A\nparticipant B\nA->>B: hi", &mut db).unwrap();
/// assert_eq!(db.message_count(), 1);
/// ```
pub trait Parser<D>: Send + Sync {
    /// Parse diagram markup into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;
}
