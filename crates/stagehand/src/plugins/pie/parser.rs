//! Pie chart parser using chumsky
//!
//! Each line is one statement: the header (optionally carrying `showData`
//! and a title), a standalone `title` line, or a `"label" : value` entry.

use super::database::{PieDatabase, PieEntry};
use crate::core::chumsky_utils::{
    inline_whitespace, inline_whitespace_required, is_blank_or_comment, line_end, quoted,
};
use crate::core::{DiagramError, Parser as CoreParser};
use anyhow::Result;
use chumsky::prelude::*;
use chumsky::text::ident;
use tracing::{debug, span, trace, Level};

/// Parsed pie statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `pie [showData] [title <text>]`
    Header { title: Option<String> },
    /// `title <text>`
    Title(String),
    /// `showData` on its own line
    ShowData,
    /// `"label" : value`; the value text is validated when folded
    Entry { label: String, value: String },
}

/// Pie chart parser
pub struct PieParser;

impl PieParser {
    pub fn new() -> Self {
        Self
    }

    fn keyword<'src>(word: &'static str) -> impl Parser<'src, &'src str, ()> + Clone {
        ident()
            .filter(move |s: &&str| s.eq_ignore_ascii_case(word))
            .ignored()
    }

    fn title_text<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        Self::keyword("title")
            .ignore_then(inline_whitespace())
            .ignore_then(any().repeated().collect::<String>())
            .map(|s| s.trim().to_string())
    }

    fn header_parser<'src>() -> impl Parser<'src, &'src str, Statement> + Clone {
        let show_data = inline_whitespace_required()
            .then(Self::keyword("showdata"))
            .or_not();
        let title = inline_whitespace_required()
            .ignore_then(Self::title_text())
            .or_not();

        Self::keyword("pie")
            .ignore_then(show_data)
            .ignore_then(title)
            .then_ignore(inline_whitespace())
            .then_ignore(end())
            .map(|title| Statement::Header {
                title: title.filter(|t| !t.is_empty()),
            })
    }

    fn entry_parser<'src>() -> impl Parser<'src, &'src str, Statement> + Clone {
        let number = any()
            .filter(|c: &char| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
            .repeated()
            .at_least(1)
            .collect::<String>();

        quoted()
            .then_ignore(inline_whitespace())
            .then_ignore(just(':'))
            .then_ignore(inline_whitespace())
            .then(number)
            .then_ignore(line_end())
            .map(|(label, value)| Statement::Entry { label, value })
    }

    fn statement_parser<'src>() -> impl Parser<'src, &'src str, Statement> + Clone {
        Self::header_parser()
            .or(Self::entry_parser())
            .or(Self::title_text().then_ignore(end()).map(Statement::Title))
            .or(Self::keyword("showdata")
                .then_ignore(inline_whitespace())
                .then_ignore(end())
                .to(Statement::ShowData))
    }

    /// Parse a single trimmed line
    pub fn parse_statement(&self, input: &str) -> Result<Statement> {
        Self::statement_parser()
            .parse(input.trim())
            .into_result()
            .map_err(|errors| anyhow::anyhow!("Parse errors: {:?}", errors))
    }

    /// Fold one line into the database.
    ///
    /// Unrecognized statements and unusable slice values are reported with
    /// the 1-based `line_no` and leave the database unchanged.
    pub fn parse_line(
        &self,
        line: &str,
        line_no: usize,
        database: &mut PieDatabase,
    ) -> Result<(), DiagramError> {
        let statement = self.parse_statement(line).map_err(|_| {
            DiagramError::parse_error(format!("unrecognized statement '{}'", line.trim()), line_no)
        })?;

        match statement {
            Statement::Header { title: Some(title) } => database.set_title(title),
            Statement::Title(title) if !title.is_empty() => database.set_title(title),
            Statement::Header { title: None } | Statement::Title(_) | Statement::ShowData => {}
            Statement::Entry { label, value } => {
                let parsed = value.parse::<f64>().map_err(|e| {
                    DiagramError::parse_error(format!("slice '{}' value '{}': {}", label, value, e), line_no)
                })?;
                database
                    .add_entry(PieEntry::new(label, parsed))
                    .map_err(|e| DiagramError::parse_error(e.to_string(), line_no))?;
            }
        }
        Ok(())
    }
}

impl Default for PieParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreParser<PieDatabase> for PieParser {
    fn parse(&self, input: &str, database: &mut PieDatabase) -> Result<()> {
        let span = span!(Level::INFO, "parse_pie", input_len = input.len());
        let _enter = span.enter();

        for (line_no, line) in input.lines().enumerate() {
            if is_blank_or_comment(line) {
                continue;
            }
            if let Err(err) = self.parse_line(line, line_no + 1, database) {
                trace!(error = %err, "Skipping pie line");
            }
        }

        debug!(
            entry_count = database.entry_count(),
            has_title = database.title().is_some(),
            "Parsed pie chart"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "pie"
    }
}
