//! State diagram parser using chumsky
//!
//! Parses state diagram syntax into the database, one statement per line.

use super::database::{StateData, StateDatabase, TransitionData, END_MARKER, START_MARKER};
use crate::core::chumsky_utils::is_blank_or_comment;
use crate::core::Parser as CoreParser;
use anyhow::Result;
use chumsky::prelude::*;
use tracing::{debug, span, trace, Level};

/// Either side of a transition
#[derive(Debug, Clone, PartialEq)]
pub enum StateRef {
    /// The `[*]` pseudo-state
    Terminal,
    Named(String),
}

/// Parsed state diagram statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `state "description" as id` or `state id`
    StateDecl { id: String, label: Option<String> },
    /// `id : description`
    Description { id: String, text: String },
    /// `from --> to` or `from --> to : label`
    Transition {
        from: StateRef,
        to: StateRef,
        label: Option<String>,
    },
}

/// State diagram parser
pub struct StateParser;

impl StateParser {
    pub fn new() -> Self {
        Self
    }

    fn inline_ws<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
        one_of(" \t").repeated().ignored()
    }

    fn inline_ws_required<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
        one_of(" \t").repeated().at_least(1).ignored()
    }

    /// Parse an identifier (state name)
    fn identifier<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
        any()
            .filter(|c: &char| c.is_alphanumeric() || *c == '_')
            .repeated()
            .at_least(1)
            .collect::<String>()
    }

    /// Parse a state reference (either [*] or identifier)
    fn state_ref<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, StateRef, extra::Err<Rich<'src, char>>> + Clone {
        just("[*]")
            .to(StateRef::Terminal)
            .or(Self::identifier().map(StateRef::Named))
    }

    /// Parse a quoted string
    fn quoted_string<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
        just('"')
            .ignore_then(any().filter(|c| *c != '"').repeated().collect::<String>())
            .then_ignore(just('"'))
    }

    /// Text after a `:` up to the end of the line, trimmed
    fn colon_text<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
        just(':')
            .padded_by(Self::inline_ws())
            .ignore_then(any().repeated().collect::<String>())
            .map(|s| s.trim().to_string())
    }

    /// Parse a transition: `from --> to` or `from --> to : label`
    fn transition_parser<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, Statement, extra::Err<Rich<'src, char>>> + Clone
    {
        Self::state_ref()
            .then_ignore(just("-->").padded_by(Self::inline_ws()))
            .then(Self::state_ref())
            .then_ignore(Self::inline_ws())
            .then(Self::colon_text().or_not())
            .map(|((from, to), label)| Statement::Transition {
                from,
                to,
                label: label.filter(|s| !s.is_empty()),
            })
    }

    /// Parse `state "description" as id`, `state id` or `state id {`
    fn state_decl_parser<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, Statement, extra::Err<Rich<'src, char>>> + Clone
    {
        let described = Self::quoted_string()
            .then_ignore(Self::inline_ws_required())
            .then_ignore(just("as"))
            .then_ignore(Self::inline_ws_required())
            .then(Self::identifier())
            .map(|(label, id)| Statement::StateDecl {
                id,
                label: Some(label),
            });

        let bare = Self::identifier()
            .then_ignore(Self::inline_ws())
            .then_ignore(just('{').or_not())
            .map(|id| Statement::StateDecl { id, label: None });

        just("state")
            .ignore_then(Self::inline_ws_required())
            .ignore_then(described.or(bare))
    }

    /// Parse `id : description`
    fn description_parser<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, Statement, extra::Err<Rich<'src, char>>> + Clone
    {
        Self::identifier()
            .then(Self::colon_text())
            .map(|(id, text)| Statement::Description { id, text })
    }

    /// Parse a single statement
    fn statement_parser<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, Statement, extra::Err<Rich<'src, char>>> + Clone
    {
        Self::state_decl_parser()
            .or(Self::transition_parser())
            .or(Self::description_parser())
    }

    /// Parse a statement from input
    pub fn parse_statement(&self, input: &str) -> Result<Statement> {
        let parser = Self::statement_parser()
            .then_ignore(Self::inline_ws())
            .then_ignore(end());

        parser
            .parse(input.trim())
            .into_result()
            .map_err(|errors| anyhow::anyhow!("Parse error: {:?}", errors))
    }

    /// Check if a line is a header line
    fn is_header_line(&self, line: &str) -> bool {
        line.trim().to_lowercase().starts_with("statediagram")
    }

    fn resolve(side: StateRef, marker: &str) -> String {
        match side {
            StateRef::Terminal => marker.to_string(),
            StateRef::Named(id) => id,
        }
    }
}

impl Default for StateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreParser<StateDatabase> for StateParser {
    fn parse(&self, input: &str, database: &mut StateDatabase) -> Result<()> {
        let span = span!(Level::INFO, "parse_state", input_len = input.len());
        let _enter = span.enter();

        for (line_no, line) in input.lines().enumerate() {
            let trimmed = line.trim();

            // Skip empty lines, comments, and header
            if is_blank_or_comment(trimmed) || self.is_header_line(trimmed) {
                continue;
            }

            match self.parse_statement(trimmed) {
                Ok(Statement::StateDecl { id, label }) => {
                    match label {
                        Some(label) => database.add_state(StateData::new(id, label))?,
                        None => database.ensure_state(&id)?,
                    }
                }
                Ok(Statement::Description { id, text }) => {
                    database.add_state(StateData::new(id, text))?;
                }
                Ok(Statement::Transition { from, to, label }) => {
                    // `[*]` is the start marker as a source and the end marker as a target
                    let mut transition = TransitionData::new(
                        Self::resolve(from, START_MARKER),
                        Self::resolve(to, END_MARKER),
                    );
                    if let Some(label) = label {
                        transition = transition.with_label(label);
                    }
                    database.add_transition(transition)?;
                }
                Err(_) => {
                    trace!(line = line_no + 1, "Skipping unrecognized state line");
                }
            }
        }

        debug!(
            state_count = database.state_count(),
            transition_count = database.transition_count(),
            "Parsed state diagram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "state"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::state::StateKind;

    #[test]
    fn test_parse_simple_transition() {
        let parser = StateParser::new();
        let result = parser.parse_statement("Idle --> Running").unwrap();
        assert_eq!(
            result,
            Statement::Transition {
                from: StateRef::Named("Idle".to_string()),
                to: StateRef::Named("Running".to_string()),
                label: None,
            }
        );
    }

    #[test]
    fn test_parse_transition_with_label() {
        let parser = StateParser::new();
        let result = parser.parse_statement("Idle-->Running : start").unwrap();
        assert_eq!(
            result,
            Statement::Transition {
                from: StateRef::Named("Idle".to_string()),
                to: StateRef::Named("Running".to_string()),
                label: Some("start".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_terminal_transition() {
        let parser = StateParser::new();
        let result = parser.parse_statement("[*] --> Idle").unwrap();
        assert_eq!(
            result,
            Statement::Transition {
                from: StateRef::Terminal,
                to: StateRef::Named("Idle".to_string()),
                label: None,
            }
        );
    }

    #[test]
    fn test_parse_state_declarations() {
        let parser = StateParser::new();
        assert_eq!(
            parser
                .parse_statement("state \"Processing data\" as s1")
                .unwrap(),
            Statement::StateDecl {
                id: "s1".to_string(),
                label: Some("Processing data".to_string()),
            }
        );
        assert_eq!(
            parser.parse_statement("state Waiting").unwrap(),
            Statement::StateDecl {
                id: "Waiting".to_string(),
                label: None,
            }
        );
        assert_eq!(
            parser.parse_statement("state Composite {").unwrap(),
            Statement::StateDecl {
                id: "Composite".to_string(),
                label: None,
            }
        );
    }

    #[test]
    fn test_parse_description() {
        let parser = StateParser::new();
        assert_eq!(
            parser.parse_statement("s2 : Waiting for input").unwrap(),
            Statement::Description {
                id: "s2".to_string(),
                text: "Waiting for input".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_full_diagram() {
        let parser = StateParser::new();
        let mut db = StateDatabase::new();

        let input = r#"
stateDiagram-v2
    [*] --> Idle
    Idle --> Processing : start
    Processing --> Done : complete
    Done --> [*]
"#;

        parser.parse(input, &mut db).unwrap();

        // start marker, Idle, Processing, Done, end marker
        assert_eq!(db.state_count(), 5);
        assert_eq!(db.transition_count(), 4);
        assert_eq!(db.states()[0].kind, StateKind::Start);
        assert_eq!(db.states()[4].kind, StateKind::End);
    }

    #[test]
    fn test_skips_comments_and_unknown_lines() {
        let parser = StateParser::new();
        let mut db = StateDatabase::new();

        let input = r#"
stateDiagram-v2
    %% This is a comment
    direction LR
    note right of Idle : hello
    [*] --> Idle
    }
"#;

        parser.parse(input, &mut db).unwrap();
        assert_eq!(db.transition_count(), 1);
        assert_eq!(db.state_count(), 2);
    }
}
