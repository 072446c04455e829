//! Sequence diagram parser
//!
//! Line oriented: `participant`/`actor` declarations and
//! `<from> <arrow> <to> : <text>` messages. Everything else (notes, loops,
//! activations) is skipped.

use super::database::{Actor, ArrowHead, Message, SequenceDatabase};
use crate::core::chumsky_utils::is_blank_or_comment;
use crate::core::{LineStyle, Parser};
use anyhow::Result;
use tracing::{debug, span, trace, Level};

/// Arrow tokens, longest first so a longer token wins at the same position
const ARROWS: [(&str, LineStyle, ArrowHead); 8] = [
    ("-->>", LineStyle::Dashed, ArrowHead::Arrow),
    ("->>", LineStyle::Solid, ArrowHead::Arrow),
    ("--x", LineStyle::Dashed, ArrowHead::Cross),
    ("--)", LineStyle::Dashed, ArrowHead::Open),
    ("-->", LineStyle::Dashed, ArrowHead::None),
    ("-x", LineStyle::Solid, ArrowHead::Cross),
    ("-)", LineStyle::Solid, ArrowHead::Open),
    ("->", LineStyle::Solid, ArrowHead::None),
];

/// Sequence diagram parser
pub struct SequenceParser;

impl SequenceParser {
    pub fn new() -> Self {
        Self
    }

    /// Earliest arrow token in `head`, preferring the longest at that position
    fn find_arrow(head: &str) -> Option<(usize, &'static str, LineStyle, ArrowHead)> {
        head.match_indices('-').find_map(|(pos, _)| {
            ARROWS
                .iter()
                .find(|(token, _, _)| head[pos..].starts_with(token))
                .map(|&(token, line, arrow)| (pos, token, line, arrow))
        })
    }

    /// Parse a message line like "Alice->>Bob: Hello"
    fn parse_message_line(&self, line: &str) -> Option<Message> {
        let (head, text) = match line.split_once(':') {
            Some((head, text)) => (head, text.trim()),
            None => (line, ""),
        };

        let (pos, token, style, arrow) = Self::find_arrow(head)?;
        let from = head[..pos].trim();
        // `+`/`-` after the arrow toggle activation bars
        let to = head[pos + token.len()..]
            .trim()
            .trim_start_matches(|c: char| c == '+' || c == '-')
            .trim();

        if from.is_empty() || to.is_empty() || from.contains(char::is_whitespace) {
            return None;
        }

        Some(Message::new(from, to, text).with_arrow(style, arrow))
    }

    /// Parse a declaration like "participant Alice" or "actor A as Alice"
    fn parse_actor_line(&self, line: &str) -> Option<Actor> {
        let (keyword, rest) = line.split_once(char::is_whitespace)?;
        if !keyword.eq_ignore_ascii_case("participant") && !keyword.eq_ignore_ascii_case("actor") {
            return None;
        }

        let rest = rest.trim();
        match rest.split_once(" as ") {
            Some((id, name)) if !id.trim().is_empty() => {
                Some(Actor::with_name(id.trim(), name.trim()))
            }
            Some(_) => None,
            None if rest.is_empty() => None,
            None => Some(Actor::new(rest)),
        }
    }
}

impl Default for SequenceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<SequenceDatabase> for SequenceParser {
    fn parse(&self, input: &str, database: &mut SequenceDatabase) -> Result<()> {
        let span = span!(Level::INFO, "parse_sequence", input_len = input.len());
        let _enter = span.enter();

        for (line_no, line) in input.lines().enumerate() {
            let line = line.trim();

            if is_blank_or_comment(line) || line.to_lowercase().starts_with("sequencediagram") {
                continue;
            }

            if let Some(actor) = self.parse_actor_line(line) {
                trace!(id = %actor.id, name = %actor.name, "Declared actor");
                database.add_actor(actor)?;
                continue;
            }

            if let Some(message) = self.parse_message_line(line) {
                trace!(from = %message.from, to = %message.to, "Parsed message");
                database.add_message(message)?;
                continue;
            }

            trace!(line = line_no + 1, "Skipping unrecognized sequence line");
        }

        debug!(
            actor_count = database.actor_count(),
            message_count = database.message_count(),
            "Parsed sequence diagram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> SequenceDatabase {
        let mut db = SequenceDatabase::new();
        SequenceParser::new().parse(input, &mut db).unwrap();
        db
    }

    #[test]
    fn test_parse_simple_message() {
        let db = parse("sequenceDiagram\n    Alice->>Bob: Hello");
        assert_eq!(db.message_count(), 1);
        let msg = &db.messages()[0];
        assert_eq!(msg.from, "Alice");
        assert_eq!(msg.to, "Bob");
        assert_eq!(msg.text, "Hello");
        assert_eq!(msg.line, LineStyle::Solid);
        assert_eq!(msg.head, ArrowHead::Arrow);
    }

    #[test]
    fn test_all_arrow_tokens() {
        let db = parse(
            "sequenceDiagram\nA->>B: a\nA-->>B: b\nA->B: c\nA-->B: d\nA-xB: e\nA--xB: f\nA-)B: g\nA--)B: h",
        );
        let styles: Vec<(LineStyle, ArrowHead)> =
            db.messages().iter().map(|m| (m.line, m.head)).collect();
        assert_eq!(
            styles,
            vec![
                (LineStyle::Solid, ArrowHead::Arrow),
                (LineStyle::Dashed, ArrowHead::Arrow),
                (LineStyle::Solid, ArrowHead::None),
                (LineStyle::Dashed, ArrowHead::None),
                (LineStyle::Solid, ArrowHead::Cross),
                (LineStyle::Dashed, ArrowHead::Cross),
                (LineStyle::Solid, ArrowHead::Open),
                (LineStyle::Dashed, ArrowHead::Open),
            ]
        );
        assert!(db.messages().iter().all(|m| m.from == "A" && m.to == "B"));
    }

    #[test]
    fn test_dashes_inside_ids() {
        let db = parse("sequenceDiagram\napi-gw->>auth-svc: check");
        let msg = &db.messages()[0];
        assert_eq!(msg.from, "api-gw");
        assert_eq!(msg.to, "auth-svc");
    }

    #[test]
    fn test_arrows_in_text_are_ignored() {
        let db = parse("sequenceDiagram\nA->>B: go -> there");
        let msg = &db.messages()[0];
        assert_eq!(msg.to, "B");
        assert_eq!(msg.text, "go -> there");
    }

    #[test]
    fn test_activation_markers_stripped() {
        let db = parse("sequenceDiagram\nA->>+B: start\nB-->>-A: done");
        assert_eq!(db.messages()[0].to, "B");
        assert_eq!(db.messages()[1].to, "A");
    }

    #[test]
    fn test_participant_declarations() {
        let db = parse("sequenceDiagram\nparticipant A as Alice\nactor B\nparticipant A as Again");
        assert_eq!(db.actor_count(), 2);
        assert_eq!(db.actors()[0].name, "Alice");
        assert_eq!(db.actors()[1].id, "B");
        assert_eq!(db.actors()[1].name, "B");
    }

    #[test]
    fn test_skips_notes_and_blocks() {
        let db = parse(
            "sequenceDiagram\nparticipant A\n%% comment\nNote right of A: thinking\nloop Every minute\nA->>A: tick\nend",
        );
        assert_eq!(db.message_count(), 1);
        assert_eq!(db.actor_count(), 1);
    }
}
