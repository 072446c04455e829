//! Mindmap parser
//!
//! Each content line is one node. Its indentation decides its parent and a
//! chumsky tokenizer strips the optional `id` prefix and shape delimiters
//! down to the label.

use super::database::MindmapDatabase;
use crate::core::chumsky_utils::is_blank_or_comment;
use crate::core::Parser as CoreParser;
use anyhow::Result;
use chumsky::prelude::*;
use tracing::{debug, span, trace, Level};

/// Columns a tab counts for when measuring indentation
const TAB_WIDTH: usize = 2;

/// A content line split into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct NodeText {
    /// Text before the shape delimiters, if a shape was present
    pub id: Option<String>,
    pub label: String,
}

/// Mindmap parser
pub struct MindmapParser;

impl MindmapParser {
    pub fn new() -> Self {
        Self
    }

    fn shape<'src>(
        open: &'static str,
        close: &'static str,
    ) -> impl Parser<'src, &'src str, String> + Clone {
        just(open)
            .ignore_then(
                any()
                    .and_is(just(close).not())
                    .repeated()
                    .collect::<String>(),
            )
            .then_ignore(just(close))
    }

    fn node_parser<'src>() -> impl Parser<'src, &'src str, (String, String)> + Clone {
        let prefix = none_of("([{) \t").repeated().collect::<String>();

        // Order by specificity
        let shape = Self::shape("((", "))")
            .or(Self::shape("{{", "}}"))
            .or(Self::shape("))", "(("))
            .or(Self::shape("[", "]"))
            .or(Self::shape("(", ")"))
            .or(Self::shape(")", "("));

        prefix.then(shape).then_ignore(end())
    }

    /// Split a trimmed content line into id and label
    pub fn parse_node_text(&self, text: &str) -> NodeText {
        match Self::node_parser().parse(text).into_result() {
            Ok((id, label)) => NodeText {
                id: Some(id).filter(|id| !id.is_empty()),
                label: label.trim().trim_matches('"').to_string(),
            },
            Err(_) => NodeText {
                id: None,
                label: text.to_string(),
            },
        }
    }

    fn indent_width(line: &str) -> usize {
        line.chars()
            .take_while(|c| c.is_whitespace())
            .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
            .sum()
    }

    /// Lines that carry a node, with their indentation
    fn content_lines(input: &str) -> Vec<(usize, &str)> {
        input
            .lines()
            .filter(|line| !is_blank_or_comment(line))
            .filter(|line| {
                let trimmed = line.trim();
                // Header and `::icon(..)` / `:::class` decorations
                !trimmed.eq_ignore_ascii_case("mindmap") && !trimmed.starts_with("::")
            })
            .map(|line| (Self::indent_width(line), line.trim()))
            .collect()
    }
}

impl Default for MindmapParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreParser<MindmapDatabase> for MindmapParser {
    fn parse(&self, input: &str, database: &mut MindmapDatabase) -> Result<()> {
        let span = span!(Level::INFO, "parse_mindmap", input_len = input.len());
        let _enter = span.enter();

        let lines = Self::content_lines(input);
        let texts: Vec<NodeText> = lines
            .iter()
            .map(|(_, text)| self.parse_node_text(text))
            .collect();

        // An explicit `root(..)` line wins; otherwise the first line is the root
        let root = texts
            .iter()
            .position(|t| t.id.as_deref() == Some("root"))
            .unwrap_or(0);
        if root > 0 {
            trace!(skipped = root, "Ignoring lines before the root");
        }

        let mut rows = lines.iter().zip(texts).skip(root);
        if let Some(((indent, _), text)) = rows.next() {
            database.set_root(text.label, *indent);
        }
        for ((indent, _), text) in rows {
            let index = database.add_node(text.label, *indent)?;
            trace!(index, indent, "Added mindmap node");
        }

        debug!(node_count = database.node_count(), "Parsed mindmap");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mindmap"
    }
}
