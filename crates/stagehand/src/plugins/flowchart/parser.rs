//! Flowchart parser using chumsky
//!
//! Text is split into statements on newlines and `;`. Each statement is
//! tokenized into a chain `node (arrow [|label|] node)*`; a chain of N
//! arrows yields N edges. Edge labels are attached positionally, so a label
//! always belongs to the arrow it follows.

use super::database::{EdgeData, FlowchartDatabase, NodeData};
use crate::core::chumsky_utils::{identifier, inline_whitespace, quoted};
use crate::core::{Database, Direction, EdgeStyle, NodeShape, Parser as CoreParser};
use anyhow::Result;
use chumsky::prelude::*;
use chumsky::text::ident;
use tracing::{debug, span, trace, Level};

/// Statements that carry styling or grouping only
const KEYWORDS: [&str; 8] = [
    "classdef",
    "class",
    "style",
    "linkstyle",
    "click",
    "subgraph",
    "end",
    "direction",
];

/// A node mention inside a chain
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRef {
    pub id: String,
    pub label: Option<String>,
    pub shape: Option<NodeShape>,
}

/// Connector between two consecutive nodes of a chain
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub style: EdgeStyle,
    pub label: Option<String>,
}

/// Parsed flowchart statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `graph TD` / `flowchart LR`
    Header(Direction),
    /// `A --> B -->|x| C`; `links[i]` joins `nodes[i]` and `nodes[i + 1]`
    Chain { nodes: Vec<NodeRef>, links: Vec<Link> },
    /// Styling, click handlers, subgraph markers
    Ignored,
}

/// Flowchart parser
pub struct FlowchartParser;

impl FlowchartParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a graph declaration header (e.g., "graph TD" or "flowchart LR")
    pub fn parse_header(&self, input: &str) -> Option<Direction> {
        let mut parts = input.split_whitespace();
        let keyword = parts.next()?.to_lowercase();
        if keyword != "graph" && keyword != "flowchart" {
            return None;
        }
        match parts.next() {
            Some(dir) => dir.parse().ok(),
            None => Some(Direction::TopDown),
        }
    }

    fn label_parser<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        let bare = none_of("[](){}|\"\n\r")
            .repeated()
            .at_least(1)
            .collect::<String>();

        quoted().or(bare).map(|s| s.trim().to_string())
    }

    fn shape_label<'src>() -> impl Parser<'src, &'src str, (String, NodeShape)> + Clone {
        let circle = just("((")
            .ignore_then(Self::label_parser())
            .then_ignore(just("))"))
            .map(|label| (label, NodeShape::Circle));

        let stadium = just("([")
            .ignore_then(Self::label_parser())
            .then_ignore(just("])"))
            .map(|label| (label, NodeShape::RoundedRect));

        let bracket = just('[')
            .ignore_then(Self::label_parser())
            .then_ignore(just(']'))
            .map(|label| (label, NodeShape::Rectangle));

        let paren = just('(')
            .ignore_then(Self::label_parser())
            .then_ignore(just(')'))
            .map(|label| (label, NodeShape::RoundedRect));

        let brace = just('{')
            .ignore_then(Self::label_parser())
            .then_ignore(just('}'))
            .map(|label| (label, NodeShape::Diamond));

        // Order by specificity
        circle.or(stadium).or(bracket).or(paren).or(brace)
    }

    fn node_parser<'src>() -> impl Parser<'src, &'src str, NodeRef> + Clone {
        let class_suffix = just(":::").ignore_then(ident()).ignored().or_not();

        identifier()
            .then(Self::shape_label().or_not())
            .then_ignore(class_suffix)
            .then_ignore(inline_whitespace())
            .map(|(id, shape)| match shape {
                Some((label, shape)) => NodeRef {
                    id,
                    label: Some(label),
                    shape: Some(shape),
                },
                None => NodeRef {
                    id,
                    label: None,
                    shape: None,
                },
            })
    }

    fn link_parser<'src>() -> impl Parser<'src, &'src str, Link> + Clone {
        // Edge connectors - longer first
        let connector = just("-.->")
            .to(EdgeStyle::DottedArrow)
            .or(just("==>").to(EdgeStyle::ThickArrow))
            .or(just("-->").to(EdgeStyle::Arrow))
            .or(just("---").to(EdgeStyle::Line))
            .then_ignore(inline_whitespace());

        let edge_label = just('|')
            .ignore_then(none_of("|\n").repeated().collect::<String>())
            .then_ignore(just('|'))
            .then_ignore(inline_whitespace())
            .map(|s| s.trim().to_string())
            .or_not();

        connector.then(edge_label).map(|(style, label)| Link {
            style,
            label: label.filter(|l| !l.is_empty()),
        })
    }

    fn chain_parser<'src>() -> impl Parser<'src, &'src str, Statement> + Clone {
        Self::node_parser()
            .then(
                Self::link_parser()
                    .then(Self::node_parser())
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .then_ignore(end())
            .map(|(first, rest)| {
                let mut nodes = vec![first];
                let mut links = Vec::with_capacity(rest.len());
                for (link, node) in rest {
                    links.push(link);
                    nodes.push(node);
                }
                Statement::Chain { nodes, links }
            })
    }

    /// Parse a single statement
    pub fn parse_statement(&self, input: &str) -> Result<Statement> {
        let input = input.trim();

        if let Some(direction) = self.parse_header(input) {
            return Ok(Statement::Header(direction));
        }

        let first_word = input
            .split(|c: char| c.is_whitespace())
            .next()
            .unwrap_or_default()
            .to_lowercase();
        if KEYWORDS.contains(&first_word.as_str()) {
            return Ok(Statement::Ignored);
        }

        Self::chain_parser()
            .parse(input)
            .into_result()
            .map_err(|errors| anyhow::anyhow!("Parse errors: {:?}", errors))
    }
}

impl Default for FlowchartParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreParser<FlowchartDatabase> for FlowchartParser {
    fn parse(&self, input: &str, database: &mut FlowchartDatabase) -> Result<()> {
        let span = span!(Level::INFO, "parse_flowchart", input_len = input.len());
        let _enter = span.enter();

        let statements = input
            .lines()
            .map(|line| line.split("%%").next().unwrap_or_default())
            .flat_map(|line| line.split(';'))
            .map(str::trim)
            .filter(|s| !s.is_empty());

        for statement in statements {
            match self.parse_statement(statement) {
                Ok(Statement::Header(direction)) => {
                    trace!(%direction, "Parsed header");
                    database.set_direction(direction);
                }
                Ok(Statement::Chain { nodes, links }) => {
                    for node in &nodes {
                        database.add_node_data(NodeData {
                            id: node.id.clone(),
                            label: node.label.clone(),
                            shape: node.shape,
                        })?;
                    }
                    for (pair, link) in nodes.windows(2).zip(links) {
                        let mut edge =
                            EdgeData::new(pair[0].id.clone(), pair[1].id.clone()).with_style(link.style);
                        if let Some(label) = link.label {
                            edge = edge.with_label(label);
                        }
                        database.add_edge_data(edge)?;
                    }
                }
                Ok(Statement::Ignored) => {}
                Err(e) => {
                    trace!(statement, error = %e, "Skipping unparseable statement");
                }
            }
        }

        debug!(
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            direction = %database.direction(),
            "Parsed flowchart"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> FlowchartDatabase {
        let mut db = FlowchartDatabase::new();
        FlowchartParser::new().parse(input, &mut db).unwrap();
        db
    }

    #[test]
    fn test_parse_header() {
        let parser = FlowchartParser::new();
        assert_eq!(parser.parse_header("graph TD"), Some(Direction::TopDown));
        assert_eq!(parser.parse_header("flowchart LR"), Some(Direction::LeftRight));
        assert_eq!(parser.parse_header("graph"), Some(Direction::TopDown));
        assert_eq!(parser.parse_header("A --> B"), None);
    }

    #[test]
    fn test_node_shapes() {
        let parser = FlowchartParser::new();
        let cases = [
            ("A[Box]", NodeShape::Rectangle, "Box"),
            ("A(Round)", NodeShape::RoundedRect, "Round"),
            ("A([Stadium])", NodeShape::RoundedRect, "Stadium"),
            ("A{Choice}", NodeShape::Diamond, "Choice"),
            ("A((Dot))", NodeShape::Circle, "Dot"),
            ("A[\"Quoted (yes)\"]", NodeShape::Rectangle, "Quoted (yes)"),
        ];
        for (input, shape, label) in cases {
            match parser.parse_statement(input).unwrap() {
                Statement::Chain { nodes, links } => {
                    assert!(links.is_empty());
                    assert_eq!(nodes[0].shape, Some(shape), "shape of {input}");
                    assert_eq!(nodes[0].label.as_deref(), Some(label), "label of {input}");
                }
                other => panic!("unexpected statement {:?}", other),
            }
        }
    }

    #[test]
    fn test_edge_styles() {
        let db = parse("graph TD\nA --> B\nB -.-> C\nC ==> D\nD --- E");
        let styles: Vec<EdgeStyle> = db.edges().map(|e| e.style).collect();
        assert_eq!(
            styles,
            vec![
                EdgeStyle::Arrow,
                EdgeStyle::DottedArrow,
                EdgeStyle::ThickArrow,
                EdgeStyle::Line
            ]
        );
    }

    #[test]
    fn test_chain_yields_one_edge_per_arrow() {
        let db = parse("graph LR; A-->B-->C-->D");
        assert_eq!(db.edge_count(), 3);
        assert_eq!(db.node_count(), 4);
        assert_eq!(db.direction(), Direction::LeftRight);
    }

    #[test]
    fn test_edge_labels_attach_positionally() {
        let db = parse("graph TD\nA -->|yes| B -->|no| C --> D");
        let labels: Vec<Option<&str>> = db.edges().map(|e| e.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("yes"), Some("no"), None]);
    }

    #[test]
    fn test_labels_recorded_from_any_mention() {
        let db = parse("flowchart TD\nA --> B\nB{Decide} --> C((End))");
        assert_eq!(db.get_node("B").unwrap().label.as_deref(), Some("Decide"));
        assert_eq!(db.get_node("C").unwrap().shape, Some(NodeShape::Circle));
        assert_eq!(db.get_node("A").unwrap().label, None);
    }

    #[test]
    fn test_keyword_and_comment_lines_skipped() {
        let db = parse(
            "graph TD\n%% comment\nclassDef hot fill:#f00\nsubgraph one\nA --> B %% trailing\nend\nclass A hot\nstyle B fill:#0f0\nclick A callback\nlinkStyle 0 stroke:#000\ndirection LR",
        );
        assert_eq!(db.edge_count(), 1);
        assert_eq!(db.node_count(), 2);
        assert_eq!(db.direction(), Direction::TopDown);
    }

    #[test]
    fn test_unparseable_statements_skipped() {
        let db = parse("graph TD\nA --> \n--> B\nC --> D");
        assert_eq!(db.edge_count(), 1);
        assert!(db.get_node("C").is_some());
    }

    #[test]
    fn test_numeric_ids() {
        let db = parse("graph TD\n1-->2\n2 --> 10_b[Ten]");
        assert_eq!(db.edge_count(), 2);
        let edges: Vec<(&str, &str)> = db.edges().map(|e| (e.from.as_str(), e.to.as_str())).collect();
        assert_eq!(edges, vec![("1", "2"), ("2", "10_b")]);
        assert_eq!(db.get_node("10_b").unwrap().label.as_deref(), Some("Ten"));
    }

    #[test]
    fn test_class_suffix_ignored() {
        let db = parse("graph TD\nA:::hot --> B[Two]:::cold");
        assert_eq!(db.edge_count(), 1);
        assert_eq!(db.get_node("B").unwrap().label.as_deref(), Some("Two"));
    }
}
