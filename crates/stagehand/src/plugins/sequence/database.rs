//! Sequence diagram database
//!
//! Stores declared actors and messages in source order. Messages may name
//! actors that were never declared; the layout drops those.

use crate::core::{Database, LineStyle};
use anyhow::Result;
use serde::Serialize;

/// Arrow head drawn at the receiving end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowHead {
    /// Filled arrow head (`->>`)
    #[default]
    Arrow,
    /// Open arrow head, async (`-)`)
    Open,
    /// Cross, lost message (`-x`)
    Cross,
    /// No arrow head (`->`)
    None,
}

/// A declared actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Identifier used in messages
    pub id: String,
    /// Display name (may differ from id via `as` syntax)
    pub name: String,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
        }
    }

    pub fn with_name(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A message between actors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub text: String,
    pub line: LineStyle,
    pub head: ArrowHead,
}

impl Message {
    pub fn new(from: impl Into<String>, to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            line: LineStyle::Solid,
            head: ArrowHead::Arrow,
        }
    }

    pub fn with_arrow(mut self, line: LineStyle, head: ArrowHead) -> Self {
        self.line = line;
        self.head = head;
        self
    }
}

/// Sequence diagram database
#[derive(Debug, Default)]
pub struct SequenceDatabase {
    actors: Vec<Actor>,
    messages: Vec<Message>,
}

impl SequenceDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an actor; a repeated id keeps the first declaration
    pub fn add_actor(&mut self, actor: Actor) -> Result<()> {
        if !self.actors.iter().any(|a| a.id == actor.id) {
            self.actors.push(actor);
        }
        Ok(())
    }

    pub fn add_message(&mut self, message: Message) -> Result<()> {
        self.messages.push(message);
        Ok(())
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Lane index of an actor
    pub fn actor_index(&self, id: &str) -> Option<usize> {
        self.actors.iter().position(|a| a.id == id)
    }

    pub fn clear_all(&mut self) {
        self.actors.clear();
        self.messages.clear();
    }
}

impl Database for SequenceDatabase {
    type Node = Actor;
    type Edge = Message;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_actor(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_message(edge)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.actors.iter().find(|a| a.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.actors.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.messages.iter()
    }

    fn clear(&mut self) {
        self.clear_all()
    }

    fn node_count(&self) -> usize {
        self.actor_count()
    }

    fn edge_count(&self) -> usize {
        self.message_count()
    }
}
