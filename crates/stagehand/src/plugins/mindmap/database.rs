//! Mindmap database
//!
//! Nodes live in an arena; parents are referenced by index and always
//! precede their children. Indentation is resolved against a stack of open
//! ancestors as lines arrive.

use anyhow::Result;

/// A node in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MindmapEntry {
    pub label: String,
    /// Tree depth; the root is 0
    pub depth: usize,
    pub parent: Option<usize>,
}

/// Mindmap database
#[derive(Debug, Default)]
pub struct MindmapDatabase {
    nodes: Vec<MindmapEntry>,
    root_indent: usize,
    /// Open ancestors as (arena index, indentation level)
    ancestors: Vec<(usize, usize)>,
}

impl MindmapDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root. Any previous content is discarded.
    pub fn set_root(&mut self, label: impl Into<String>, indent: usize) {
        self.nodes.clear();
        self.nodes.push(MindmapEntry {
            label: label.into(),
            depth: 0,
            parent: None,
        });
        self.root_indent = indent;
        self.ancestors = vec![(0, 0)];
    }

    /// Add a node indented by `indent` columns. Returns its arena index.
    ///
    /// The indentation level is `(indent - root_indent) / 2`, at least 1; the
    /// parent is the nearest open ancestor with a smaller level.
    pub fn add_node(&mut self, label: impl Into<String>, indent: usize) -> Result<usize> {
        if self.nodes.is_empty() {
            anyhow::bail!("Mindmap node added before the root");
        }

        let level = (indent.saturating_sub(self.root_indent) / 2).max(1);
        while self.ancestors.last().is_some_and(|&(_, open)| open >= level) {
            self.ancestors.pop();
        }
        let parent = self.ancestors.last().map(|&(index, _)| index).unwrap_or(0);

        let index = self.nodes.len();
        self.nodes.push(MindmapEntry {
            label: label.into(),
            depth: self.nodes[parent].depth + 1,
            parent: Some(parent),
        });
        self.ancestors.push((index, level));
        Ok(index)
    }

    pub fn nodes(&self) -> &[MindmapEntry] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_root(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Arena indices of a node's children, in declaration order
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.parent == Some(index))
            .map(|(i, _)| i)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.ancestors.clear();
        self.root_indent = 0;
    }
}
