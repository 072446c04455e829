//! Core database trait for parsed diagram facts
//!
//! A database is the accumulator a parser folds recognized lines into.
//! Parsers stay stateless; everything a later layout pass needs lives here.

use anyhow::Result;

/// Core trait for graph-shaped diagram databases
///
/// The associated types allow each dialect to define its own node and edge
/// records. Insertion order is preserved, since layouts and reveal schedules
/// depend on it.
pub trait Database: Send + Sync {
    /// The node record type for this database
    type Node: Clone + Send + Sync;

    /// The edge record type for this database
    type Edge: Clone + Send + Sync;

    /// Add a node to the database
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Add an edge to the database
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}
