//! Core layout trait for diagram positioning
//!
//! A layout algorithm reads a populated database and produces an immutable
//! structure with final coordinates. Each dialect has its own placement rule.

use anyhow::Result;

/// Core trait for layout algorithms
pub trait LayoutAlgorithm<D>: Send + Sync {
    /// The positioned output of this layout algorithm
    type Output;

    /// Arrange the elements stored in the database
    fn layout(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;
}
