//! Flowchart database implementation
//!
//! Stores what the text declares (direction, node labels and shapes, edges)
//! and, once attached, the renderer geometry the layout positions from.

use anyhow::Result;
use tracing::trace;

use crate::core::{Database, Direction, EdgeStyle, FlowchartGeometry, NodeShape};

/// A node as declared in the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub id: String,
    /// Label from a shape declaration such as `A[Label]`
    pub label: Option<String>,
    pub shape: Option<NodeShape>,
}

impl NodeData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            shape: None,
        }
    }
}

/// An edge as declared in the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    pub from: String,
    pub to: String,
    pub style: EdgeStyle,
    pub label: Option<String>,
}

impl EdgeData {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            style: EdgeStyle::Arrow,
            label: None,
        }
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Flowchart database implementation
///
/// Maintains insertion order for deterministic layout.
#[derive(Debug, Default)]
pub struct FlowchartDatabase {
    direction: Direction,
    nodes: Vec<NodeData>,
    edges: Vec<EdgeData>,
    geometry: Option<FlowchartGeometry>,
}

impl FlowchartDatabase {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flow direction
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Get the flow direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Attach the renderer geometry the layout reads node boxes from
    pub fn set_geometry(&mut self, geometry: FlowchartGeometry) {
        self.geometry = Some(geometry);
    }

    pub fn geometry(&self) -> Option<&FlowchartGeometry> {
        self.geometry.as_ref()
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Add or refine a node. A later declaration fills in label and shape;
    /// a bare reference never erases them.
    pub fn add_node_data(&mut self, node: NodeData) -> Result<()> {
        match self.nodes.iter_mut().find(|n| n.id == node.id) {
            Some(existing) => {
                if node.label.is_some() {
                    existing.label = node.label;
                }
                if node.shape.is_some() {
                    existing.shape = node.shape;
                }
            }
            None => {
                trace!(node_id = %node.id, "Adding node");
                self.nodes.push(node);
            }
        }
        Ok(())
    }

    /// Add an edge, creating bare endpoint nodes as needed
    pub fn add_edge_data(&mut self, edge: EdgeData) -> Result<()> {
        for id in [&edge.from, &edge.to] {
            if !self.has_node(id) {
                self.nodes.push(NodeData::new(id.clone()));
            }
        }
        self.edges.push(edge);
        Ok(())
    }
}

impl Database for FlowchartDatabase {
    type Node = NodeData;
    type Edge = EdgeData;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_node_data(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_edge_data(edge)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.nodes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.geometry = None;
        self.direction = Direction::default();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
