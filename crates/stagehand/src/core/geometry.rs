//! Flowchart geometry supplied by an external renderer
//!
//! Flowcharts are not laid out here: a renderer draws the same diagram text
//! and reports where every node box landed. This module defines that contract
//! and the identifier cleaning needed to map renderer ids back to the ids the
//! author wrote.

use anyhow::Result;
use serde::Serialize;
use std::future::Future;

use super::{Bounds, NodeShape, Point};

/// Namespace token renderers prepend to flowchart node ids
pub const NODE_ID_PREFIX: &str = "flowchart-";

/// Rendered geometry of a single flowchart node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeGeometry {
    /// Cleaned node id, as written in the diagram text
    pub id: String,
    /// Rendered box
    pub bounds: Bounds,
    /// Shape inferred from the renderer's markup
    pub shape: NodeShape,
    /// Label text found in the rendered node, if any
    pub label: Option<String>,
}

impl NodeGeometry {
    pub fn new(id: impl Into<String>, center: Point, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            bounds: Bounds::new(center, width, height),
            shape: NodeShape::Rectangle,
            label: None,
        }
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Everything the renderer reports for one flowchart
///
/// Nodes are kept in renderer document order; that order is the fallback
/// ordering for nodes a topological sort cannot place.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FlowchartGeometry {
    pub nodes: Vec<NodeGeometry>,
    /// Viewport width of the whole rendered diagram
    pub width: f64,
    /// Viewport height of the whole rendered diagram
    pub height: f64,
}

impl FlowchartGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            nodes: Vec::new(),
            width,
            height,
        }
    }

    /// Add a node; a repeated id keeps the first geometry
    pub fn with_node(mut self, node: NodeGeometry) -> Self {
        self.push(node);
        self
    }

    /// Add a node; a repeated id keeps the first geometry
    pub fn push(&mut self, node: NodeGeometry) {
        if !self.nodes.iter().any(|n| n.id == node.id) {
            self.nodes.push(node);
        }
    }

    pub fn get(&self, id: &str) -> Option<&NodeGeometry> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Recover the author's node id from a renderer element id.
///
/// Drops the leading [`NODE_ID_PREFIX`] and a trailing `-<digits>`
/// disambiguation suffix: `flowchart-Start-12` becomes `Start`.
pub fn clean_node_id(raw: &str) -> String {
    let without_prefix = raw.strip_prefix(NODE_ID_PREFIX).unwrap_or(raw);
    match without_prefix.rsplit_once('-') {
        Some((head, digits))
            if !head.is_empty()
                && !digits.is_empty()
                && digits.chars().all(|c| c.is_ascii_digit()) =>
        {
            head.to_string()
        }
        _ => without_prefix.to_string(),
    }
}

/// An asynchronous provider of flowchart geometry
///
/// Implementations render `text` (or look up a pre-rendered result) and
/// report node geometry. The call is awaited once per parse attempt.
pub trait GeometrySource: Send + Sync {
    fn render(&self, text: &str) -> impl Future<Output = Result<FlowchartGeometry>> + Send;
}

/// Fixed geometry, independent of the text being parsed
#[derive(Debug, Clone, Default)]
pub struct StaticGeometry {
    geometry: FlowchartGeometry,
}

impl StaticGeometry {
    pub fn new(geometry: FlowchartGeometry) -> Self {
        Self { geometry }
    }
}

impl GeometrySource for StaticGeometry {
    fn render(&self, _text: &str) -> impl Future<Output = Result<FlowchartGeometry>> + Send {
        std::future::ready(Ok(self.geometry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_node_id_strips_prefix_and_suffix() {
        assert_eq!(clean_node_id("flowchart-Start-12"), "Start");
        assert_eq!(clean_node_id("flowchart-A-0"), "A");
    }

    #[test]
    fn test_clean_node_id_keeps_inner_dashes() {
        assert_eq!(clean_node_id("flowchart-load-config-3"), "load-config");
    }

    #[test]
    fn test_clean_node_id_without_prefix_or_suffix() {
        assert_eq!(clean_node_id("flowchart-Done"), "Done");
        assert_eq!(clean_node_id("Plain"), "Plain");
        assert_eq!(clean_node_id("node-7"), "node");
        assert_eq!(clean_node_id("flowchart-42"), "42");
    }

    #[test]
    fn test_geometry_keeps_first_duplicate() {
        let geometry = FlowchartGeometry::new(100.0, 100.0)
            .with_node(NodeGeometry::new("A", Point::new(10.0, 10.0), 20.0, 10.0))
            .with_node(NodeGeometry::new("A", Point::new(90.0, 90.0), 20.0, 10.0));
        assert_eq!(geometry.nodes.len(), 1);
        assert_eq!(geometry.get("A").unwrap().bounds.center, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_node_geometry_builders() {
        let node = NodeGeometry::new("B", Point::new(0.0, 0.0), 10.0, 10.0)
            .with_shape(NodeShape::Diamond)
            .with_label("Decide");
        assert_eq!(node.shape, NodeShape::Diamond);
        assert_eq!(node.label.as_deref(), Some("Decide"));
    }
}
