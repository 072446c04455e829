//! Flowchart layout algorithm
//!
//! Node boxes come from renderer geometry. This pass merges them with what
//! the text declares, orders nodes topologically for the reveal schedule,
//! and routes every edge between box borders.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, span, trace, Level};

use super::database::FlowchartDatabase;
use crate::core::{graph, Bounds, Database, Direction, EdgeStyle, LayoutAlgorithm, NodeShape, Point};

/// Positioned flowchart node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowchartNode {
    pub id: String,
    pub label: String,
    pub bounds: Bounds,
    pub shape: NodeShape,
}

/// Routed flowchart edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowchartEdge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub style: EdgeStyle,
    /// Two points for direct routes, four for detours
    pub points: Vec<Point>,
}

/// Laid out flowchart, nodes in topological order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FlowchartLayout {
    pub direction: Direction,
    pub nodes: Vec<FlowchartNode>,
    pub edges: Vec<FlowchartEdge>,
    pub width: f64,
    pub height: f64,
}

impl FlowchartLayout {
    /// Layout with no nodes, used when geometry is unavailable
    pub fn empty(direction: Direction) -> Self {
        Self {
            direction,
            nodes: Vec::new(),
            edges: Vec::new(),
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Flowchart layout algorithm
#[derive(Debug, Clone)]
pub struct FlowchartLayoutAlgorithm {
    /// How far right of both boxes a backward edge detours
    lateral_offset: f64,
}

impl FlowchartLayoutAlgorithm {
    pub fn new() -> Self {
        Self {
            lateral_offset: 40.0,
        }
    }

    pub fn with_lateral_offset(mut self, lateral_offset: f64) -> Self {
        self.lateral_offset = lateral_offset;
        self
    }

    /// Route between two boxes.
    ///
    /// Mostly vertical pairs connect bottom to top when the target is below,
    /// otherwise they detour around the right side. Mostly horizontal pairs
    /// connect their facing sides.
    pub fn route(&self, source: &Bounds, target: &Bounds) -> Vec<Point> {
        let dx = target.center.x - source.center.x;
        let dy = target.center.y - source.center.y;

        if dy.abs() >= dx.abs() {
            if dy >= 0.0 {
                vec![
                    Point::new(source.center.x, source.bottom()),
                    Point::new(target.center.x, target.top()),
                ]
            } else {
                let lane = source.right().max(target.right()) + self.lateral_offset;
                vec![
                    Point::new(source.right(), source.center.y),
                    Point::new(lane, source.center.y),
                    Point::new(lane, target.center.y),
                    Point::new(target.right(), target.center.y),
                ]
            }
        } else if dx >= 0.0 {
            vec![
                Point::new(source.right(), source.center.y),
                Point::new(target.left(), target.center.y),
            ]
        } else {
            vec![
                Point::new(source.left(), source.center.y),
                Point::new(target.right(), target.center.y),
            ]
        }
    }
}

impl Default for FlowchartLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<FlowchartDatabase> for FlowchartLayoutAlgorithm {
    type Output = FlowchartLayout;

    fn layout(&self, database: &FlowchartDatabase) -> Result<FlowchartLayout> {
        let span = span!(
            Level::INFO,
            "layout_flowchart",
            node_count = database.node_count(),
            edge_count = database.edge_count()
        );
        let _enter = span.enter();

        let Some(geometry) = database.geometry() else {
            debug!("No geometry attached, producing empty flowchart");
            return Ok(FlowchartLayout::empty(database.direction()));
        };

        // Geometry document order; labels prefer the text, then the renderer
        let nodes: Vec<FlowchartNode> = geometry
            .nodes
            .iter()
            .map(|rendered| {
                let declared = database.get_node(&rendered.id);
                let label = declared
                    .and_then(|n| n.label.clone())
                    .or_else(|| rendered.label.clone())
                    .unwrap_or_else(|| rendered.id.clone());
                let shape = match declared.and_then(|n| n.shape) {
                    Some(NodeShape::Circle) => NodeShape::Circle,
                    _ => rendered.shape,
                };
                FlowchartNode {
                    id: rendered.id.clone(),
                    label,
                    bounds: rendered.bounds,
                    shape,
                }
            })
            .collect();

        let index_of = |id: &str| nodes.iter().position(|n| n.id == id);

        let mut kept = Vec::new();
        for edge in database.edges() {
            match (index_of(&edge.from), index_of(&edge.to)) {
                (Some(from), Some(to)) => kept.push((from, to, edge)),
                _ => debug!(from = %edge.from, to = %edge.to, "Dropping edge without geometry"),
            }
        }

        let pairs: Vec<(usize, usize)> = kept.iter().map(|&(from, to, _)| (from, to)).collect();
        let order = graph::topological_order(nodes.len(), &pairs, |i| nodes[i].bounds.center.y);
        let mut rank = vec![0usize; nodes.len()];
        for (position, &node) in order.iter().enumerate() {
            rank[node] = position;
        }

        // Stable: parallel edges keep their text order
        kept.sort_by_key(|&(from, to, _)| (rank[from], rank[to]));

        let edges: Vec<FlowchartEdge> = kept
            .iter()
            .map(|&(from, to, edge)| {
                let points = self.route(&nodes[from].bounds, &nodes[to].bounds);
                trace!(from = %edge.from, to = %edge.to, points = points.len(), "Routed edge");
                FlowchartEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    label: edge.label.clone(),
                    style: edge.style,
                    points,
                }
            })
            .collect();

        let nodes: Vec<FlowchartNode> = order.into_iter().map(|i| nodes[i].clone()).collect();

        debug!(
            node_count = nodes.len(),
            edge_count = edges.len(),
            "Flowchart layout complete"
        );

        Ok(FlowchartLayout {
            direction: database.direction(),
            nodes,
            edges,
            width: geometry.width,
            height: geometry.height,
        })
    }

    fn name(&self) -> &'static str {
        "geometry"
    }
}
