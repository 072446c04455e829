//! Mindmap layout algorithm
//!
//! The root sits at the center. First-level branches are spread evenly
//! around it; deeper nodes fan out around their parent's branch angle on
//! rings of growing radius, all measured from the root.

use super::database::MindmapDatabase;
use crate::core::{LayoutAlgorithm, Point};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::f64::consts::TAU;
use tracing::{debug, span, Level};

/// Positioned mindmap node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MindmapNode {
    /// Arena index
    pub id: usize,
    pub label: String,
    pub depth: usize,
    pub position: Point,
    pub parent: Option<usize>,
    pub is_root: bool,
    /// Direction of the branch this node sits on, in radians
    pub angle: f64,
}

/// Parent to child link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MindmapConnection {
    pub from: usize,
    pub to: usize,
}

/// Laid out mindmap
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MindmapLayout {
    pub nodes: Vec<MindmapNode>,
    pub connections: Vec<MindmapConnection>,
    pub width: f64,
    pub height: f64,
}

/// Mindmap layout algorithm
#[derive(Debug, Clone)]
pub struct MindmapLayoutAlgorithm {
    center: Point,
    /// Ring radius of first-level branches
    branch_radius: f64,
    /// Extra radius per level below the first
    depth_step: f64,
    /// Angle between neighboring siblings below the first level
    child_spread: f64,
}

impl MindmapLayoutAlgorithm {
    pub fn new() -> Self {
        Self {
            center: Point::new(400.0, 300.0),
            branch_radius: 200.0,
            depth_step: 140.0,
            child_spread: 0.5,
        }
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn with_branch_radius(mut self, branch_radius: f64) -> Self {
        self.branch_radius = branch_radius;
        self
    }
}

impl Default for MindmapLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<MindmapDatabase> for MindmapLayoutAlgorithm {
    type Output = MindmapLayout;

    fn layout(&self, db: &MindmapDatabase) -> Result<MindmapLayout> {
        let span = span!(Level::INFO, "layout_mindmap", node_count = db.node_count());
        let _enter = span.enter();

        let mut child_count: HashMap<usize, usize> = HashMap::new();
        for parent in db.nodes().iter().filter_map(|n| n.parent) {
            *child_count.entry(parent).or_default() += 1;
        }

        // Parents precede children in the arena, so one pass sees every
        // parent's angle before its children need it.
        let (nodes, _) = db.nodes().iter().enumerate().fold(
            (
                Vec::<MindmapNode>::with_capacity(db.node_count()),
                HashMap::<usize, usize>::new(),
            ),
            |(mut placed, mut next_index), (id, entry)| {
                let (position, angle) = match entry.parent {
                    None => (self.center, 0.0),
                    Some(parent) => {
                        let slot = next_index.entry(parent).or_insert(0);
                        let k = *slot as f64;
                        *slot += 1;
                        let siblings = child_count.get(&parent).copied().unwrap_or(1) as f64;

                        let angle = if entry.depth <= 1 {
                            TAU * k / siblings
                        } else {
                            let parent_angle = placed
                                .get(parent)
                                .map(|p: &MindmapNode| p.angle)
                                .unwrap_or(0.0);
                            parent_angle + (k - (siblings - 1.0) / 2.0) * self.child_spread
                        };
                        let radius =
                            self.branch_radius + (entry.depth as f64 - 1.0) * self.depth_step;
                        (self.center.polar_offset(angle, radius), angle)
                    }
                };

                placed.push(MindmapNode {
                    id,
                    label: entry.label.clone(),
                    depth: entry.depth,
                    position,
                    parent: entry.parent,
                    is_root: entry.parent.is_none(),
                    angle,
                });
                (placed, next_index)
            },
        );

        let connections: Vec<MindmapConnection> = nodes
            .iter()
            .filter_map(|n| n.parent.map(|from| MindmapConnection { from, to: n.id }))
            .collect();

        debug!(
            node_count = nodes.len(),
            connection_count = connections.len(),
            "Mindmap layout complete"
        );

        Ok(MindmapLayout {
            nodes,
            connections,
            width: self.center.x * 2.0,
            height: self.center.y * 2.0,
        })
    }

    fn name(&self) -> &'static str {
        "radial"
    }
}
