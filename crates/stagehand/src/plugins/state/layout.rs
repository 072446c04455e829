//! State diagram layout algorithm
//!
//! States are leveled left to right by breadth-first distance from the
//! roots, then spread vertically around a center line within each level.

use super::database::{StateDatabase, StateKind};
use crate::core::{graph, LayoutAlgorithm, Point};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, span, trace, Level};

/// How a state is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateGlyph {
    /// Regular labeled state
    Box,
    /// Start marker
    FilledDot,
    /// End marker
    DoubleRing,
}

/// Positioned state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateNode {
    pub id: String,
    /// Empty for the start and end markers
    pub label: String,
    pub position: Point,
    pub level: usize,
    pub is_start: bool,
    pub is_end: bool,
    pub glyph: StateGlyph,
}

/// Transition between two placed states
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateTransition {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
}

/// Layout result containing positioned elements
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StateLayout {
    pub states: Vec<StateNode>,
    pub transitions: Vec<StateTransition>,
    pub width: f64,
    pub height: f64,
}

/// State diagram layout algorithm
#[derive(Debug, Clone)]
pub struct StateLayoutAlgorithm {
    /// x of level 0
    margin: f64,
    /// Horizontal distance between levels
    level_spacing: f64,
    /// y of the center line
    center_y: f64,
    /// Vertical distance between states of one level
    row_spacing: f64,
    /// Level given to states no root reaches
    fallback_level: usize,
}

impl StateLayoutAlgorithm {
    pub fn new() -> Self {
        Self {
            margin: 80.0,
            level_spacing: 180.0,
            center_y: 300.0,
            row_spacing: 100.0,
            fallback_level: 1,
        }
    }

    pub fn with_level_spacing(mut self, level_spacing: f64) -> Self {
        self.level_spacing = level_spacing;
        self
    }

    pub fn with_row_spacing(mut self, row_spacing: f64) -> Self {
        self.row_spacing = row_spacing;
        self
    }

    /// Assign levels by BFS from every in-degree-zero state and the start marker
    fn assign_levels(&self, db: &StateDatabase) -> Vec<usize> {
        let count = db.state_count();
        let edges: Vec<(usize, usize)> = db
            .transitions()
            .iter()
            .filter_map(|t| Some((db.state_index(&t.from)?, db.state_index(&t.to)?)))
            .collect();

        let mut in_degree = vec![0usize; count];
        for &(_, to) in &edges {
            in_degree[to] += 1;
        }

        let roots: Vec<usize> = db
            .states()
            .iter()
            .enumerate()
            .filter(|(i, s)| in_degree[*i] == 0 || s.kind == StateKind::Start)
            .map(|(i, _)| i)
            .collect();

        graph::bfs_levels(count, &edges, &roots)
            .into_iter()
            .map(|level| level.unwrap_or(self.fallback_level))
            .collect()
    }
}

impl Default for StateLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<StateDatabase> for StateLayoutAlgorithm {
    type Output = StateLayout;

    fn layout(&self, db: &StateDatabase) -> Result<StateLayout> {
        let span = span!(Level::INFO, "layout_state", state_count = db.state_count());
        let _enter = span.enter();

        let levels = self.assign_levels(db);

        let mut per_level: HashMap<usize, usize> = HashMap::new();
        for &level in &levels {
            *per_level.entry(level).or_default() += 1;
        }

        let mut seen: HashMap<usize, usize> = HashMap::new();
        let states: Vec<StateNode> = db
            .states()
            .iter()
            .zip(&levels)
            .map(|(state, &level)| {
                let index = seen.entry(level).or_default();
                let count = per_level.get(&level).copied().unwrap_or(1);
                let offset = *index as f64 - (count as f64 - 1.0) / 2.0;
                *index += 1;

                let position = Point::new(
                    self.margin + level as f64 * self.level_spacing,
                    self.center_y + offset * self.row_spacing,
                );
                trace!(id = %state.id, level, x = position.x, y = position.y, "Placed state");

                StateNode {
                    id: state.id.clone(),
                    label: state.label.clone(),
                    position,
                    level,
                    is_start: state.kind == StateKind::Start,
                    is_end: state.kind == StateKind::End,
                    glyph: match state.kind {
                        StateKind::Normal => StateGlyph::Box,
                        StateKind::Start => StateGlyph::FilledDot,
                        StateKind::End => StateGlyph::DoubleRing,
                    },
                }
            })
            .collect();

        let transitions: Vec<StateTransition> = db
            .transitions()
            .iter()
            .map(|t| StateTransition {
                from: t.from.clone(),
                to: t.to.clone(),
                label: t.label.clone(),
            })
            .collect();

        let max_level = levels.iter().copied().max().unwrap_or(0);
        let max_y = states.iter().map(|s| s.position.y).fold(0.0_f64, f64::max);
        let width = 2.0 * self.margin + max_level as f64 * self.level_spacing;
        let height = (2.0 * self.center_y).max(max_y + self.row_spacing);

        debug!(
            state_count = states.len(),
            transition_count = transitions.len(),
            max_level,
            "State layout complete"
        );

        Ok(StateLayout {
            states,
            transitions,
            width,
            height,
        })
    }

    fn name(&self) -> &'static str {
        "bfs-levels"
    }
}
