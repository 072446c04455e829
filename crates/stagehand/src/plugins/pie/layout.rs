//! Pie chart layout algorithm
//!
//! Slices run clockwise (y grows downward) from twelve o'clock. Each slice
//! starts where the previous one ended, and the final slice is pinned to
//! close the circle exactly.

use super::database::PieDatabase;
use crate::core::{LayoutAlgorithm, Point};
use anyhow::Result;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};
use tracing::{debug, span, Level};

/// Cyclic slice palette, indexed by declaration order
pub const PIE_PALETTE: [&str; 12] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948",
    "#b07aa1", "#ff9da7", "#9c755f", "#bab0ac", "#86bcb6", "#d37295",
];

/// Angle every pie starts at (twelve o'clock)
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// One positioned slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSegment {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
    /// Radians
    pub start_angle: f64,
    /// Radians
    pub end_angle: f64,
}

/// Laid out pie chart
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PieLayout {
    pub title: Option<String>,
    pub segments: Vec<PieSegment>,
    pub total: f64,
    pub center: Point,
    pub radius: f64,
}

/// Pie chart layout algorithm
#[derive(Debug, Clone)]
pub struct PieLayoutAlgorithm {
    center: Point,
    radius: f64,
}

impl PieLayoutAlgorithm {
    pub fn new() -> Self {
        Self {
            center: Point::new(300.0, 300.0),
            radius: 200.0,
        }
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

impl Default for PieLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<PieDatabase> for PieLayoutAlgorithm {
    type Output = PieLayout;

    fn layout(&self, database: &PieDatabase) -> Result<PieLayout> {
        let span = span!(Level::INFO, "layout_pie", entry_count = database.entry_count());
        let _enter = span.enter();

        let total = database.total();
        let mut segments = Vec::with_capacity(database.entry_count());

        if total > 0.0 {
            let last = database.entry_count() - 1;
            let mut start = START_ANGLE;
            for (i, entry) in database.entries().iter().enumerate() {
                let end = if i == last {
                    START_ANGLE + TAU
                } else {
                    start + entry.value / total * TAU
                };
                segments.push(PieSegment {
                    label: entry.label.clone(),
                    value: entry.value,
                    color: PIE_PALETTE[i % PIE_PALETTE.len()],
                    start_angle: start,
                    end_angle: end,
                });
                start = end;
            }
        }

        debug!(segment_count = segments.len(), total, "Pie layout complete");

        Ok(PieLayout {
            title: database.title().map(str::to_string),
            segments,
            total,
            center: self.center,
            radius: self.radius,
        })
    }

    fn name(&self) -> &'static str {
        "radial-slices"
    }
}
