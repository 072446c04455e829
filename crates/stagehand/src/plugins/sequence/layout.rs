//! Sequence diagram layout algorithm
//!
//! Actors get fixed vertical lanes in declaration order; accepted messages
//! are stacked top to bottom at a fixed step.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, span, trace, Level};
use unicode_width::UnicodeWidthStr;

use super::database::{ArrowHead, SequenceDatabase};
use crate::core::{LayoutAlgorithm, LineStyle};

/// Positioned actor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceActor {
    pub id: String,
    pub name: String,
    /// Lane center
    pub x: f64,
    /// Width of the actor header box
    pub box_width: f64,
}

/// Positioned message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceMessage {
    /// Index into the actor list
    pub from: usize,
    /// Index into the actor list
    pub to: usize,
    pub text: String,
    pub y: f64,
    pub line: LineStyle,
    pub head: ArrowHead,
}

/// Laid out sequence diagram
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SequenceLayout {
    pub actors: Vec<SequenceActor>,
    pub messages: Vec<SequenceMessage>,
    pub width: f64,
    pub height: f64,
}

/// Sequence diagram layout algorithm
#[derive(Debug, Clone)]
pub struct SequenceLayoutAlgorithm {
    /// x of the first lane
    lane_offset: f64,
    /// Distance between lanes
    lane_width: f64,
    /// y of the first message
    first_message_y: f64,
    /// Vertical distance between messages
    message_step: f64,
    /// Space below the last message
    bottom_margin: f64,
    /// Approximate advance of one label column
    char_width: f64,
    /// Horizontal padding inside actor boxes
    box_padding: f64,
}

impl SequenceLayoutAlgorithm {
    pub fn new() -> Self {
        Self {
            lane_offset: 100.0,
            lane_width: 200.0,
            first_message_y: 120.0,
            message_step: 60.0,
            bottom_margin: 60.0,
            char_width: 8.0,
            box_padding: 16.0,
        }
    }

    pub fn with_lane_width(mut self, lane_width: f64) -> Self {
        self.lane_width = lane_width;
        self
    }

    pub fn with_message_step(mut self, message_step: f64) -> Self {
        self.message_step = message_step;
        self
    }

    fn box_width(&self, name: &str) -> f64 {
        UnicodeWidthStr::width(name) as f64 * self.char_width + self.box_padding * 2.0
    }
}

impl Default for SequenceLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<SequenceDatabase> for SequenceLayoutAlgorithm {
    type Output = SequenceLayout;

    fn layout(&self, database: &SequenceDatabase) -> Result<SequenceLayout> {
        let span = span!(
            Level::INFO,
            "layout_sequence",
            actor_count = database.actor_count(),
            message_count = database.message_count()
        );
        let _enter = span.enter();

        let actors: Vec<SequenceActor> = database
            .actors()
            .iter()
            .enumerate()
            .map(|(i, actor)| SequenceActor {
                id: actor.id.clone(),
                name: actor.name.clone(),
                x: self.lane_offset + i as f64 * self.lane_width,
                box_width: self.box_width(&actor.name),
            })
            .collect();

        let mut messages = Vec::with_capacity(database.message_count());
        for message in database.messages() {
            let (Some(from), Some(to)) = (
                database.actor_index(&message.from),
                database.actor_index(&message.to),
            ) else {
                trace!(from = %message.from, to = %message.to, "Dropping message with undeclared actor");
                continue;
            };
            messages.push(SequenceMessage {
                from,
                to,
                text: message.text.clone(),
                y: self.first_message_y + messages.len() as f64 * self.message_step,
                line: message.line,
                head: message.head,
            });
        }

        let last_y = messages
            .last()
            .map(|m| m.y)
            .unwrap_or(self.first_message_y);
        let height = last_y + self.bottom_margin;
        let width =
            2.0 * self.lane_offset + actors.len().saturating_sub(1) as f64 * self.lane_width;

        debug!(
            accepted = messages.len(),
            dropped = database.message_count() - messages.len(),
            width,
            height,
            "Sequence layout complete"
        );

        Ok(SequenceLayout {
            actors,
            messages,
            width,
            height,
        })
    }

    fn name(&self) -> &'static str {
        "lanes"
    }
}
