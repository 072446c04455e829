//! Animation sequencer
//!
//! Assigns every element of a laid out diagram a slot in one global reveal
//! order and answers per-frame queries: how opaque each element is and how
//! many have started to appear.
//!
//! Slot `k` starts fading in at frame `k * frames_per_element` and is fully
//! opaque half a step later.
//!
//! ```
//! use stagehand::sequencer::{AnimationConfig, Sequencer};
//!
//! let parsed = stagehand::parse("pie title Pets\n\"Dogs\" : 3\n\"Cats\" : 1", None);
//! let sequencer = Sequencer::new(&parsed, AnimationConfig::default());
//!
//! // Title, then one slot per slice
//! assert_eq!(sequencer.entries().len(), 3);
//! assert_eq!(sequencer.progress(30).visible, 2);
//! ```

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, span, Level};

use crate::plugins::mindmap::MindmapLayout;
use crate::plugins::orchestrator::ParsedDiagram;

/// A reference into the layout an entry reveals
///
/// Indices point into the corresponding vector of the layout the sequencer
/// was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum ElementRef {
    Node(usize),
    Edge(usize),
    Actor(usize),
    Message(usize),
    PieTitle,
    Segment(usize),
    State(usize),
    Transition(usize),
    MindmapNode(usize),
    Connection(usize),
}

/// One element's place in the reveal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceEntry {
    pub element: ElementRef,
    /// Unique, gapless position in the order
    pub slot: usize,
    /// Slot whose start frame drives this element's opacity
    pub reveal_slot: usize,
}

impl SequenceEntry {
    fn at(element: ElementRef, slot: usize) -> Self {
        Self {
            element,
            slot,
            reveal_slot: slot,
        }
    }
}

/// Timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnimationConfig {
    /// Frames between the reveal of consecutive slots
    pub frames_per_element: u32,
}

impl AnimationConfig {
    pub fn new(frames_per_element: u32) -> Self {
        Self { frames_per_element }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames_per_element: 30,
        }
    }
}

/// How many elements have started to appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub visible: usize,
    pub total: usize,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameState {
    pub frame: u64,
    /// Opacity per entry, in entry order
    pub opacities: Vec<f64>,
    pub progress: Progress,
}

/// Reveal schedule for one diagram
#[derive(Debug, Clone)]
pub struct Sequencer {
    entries: Vec<SequenceEntry>,
    config: AnimationConfig,
}

impl Sequencer {
    pub fn new(diagram: &ParsedDiagram, config: AnimationConfig) -> Self {
        let span = span!(Level::DEBUG, "sequence_diagram", dialect = %diagram.dialect());
        let _enter = span.enter();

        let entries = match diagram {
            ParsedDiagram::Flowchart(layout) => {
                interleave(layout.nodes.len(), layout.edges.len())
            }
            ParsedDiagram::Sequence(layout) => concat(
                (0..layout.actors.len()).map(ElementRef::Actor),
                (0..layout.messages.len()).map(ElementRef::Message),
            ),
            ParsedDiagram::Pie(layout) => concat(
                std::iter::once(ElementRef::PieTitle),
                (0..layout.segments.len()).map(ElementRef::Segment),
            ),
            ParsedDiagram::State(layout) => concat(
                (0..layout.states.len()).map(ElementRef::State),
                (0..layout.transitions.len()).map(ElementRef::Transition),
            ),
            ParsedDiagram::Mindmap(layout) => mindmap_entries(layout),
            ParsedDiagram::Unsupported => Vec::new(),
        };

        debug!(entry_count = entries.len(), "Reveal order assigned");
        Self { entries, config }
    }

    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }

    pub fn config(&self) -> AnimationConfig {
        self.config
    }

    /// First frame at which `entry` is visible
    pub fn start_frame(&self, entry: &SequenceEntry) -> u64 {
        entry.reveal_slot as u64 * u64::from(self.config.frames_per_element)
    }

    /// Opacity of `entry` at `frame`, in `0.0..=1.0`
    pub fn opacity(&self, entry: &SequenceEntry, frame: u64) -> f64 {
        let start = self.start_frame(entry);
        if frame < start {
            return 0.0;
        }
        if self.config.frames_per_element == 0 {
            return 1.0;
        }
        let fade = f64::from(self.config.frames_per_element) / 2.0;
        ((frame - start) as f64 / fade).clamp(0.0, 1.0)
    }

    pub fn progress(&self, frame: u64) -> Progress {
        Progress {
            visible: self
                .entries
                .iter()
                .filter(|e| frame >= self.start_frame(e))
                .count(),
            total: self.entries.len(),
        }
    }

    pub fn frame(&self, frame: u64) -> FrameState {
        FrameState {
            frame,
            opacities: self.entries.iter().map(|e| self.opacity(e, frame)).collect(),
            progress: self.progress(frame),
        }
    }

    /// Frames until the last element has started, plus one step
    pub fn total_frames(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| self.start_frame(e) + u64::from(self.config.frames_per_element))
            .max()
            .unwrap_or(0)
    }
}

fn concat(
    first: impl Iterator<Item = ElementRef>,
    second: impl Iterator<Item = ElementRef>,
) -> Vec<SequenceEntry> {
    first
        .chain(second)
        .enumerate()
        .map(|(slot, element)| SequenceEntry::at(element, slot))
        .collect()
}

/// node 0, edge 0, node 1, edge 1, ... until both lists run out
fn interleave(node_count: usize, edge_count: usize) -> Vec<SequenceEntry> {
    (0..node_count.max(edge_count))
        .flat_map(|i| {
            let node = (i < node_count).then_some(ElementRef::Node(i));
            let edge = (i < edge_count).then_some(ElementRef::Edge(i));
            node.into_iter().chain(edge)
        })
        .enumerate()
        .map(|(slot, element)| SequenceEntry::at(element, slot))
        .collect()
}

/// Nodes then connections; a connection is revealed with the later of its endpoints
fn mindmap_entries(layout: &MindmapLayout) -> Vec<SequenceEntry> {
    let node_slot: HashMap<usize, usize> = layout
        .nodes
        .iter()
        .enumerate()
        .map(|(slot, node)| (node.id, slot))
        .collect();

    let mut entries = concat(
        (0..layout.nodes.len()).map(ElementRef::MindmapNode),
        std::iter::empty(),
    );
    for (index, connection) in layout.connections.iter().enumerate() {
        let slot = entries.len();
        let reveal_slot = match (node_slot.get(&connection.from), node_slot.get(&connection.to)) {
            (Some(&a), Some(&b)) => a.max(b),
            _ => slot,
        };
        entries.push(SequenceEntry {
            element: ElementRef::Connection(index),
            slot,
            reveal_slot,
        });
    }
    entries
}
