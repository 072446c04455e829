//! State diagram database
//!
//! Stores states and transitions in first-appearance order. The `[*]`
//! pseudo-state is split into two reserved ids: one for the start marker
//! (used as a source) and one for the end marker (used as a target).

use crate::core::Database;
use anyhow::Result;

/// Reserved id of the synthetic start marker
pub const START_MARKER: &str = "[*]start";

/// Reserved id of the synthetic end marker
pub const END_MARKER: &str = "[*]end";

/// Role of a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Normal,
    Start,
    End,
}

/// A stored state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateData {
    pub id: String,
    pub label: String,
    pub kind: StateKind,
}

impl StateData {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: StateKind::Normal,
        }
    }

    /// A state with its label defaulting to the id; reserved ids become markers
    fn implicit(id: &str) -> Self {
        match id {
            START_MARKER => Self {
                id: id.to_string(),
                label: String::new(),
                kind: StateKind::Start,
            },
            END_MARKER => Self {
                id: id.to_string(),
                label: String::new(),
                kind: StateKind::End,
            },
            _ => Self::new(id, id),
        }
    }
}

/// A stored transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionData {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
}

impl TransitionData {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// State diagram database
#[derive(Debug, Default)]
pub struct StateDatabase {
    states: Vec<StateData>,
    transitions: Vec<TransitionData>,
}

impl StateDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state. An existing state keeps its position but takes the new label.
    pub fn add_state(&mut self, state: StateData) -> Result<()> {
        match self.states.iter_mut().find(|s| s.id == state.id) {
            Some(existing) if existing.kind == StateKind::Normal => existing.label = state.label,
            Some(_) => {}
            None => self.states.push(state),
        }
        Ok(())
    }

    /// Ensure a state exists (creates an implicit state if needed)
    pub fn ensure_state(&mut self, id: &str) -> Result<()> {
        if !self.states.iter().any(|s| s.id == id) {
            self.states.push(StateData::implicit(id));
        }
        Ok(())
    }

    /// Add a transition, creating its endpoints as needed
    pub fn add_transition(&mut self, transition: TransitionData) -> Result<()> {
        self.ensure_state(&transition.from)?;
        self.ensure_state(&transition.to)?;
        self.transitions.push(transition);
        Ok(())
    }

    pub fn states(&self) -> &[StateData] {
        &self.states
    }

    pub fn transitions(&self) -> &[TransitionData] {
        &self.transitions
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Get state index (for layout)
    pub fn state_index(&self, id: &str) -> Option<usize> {
        self.states.iter().position(|s| s.id == id)
    }

    pub fn clear_all(&mut self) {
        self.states.clear();
        self.transitions.clear();
    }
}

impl Database for StateDatabase {
    type Node = StateData;
    type Edge = TransitionData;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_state(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_transition(edge)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.states.iter().find(|s| s.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.states.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.transitions.iter()
    }

    fn clear(&mut self) {
        self.clear_all()
    }

    fn node_count(&self) -> usize {
        self.state_count()
    }

    fn edge_count(&self) -> usize {
        self.transition_count()
    }
}
