//! Pie chart database
//!
//! An optional title plus labeled values in declaration order.

use anyhow::Result;

/// One declared slice
#[derive(Debug, Clone, PartialEq)]
pub struct PieEntry {
    pub label: String,
    pub value: f64,
}

impl PieEntry {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Pie chart database
#[derive(Debug, Default)]
pub struct PieDatabase {
    title: Option<String>,
    entries: Vec<PieEntry>,
}

impl PieDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title; a later title replaces an earlier one
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Add an entry. Negative or non-finite values are rejected.
    pub fn add_entry(&mut self, entry: PieEntry) -> Result<()> {
        if !entry.value.is_finite() || entry.value < 0.0 {
            anyhow::bail!("Invalid value {} for slice '{}'", entry.value, entry.label);
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[PieEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    pub fn clear(&mut self) {
        self.title = None;
        self.entries.clear();
    }
}
