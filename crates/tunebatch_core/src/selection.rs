use std::collections::BTreeMap;

use serde::Serialize;

use crate::playlist::{format_duration, PlaylistEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SelectionSummary {
    pub total: usize,
    pub included_count: usize,
    /// Sum over included entries with a known duration.
    pub total_duration_seconds: u64,
}

impl SelectionSummary {
    pub fn total_duration_label(&self) -> Option<String> {
        (self.total_duration_seconds > 0).then(|| format_duration(self.total_duration_seconds))
    }
}

/// The most recently fetched playlist plus its per-entry inclusion flags.
///
/// The `included` map is authoritative; each entry's own `included` field is
/// kept in step with it on every change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    entries: Vec<PlaylistEntry>,
    included: BTreeMap<usize, bool>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the previous playlist and its inclusion state; every new
    /// entry starts included.
    pub fn replace(&mut self, entries: Vec<PlaylistEntry>) {
        self.entries = entries;
        self.included.clear();
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.position = position;
            entry.included = true;
            self.included.insert(position, true);
        }
    }

    /// Flips one entry. Returns the new flag, or `None` if `position` is not
    /// part of the loaded playlist.
    pub fn toggle(&mut self, position: usize) -> Option<bool> {
        let current = *self.included.get(&position)?;
        self.set(position, !current);
        Some(!current)
    }

    pub fn include_all(&mut self) {
        self.set_all(true);
    }

    pub fn exclude_all(&mut self) {
        self.set_all(false);
    }

    /// Flips every entry independently.
    pub fn invert(&mut self) {
        for position in 0..self.entries.len() {
            self.toggle(position);
        }
    }

    fn set_all(&mut self, included: bool) {
        for position in 0..self.entries.len() {
            self.set(position, included);
        }
    }

    fn set(&mut self, position: usize, included: bool) {
        if let Some(entry) = self.entries.get_mut(position) {
            entry.included = included;
            self.included.insert(position, included);
        }
    }

    pub fn is_included(&self, position: usize) -> Option<bool> {
        self.included.get(&position).copied()
    }

    pub fn counted(&self) -> SelectionSummary {
        let mut summary = SelectionSummary {
            total: self.entries.len(),
            ..SelectionSummary::default()
        };
        for entry in self.included_entries() {
            summary.included_count += 1;
            summary.total_duration_seconds = summary
                .total_duration_seconds
                .saturating_add(entry.duration_seconds.unwrap_or(0));
        }
        summary
    }

    pub fn included_entries(&self) -> impl Iterator<Item = &PlaylistEntry> {
        self.entries
            .iter()
            .filter(|entry| self.is_included(entry.position).unwrap_or(false))
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn snapshot(&self) -> Vec<PlaylistEntry> {
        self.entries.clone()
    }

    pub fn is_loaded(&self) -> bool {
        !self.entries.is_empty()
    }
}
