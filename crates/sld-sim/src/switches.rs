//! Switch state store.
//!
//! The only mutable state of a simulation. Propagation reads it and never
//! writes it.

use std::collections::BTreeMap;

use sld_core::{SegmentId, SwitchState};
use sld_graph::Graph;
use tracing::{debug, warn};

/// Position and presentation group of one switch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwitchEntry {
    pub state: SwitchState,
    pub group: Option<String>,
}

/// Mapping switch id -> position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwitchTable {
    entries: BTreeMap<SegmentId, SwitchEntry>,
}

impl SwitchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every switch of `graph`, closed.
    pub fn for_graph(graph: &Graph) -> Self {
        let entries = graph
            .switches()
            .map(|s| (s.id, SwitchEntry::default()))
            .collect();
        Self { entries }
    }

    /// Register a switch (or overwrite its position).
    pub fn insert(&mut self, id: SegmentId, state: SwitchState) {
        self.entries.entry(id).or_default().state = state;
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: SegmentId) -> Option<SwitchState> {
        self.entries.get(&id).map(|e| e.state)
    }

    pub fn entry(&self, id: SegmentId) -> Option<&SwitchEntry> {
        self.entries.get(&id)
    }

    /// Position used by propagation. Switches the table never heard of count as closed.
    pub fn effective(&self, id: SegmentId) -> SwitchState {
        self.get(id).unwrap_or(SwitchState::Closed)
    }

    /// Set the position of a known switch. Returns false for unknown ids.
    pub fn set(&mut self, id: SegmentId, state: SwitchState) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.state = state;
                true
            }
            None => {
                warn!(switch = %id, "set: unknown switch ignored");
                false
            }
        }
    }

    /// Attach a presentation group to a known switch.
    pub fn set_group(&mut self, id: SegmentId, group: Option<String>) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.group = group;
                true
            }
            None => false,
        }
    }

    /// Flip `closed` <-> `open`.
    ///
    /// Returns true when the position changed and propagation must re-run.
    /// Unknown ids and faulted switches are left alone.
    pub fn toggle(&mut self, id: SegmentId) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            warn!(switch = %id, "toggle: unknown switch ignored");
            return false;
        };
        let next = entry.state.toggled();
        if next == entry.state {
            debug!(switch = %id, state = %entry.state, "toggle: position unchanged");
            return false;
        }
        entry.state = next;
        true
    }

    /// Reset every switch to closed, then apply `overrides`.
    ///
    /// Overrides naming switches outside the table are skipped. Returns how
    /// many overrides were applied.
    pub fn apply_scenario<I>(&mut self, overrides: I) -> usize
    where
        I: IntoIterator<Item = (SegmentId, SwitchState)>,
    {
        for entry in self.entries.values_mut() {
            entry.state = SwitchState::Closed;
        }
        let mut applied = 0;
        for (id, state) in overrides {
            match self.entries.get_mut(&id) {
                Some(entry) => {
                    entry.state = state;
                    applied += 1;
                }
                None => warn!(switch = %id, "scenario names unknown switch; skipped"),
            }
        }
        applied
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &SwitchEntry)> {
        self.entries.iter().map(|(&id, e)| (id, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
