//! Propagation output.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sld_core::{Provenance, SegmentId};
use sld_graph::Graph;

use crate::feed::Feed;
use crate::switches::SwitchTable;

/// Energization state of one segment after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyState {
    #[default]
    Unenergized,
    Energized,
    /// Non-conducting switch (open or faulted).
    Open,
}

impl EnergyState {
    pub fn as_str(self) -> &'static str {
        match self {
            EnergyState::Unenergized => "unenergized",
            EnergyState::Energized => "energized",
            EnergyState::Open => "open",
        }
    }
}

impl fmt::Display for EnergyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentEnergy {
    pub state: EnergyState,
    pub provenance: Provenance,
}

impl SegmentEnergy {
    pub(crate) fn energized(provenance: Provenance) -> Self {
        Self {
            state: EnergyState::Energized,
            provenance,
        }
    }

    pub(crate) fn open() -> Self {
        Self {
            state: EnergyState::Open,
            provenance: Provenance::default(),
        }
    }
}

/// Result of one propagation run, indexed by segment id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Energization {
    pub(crate) segments: Vec<SegmentEnergy>,
}

impl Energization {
    pub fn get(&self, id: SegmentId) -> Option<&SegmentEnergy> {
        self.segments.get(id.slot())
    }

    /// State of a segment; unknown ids read as unenergized.
    pub fn state(&self, id: SegmentId) -> EnergyState {
        self.get(id).map(|e| e.state).unwrap_or_default()
    }

    pub fn is_energized(&self, id: SegmentId) -> bool {
        self.state(id) == EnergyState::Energized
    }

    pub fn phase(&self, id: SegmentId) -> Option<&str> {
        self.get(id).and_then(|e| e.provenance.phase.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &SegmentEnergy)> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, e)| (SegmentId::from_slot(i), e))
    }

    pub fn count(&self, state: EnergyState) -> usize {
        self.segments.iter().filter(|e| e.state == state).count()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Keyed by topology id, ready for serialization.
    ///
    /// Groups: a switch reports its switch-table group, a feed segment its feed
    /// group; otherwise the segment's own id.
    pub fn report(&self, graph: &Graph, switches: &SwitchTable, feeds: &[Feed]) -> EnergizationReport {
        let mut report = BTreeMap::new();
        for (id, energy) in self.iter() {
            let Some(name) = graph.name(id) else {
                continue;
            };
            let group = switches
                .entry(id)
                .and_then(|e| e.group.clone())
                .or_else(|| {
                    feeds
                        .iter()
                        .find(|f| f.segment == id)
                        .and_then(|f| f.group.clone())
                })
                .unwrap_or_else(|| name.to_string());
            report.insert(
                name.to_string(),
                SegmentReport {
                    state: energy.state,
                    phase: energy.provenance.phase.clone(),
                    side: energy.provenance.side.clone(),
                    group,
                },
            );
        }
        EnergizationReport(report)
    }
}

/// One entry of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentReport {
    pub state: EnergyState,
    pub phase: Option<String>,
    pub side: Option<String>,
    pub group: String,
}

/// Segment id -> energization, the sole data a renderer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergizationReport(pub BTreeMap<String, SegmentReport>);

impl EnergizationReport {
    pub fn get(&self, id: &str) -> Option<&SegmentReport> {
        self.0.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SegmentReport)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serialized_name() {
        for state in [EnergyState::Unenergized, EnergyState::Energized, EnergyState::Open] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
        }
    }

    #[test]
    fn state_serializes_lowercase() {
        let report = SegmentReport {
            state: EnergyState::Unenergized,
            phase: None,
            side: None,
            group: "w_far".into(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["state"], "unenergized");
        assert!(json["phase"].is_null());
        assert_eq!(json["group"], "w_far");
    }

    #[test]
    fn unknown_segment_reads_unenergized() {
        let e = Energization::default();
        assert_eq!(e.state(SegmentId::from_index(3)), EnergyState::Unenergized);
        assert!(e.phase(SegmentId::from_index(3)).is_none());
    }
}
