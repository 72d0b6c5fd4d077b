//! Query helpers over topologies and propagation results.

use std::collections::BTreeMap;

use serde::Serialize;
use sld_sim::{Energization, EnergyState};
use sld_topology::TopologyDoc;

/// Summary of a station for listing.
#[derive(Debug, Clone, Serialize)]
pub struct StationSummary {
    pub name: String,
    pub node_count: usize,
    pub switch_count: usize,
}

/// List all stations in a topology.
pub fn list_stations(topology: &TopologyDoc) -> Vec<StationSummary> {
    topology
        .stations
        .iter()
        .map(|(name, station)| StationSummary {
            name: name.clone(),
            node_count: station.nodes.len(),
            switch_count: station.switches.len(),
        })
        .collect()
}

/// Counts over one propagation result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnergizationSummary {
    pub segments: usize,
    pub energized: usize,
    pub unenergized: usize,
    pub open: usize,
    /// Energized segments per phase tag.
    pub by_phase: BTreeMap<String, usize>,
}

pub fn summarize(energization: &Energization) -> EnergizationSummary {
    let mut summary = EnergizationSummary {
        segments: energization.len(),
        ..Default::default()
    };
    for (_, energy) in energization.iter() {
        match energy.state {
            EnergyState::Energized => {
                summary.energized += 1;
                if let Some(phase) = &energy.provenance.phase {
                    *summary.by_phase.entry(phase.clone()).or_default() += 1;
                }
            }
            EnergyState::Unenergized => summary.unenergized += 1,
            EnergyState::Open => summary.open += 1,
        }
    }
    summary
}
