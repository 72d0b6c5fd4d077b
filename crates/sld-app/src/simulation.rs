//! The simulation context: one network, its switch positions and the latest
//! energization.
//!
//! Every mutation updates the switch table completely, then re-runs
//! propagation before returning, so readers always see a result that matches
//! the table.

use std::collections::BTreeMap;

use sld_core::{SegmentId, SwitchState};
use sld_graph::Graph;
use sld_sim::{Energization, EnergizationReport, Feed, SwitchTable, propagate};
use sld_topology::{ScenarioLibrary, SwitchStateEntry, SwitchStatesDoc, TopologyDoc};
use tracing::{debug, warn};

use crate::compile::{Network, compile_topology};
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct Simulation {
    network: Network,
    switches: SwitchTable,
    scenarios: ScenarioLibrary,
    energization: Energization,
}

impl Simulation {
    /// Start from the topology's declared switch positions.
    pub fn new(network: Network) -> Self {
        let switches = network.initial_switches.clone();
        let energization = propagate(&network.graph, &switches, &network.feeds);
        Self {
            network,
            switches,
            scenarios: ScenarioLibrary::default(),
            energization,
        }
    }

    pub fn from_topology(topology: &TopologyDoc) -> AppResult<Self> {
        Ok(Self::new(compile_topology(topology)?))
    }

    pub fn with_scenarios(mut self, scenarios: ScenarioLibrary) -> Self {
        self.scenarios = scenarios;
        self
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn graph(&self) -> &Graph {
        &self.network.graph
    }

    pub fn feeds(&self) -> &[Feed] {
        &self.network.feeds
    }

    pub fn colors(&self) -> &BTreeMap<String, String> {
        &self.network.colors
    }

    pub fn switches(&self) -> &SwitchTable {
        &self.switches
    }

    pub fn scenarios(&self) -> &ScenarioLibrary {
        &self.scenarios
    }

    pub fn set_scenarios(&mut self, scenarios: ScenarioLibrary) {
        self.scenarios = scenarios;
    }

    /// Result of the latest propagation.
    pub fn energization(&self) -> &Energization {
        &self.energization
    }

    /// The output contract, keyed by topology id.
    pub fn report(&self) -> EnergizationReport {
        self.energization
            .report(&self.network.graph, &self.switches, &self.network.feeds)
    }

    /// Current position of a switch by topology id.
    pub fn switch_state(&self, switch: &str) -> Option<SwitchState> {
        self.switch_id(switch).and_then(|id| self.switches.get(id))
    }

    fn switch_id(&self, name: &str) -> Option<SegmentId> {
        self.network
            .graph
            .lookup(name)
            .filter(|&id| self.switches.contains(id))
    }

    fn refresh(&mut self) {
        self.energization = propagate(&self.network.graph, &self.switches, &self.network.feeds);
    }

    /// Flip a switch and re-run propagation.
    ///
    /// Unknown ids and faulted switches are no-ops; returns whether anything changed.
    pub fn toggle(&mut self, switch: &str) -> bool {
        let Some(id) = self.switch_id(switch) else {
            warn!(switch, "toggle: unknown switch ignored");
            return false;
        };
        if !self.switches.toggle(id) {
            return false;
        }
        debug!(switch, state = ?self.switches.get(id), "switch toggled");
        self.refresh();
        true
    }

    /// Reset all switches to closed, apply the named scenario, re-run propagation.
    ///
    /// An unknown scenario id changes nothing and returns false.
    pub fn apply_scenario(&mut self, scenario_id: &str) -> bool {
        let Some(scenario) = self.scenarios.get(scenario_id) else {
            warn!(scenario = scenario_id, "unknown scenario ignored");
            return false;
        };

        let graph = &self.network.graph;
        let overrides: Vec<(SegmentId, SwitchState)> = scenario
            .iter()
            .filter_map(|(name, &state)| match graph.lookup(name) {
                Some(id) => Some((id, state)),
                None => {
                    warn!(scenario = scenario_id, switch = %name, "scenario names unknown switch; skipped");
                    None
                }
            })
            .collect();

        let applied = self.switches.apply_scenario(overrides);
        debug!(scenario = scenario_id, applied, "scenario applied");
        self.refresh();
        true
    }

    /// Seed positions and groups from a persisted document.
    ///
    /// Entries for switches the topology does not know are skipped. Returns
    /// how many entries were applied.
    pub fn seed_switch_states(&mut self, doc: &SwitchStatesDoc) -> usize {
        let mut applied = 0;
        for (name, entry) in &doc.switch_states {
            let Some(id) = self.switch_id(name) else {
                warn!(switch = %name, "switch-state entry for unknown switch skipped");
                continue;
            };
            self.switches.set(id, entry.state);
            self.switches.set_group(id, entry.group.clone());
            applied += 1;
        }
        self.refresh();
        applied
    }

    /// Serializable snapshot of the current switch table, for persistence.
    pub fn switch_states_snapshot(&self) -> SwitchStatesDoc {
        let graph = &self.network.graph;
        let switch_states = self
            .switches
            .iter()
            .filter_map(|(id, entry)| {
                let name = graph.name(id)?;
                Some((
                    name.to_string(),
                    SwitchStateEntry {
                        state: entry.state,
                        group: entry.group.clone(),
                    },
                ))
            })
            .collect();
        SwitchStatesDoc { switch_states }
    }
}
