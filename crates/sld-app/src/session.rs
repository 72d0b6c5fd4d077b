//! Session lifecycle: not ready until a valid topology loads.

use std::path::PathBuf;

use sld_sim::EnergizationReport;
use sld_topology::{ScenarioLibrary, SwitchStatesDoc, TopologyDoc};
use tracing::{error, info, warn};

use crate::documents;
use crate::error::{AppError, AppResult};
use crate::simulation::Simulation;

/// Paths of the documents a session loads. Only the topology is required.
#[derive(Debug, Clone, Default)]
pub struct LoadRequest {
    pub topology: PathBuf,
    pub switch_states: Option<PathBuf>,
    pub scenarios: Option<PathBuf>,
}

/// Holds at most one simulation. Loads are all-or-nothing: a failed load
/// leaves whatever was there before (or nothing) in place.
#[derive(Debug, Default)]
pub struct Session {
    simulation: Option<Simulation>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.simulation.is_some()
    }

    /// Load documents from disk and replace the current simulation.
    pub fn load(&mut self, request: &LoadRequest) -> AppResult<()> {
        let result = Self::read(request).and_then(|(topology, states, scenarios)| {
            Self::assemble(&topology, states.as_ref(), scenarios)
        });
        self.install(result)
    }

    /// Same as `load`, from documents already in memory.
    pub fn load_documents(
        &mut self,
        topology: &TopologyDoc,
        switch_states: Option<&SwitchStatesDoc>,
        scenarios: Option<ScenarioLibrary>,
    ) -> AppResult<()> {
        let result = Self::assemble(topology, switch_states, scenarios);
        self.install(result)
    }

    fn read(
        request: &LoadRequest,
    ) -> AppResult<(TopologyDoc, Option<SwitchStatesDoc>, Option<ScenarioLibrary>)> {
        let topology = documents::load_topology(&request.topology)?;
        let states = request
            .switch_states
            .as_deref()
            .map(documents::load_switch_states)
            .transpose()?;
        let scenarios = request
            .scenarios
            .as_deref()
            .map(documents::load_scenarios)
            .transpose()?;
        Ok((topology, states, scenarios))
    }

    fn assemble(
        topology: &TopologyDoc,
        switch_states: Option<&SwitchStatesDoc>,
        scenarios: Option<ScenarioLibrary>,
    ) -> AppResult<Simulation> {
        let mut simulation = Simulation::from_topology(topology)?;
        if let Some(doc) = switch_states {
            simulation.seed_switch_states(doc);
        }
        if let Some(library) = scenarios {
            simulation.set_scenarios(library);
        }
        Ok(simulation)
    }

    fn install(&mut self, result: AppResult<Simulation>) -> AppResult<()> {
        match result {
            Ok(simulation) => {
                info!(
                    segments = simulation.graph().segments().len(),
                    "session ready"
                );
                self.simulation = Some(simulation);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, ready = self.is_ready(), "load failed");
                Err(err)
            }
        }
    }

    pub fn simulation(&self) -> AppResult<&Simulation> {
        self.simulation.as_ref().ok_or(AppError::NotReady)
    }

    pub fn simulation_mut(&mut self) -> AppResult<&mut Simulation> {
        self.simulation.as_mut().ok_or(AppError::NotReady)
    }

    /// Latest output contract.
    pub fn report(&self) -> AppResult<EnergizationReport> {
        Ok(self.simulation()?.report())
    }

    /// Toggle a switch; a no-op before the session is ready.
    pub fn toggle(&mut self, switch: &str) -> bool {
        match self.simulation.as_mut() {
            Some(sim) => sim.toggle(switch),
            None => {
                warn!(switch, "toggle before topology loaded ignored");
                false
            }
        }
    }

    /// Apply a scenario; a no-op before the session is ready.
    pub fn apply_scenario(&mut self, scenario_id: &str) -> bool {
        match self.simulation.as_mut() {
            Some(sim) => sim.apply_scenario(scenario_id),
            None => {
                warn!(scenario = scenario_id, "scenario before topology loaded ignored");
                false
            }
        }
    }
}
