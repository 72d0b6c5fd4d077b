//! Loading and saving the three documents a session works from.

use std::path::Path;

use sld_topology::{ScenarioLibrary, SwitchStatesDoc, TopologyDoc};

use crate::error::{AppError, AppResult};

fn read_error(what: &'static str, path: &Path, err: sld_topology::TopologyError) -> AppError {
    AppError::DocumentRead {
        what,
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Load and validate a topology (JSON or YAML by extension).
pub fn load_topology(path: &Path) -> AppResult<TopologyDoc> {
    sld_topology::load_topology(path).map_err(|e| read_error("topology", path, e))
}

/// Load a persisted switch-state document.
pub fn load_switch_states(path: &Path) -> AppResult<SwitchStatesDoc> {
    sld_topology::load_switch_states(path).map_err(|e| read_error("switch-state", path, e))
}

/// Load a scenario library.
pub fn load_scenarios(path: &Path) -> AppResult<ScenarioLibrary> {
    sld_topology::load_scenarios(path).map_err(|e| read_error("scenario", path, e))
}

/// Write a topology back in canonical map form, format by extension.
pub fn save_topology(path: &Path, topology: &TopologyDoc) -> AppResult<()> {
    sld_topology::save_topology(path, topology).map_err(|e| AppError::DocumentWrite {
        what: "topology",
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Persist a switch-state snapshot.
pub fn save_switch_states(path: &Path, doc: &SwitchStatesDoc) -> AppResult<()> {
    sld_topology::save_switch_states(path, doc).map_err(|e| AppError::DocumentWrite {
        what: "switch-state",
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
