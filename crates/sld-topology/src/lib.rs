//! sld-topology: station topology, switch-state and scenario documents.
//!
//! Documents are JSON or YAML; the format follows the file extension.

pub mod schema;
pub mod validate;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

pub use schema::*;
pub use validate::{ValidationError, validate_topology};

pub type TopologyResult<T> = Result<T, TopologyError>;

#[derive(thiserror::Error, Debug)]
pub enum TopologyError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Json,
    Yaml,
}

impl DocFormat {
    /// `.yaml`/`.yml` read as YAML, anything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocFormat::Yaml
            }
            _ => DocFormat::Json,
        }
    }
}

pub fn parse_str<T: DeserializeOwned>(content: &str, format: DocFormat) -> TopologyResult<T> {
    Ok(match format {
        DocFormat::Json => serde_json::from_str(content)?,
        DocFormat::Yaml => serde_yaml::from_str(content)?,
    })
}

pub fn to_string<T: Serialize>(doc: &T, format: DocFormat) -> TopologyResult<String> {
    Ok(match format {
        DocFormat::Json => serde_json::to_string_pretty(doc)?,
        DocFormat::Yaml => serde_yaml::to_string(doc)?,
    })
}

fn read_document<T: DeserializeOwned>(path: &Path) -> TopologyResult<T> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content, DocFormat::from_path(path))
}

fn write_document<T: Serialize>(path: &Path, doc: &T) -> TopologyResult<()> {
    let content = to_string(doc, DocFormat::from_path(path))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Parse and validate a topology held in memory.
pub fn parse_topology(content: &str, format: DocFormat) -> TopologyResult<TopologyDoc> {
    let topology: TopologyDoc = parse_str(content, format)?;
    validate_topology(&topology)?;
    Ok(topology)
}

pub fn load_topology(path: &Path) -> TopologyResult<TopologyDoc> {
    let topology: TopologyDoc = read_document(path)?;
    validate_topology(&topology)?;
    info!(
        path = %path.display(),
        stations = topology.stations.len(),
        feeds = topology.feeds.len(),
        "topology loaded"
    );
    Ok(topology)
}

pub fn save_topology(path: &Path, topology: &TopologyDoc) -> TopologyResult<()> {
    validate_topology(topology)?;
    write_document(path, topology)
}

pub fn load_switch_states(path: &Path) -> TopologyResult<SwitchStatesDoc> {
    let doc: SwitchStatesDoc = read_document(path)?;
    info!(path = %path.display(), switches = doc.switch_states.len(), "switch states loaded");
    Ok(doc)
}

pub fn save_switch_states(path: &Path, doc: &SwitchStatesDoc) -> TopologyResult<()> {
    write_document(path, doc)
}

pub fn load_scenarios(path: &Path) -> TopologyResult<ScenarioLibrary> {
    let library: ScenarioLibrary = read_document(path)?;
    info!(path = %path.display(), scenarios = library.scenarios.len(), "scenarios loaded");
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(DocFormat::from_path(Path::new("t.yaml")), DocFormat::Yaml);
        assert_eq!(DocFormat::from_path(Path::new("t.YML")), DocFormat::Yaml);
        assert_eq!(DocFormat::from_path(Path::new("t.json")), DocFormat::Json);
        assert_eq!(DocFormat::from_path(Path::new("topologia")), DocFormat::Json);
    }

    #[test]
    fn parse_topology_rejects_malformed() {
        assert!(matches!(
            parse_topology("{\"stations\": 3}", DocFormat::Json),
            Err(TopologyError::Json(_))
        ));
    }
}
