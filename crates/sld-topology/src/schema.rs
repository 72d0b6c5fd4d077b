//! Document schema definitions.
//!
//! Legacy Hungarian field spellings (`fazis`, `oldal`, `szinek`,
//! `gyujtosin`, `scenariok`) are accepted as aliases. Stations, nodes and
//! switches may also be written as arrays whose entries carry their key in an
//! inline `id` field; they are always written back as maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use sld_core::SwitchState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TopologyDoc {
    #[serde(default, deserialize_with = "keyed_stations")]
    pub stations: BTreeMap<String, StationDef>,
    #[serde(default)]
    pub feeds: FeedsDef,
    /// Palette for renderers; carried through untouched.
    #[serde(default, alias = "szinek")]
    pub colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StationDef {
    #[serde(default, deserialize_with = "keyed")]
    pub nodes: BTreeMap<String, NodeDef>,
    #[serde(default, deserialize_with = "keyed")]
    pub switches: BTreeMap<String, SwitchDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodeDef {
    #[serde(default, rename = "type")]
    pub kind: NodeTypeDef,
    #[serde(default, alias = "fazis", skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, alias = "oldal", skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// Switch ids this node touches, in traversal order.
    #[serde(default)]
    pub connects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

/// Array entry carrying its map key inline.
#[derive(Deserialize)]
struct Keyed<T> {
    #[serde(default, alias = "name")]
    id: Option<String>,
    #[serde(flatten)]
    item: T,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyedRepr<T> {
    Map(BTreeMap<String, T>),
    List(Vec<Keyed<T>>),
}

fn keyed_with<'de, D, T>(
    de: D,
    unnamed: impl Fn(usize) -> String,
) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match KeyedRepr::deserialize(de)? {
        KeyedRepr::Map(map) => map,
        KeyedRepr::List(list) => list
            .into_iter()
            .enumerate()
            .map(|(i, entry)| (entry.id.unwrap_or_else(|| unnamed(i)), entry.item))
            .collect(),
    })
}

/// Nodes and switches: a missing inline id reads as empty, which validation rejects.
fn keyed<'de, D, T>(de: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    keyed_with(de, |_| String::new())
}

/// Stations are only grouping, so unnamed ones get a positional name.
fn keyed_stations<'de, D>(de: D) -> Result<BTreeMap<String, StationDef>, D::Error>
where
    D: Deserializer<'de>,
{
    keyed_with(de, |i| format!("station_{}", i + 1))
}

/// Node type. Any unrecognised type string reads as `Wire`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum NodeTypeDef {
    #[default]
    Wire,
    Busbar,
    SecondaryCircuit,
}

impl From<String> for NodeTypeDef {
    fn from(s: String) -> Self {
        match s.as_str() {
            "busbar" | "gyujtosin" => NodeTypeDef::Busbar,
            "secondary_circuit" | "secondary" | "szekunder" => NodeTypeDef::SecondaryCircuit,
            _ => NodeTypeDef::Wire,
        }
    }
}

impl From<NodeTypeDef> for String {
    fn from(kind: NodeTypeDef) -> Self {
        match kind {
            NodeTypeDef::Wire => "wire",
            NodeTypeDef::Busbar => "busbar",
            NodeTypeDef::SecondaryCircuit => "secondary_circuit",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SwitchDef {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    /// Declared initial position; `closed` when absent.
    #[serde(default)]
    pub state: SwitchState,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedDef {
    pub node: String,
    pub phase: String,
    #[serde(default, alias = "oldal", skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Feeds come either as a list or as a map keyed by feed name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FeedsDef {
    List(Vec<FeedDef>),
    Named(BTreeMap<String, FeedDef>),
}

impl Default for FeedsDef {
    fn default() -> Self {
        FeedsDef::List(Vec::new())
    }
}

impl FeedsDef {
    /// Feeds in declaration (list) or key (map) order, with their names if any.
    pub fn entries(&self) -> Vec<(Option<&str>, &FeedDef)> {
        match self {
            FeedsDef::List(list) => list.iter().map(|f| (None, f)).collect(),
            FeedsDef::Named(map) => map.iter().map(|(k, f)| (Some(k.as_str()), f)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FeedsDef::List(list) => list.len(),
            FeedsDef::Named(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of the persisted switch-state document. Renderer-only fields
/// (`base_angle`, `cx`, `cy`) are ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SwitchStateEntry {
    pub state: SwitchState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Persisted switch positions, keyed by switch id.
///
/// Reads either a bare map or `{"switch_states": {...}}`; always writes the
/// wrapped form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(from = "SwitchStatesRepr")]
pub struct SwitchStatesDoc {
    pub switch_states: BTreeMap<String, SwitchStateEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SwitchStatesRepr {
    Wrapped {
        switch_states: BTreeMap<String, SwitchStateEntry>,
    },
    Bare(BTreeMap<String, SwitchStateEntry>),
}

impl From<SwitchStatesRepr> for SwitchStatesDoc {
    fn from(repr: SwitchStatesRepr) -> Self {
        let switch_states = match repr {
            SwitchStatesRepr::Wrapped { switch_states } => switch_states,
            SwitchStatesRepr::Bare(map) => map,
        };
        Self { switch_states }
    }
}

/// Partial switch positions a scenario imposes.
pub type ScenarioDef = BTreeMap<String, SwitchState>;

/// Named scenarios.
///
/// Reads a bare map or one wrapped in `scenarios`/`scenariok`; always writes
/// the wrapped form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(from = "ScenarioRepr")]
pub struct ScenarioLibrary {
    pub scenarios: BTreeMap<String, ScenarioDef>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScenarioRepr {
    Wrapped {
        #[serde(alias = "scenariok")]
        scenarios: BTreeMap<String, ScenarioDef>,
    },
    Bare(BTreeMap<String, ScenarioDef>),
}

impl From<ScenarioRepr> for ScenarioLibrary {
    fn from(repr: ScenarioRepr) -> Self {
        let scenarios = match repr {
            ScenarioRepr::Wrapped { scenarios } => scenarios,
            ScenarioRepr::Bare(map) => map,
        };
        Self { scenarios }
    }
}

impl ScenarioLibrary {
    pub fn get(&self, id: &str) -> Option<&ScenarioDef> {
        self.scenarios.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }
}
