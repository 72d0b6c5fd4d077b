//! Compile a topology document into a runnable network.

use std::collections::BTreeMap;

use sld_core::Provenance;
use sld_graph::{BuildDiagnostic, Graph, GraphBuilder, NodeKind};
use sld_sim::{Feed, SwitchTable};
use sld_topology::{NodeDef, NodeTypeDef, TopologyDoc, validate_topology};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Immutable network: graph, declared switch positions, feeds, palette.
#[derive(Debug, Clone)]
pub struct Network {
    pub graph: Graph,
    /// Switch table as the topology declares it.
    pub initial_switches: SwitchTable,
    pub feeds: Vec<Feed>,
    /// Renderer palette, passed through untouched.
    pub colors: BTreeMap<String, String>,
}

impl Network {
    /// Builder anomalies (ignores harmless implicit connections).
    pub fn anomalies(&self) -> impl Iterator<Item = &BuildDiagnostic> {
        self.graph.diagnostics().iter().filter(|d| d.is_anomaly())
    }
}

fn node_kind(node: &NodeDef) -> NodeKind {
    match node.kind {
        NodeTypeDef::Wire => NodeKind::Wire {
            phase: node.phase.clone(),
            side: node.side.clone(),
        },
        NodeTypeDef::Busbar => NodeKind::Busbar,
        NodeTypeDef::SecondaryCircuit => NodeKind::SecondaryCircuit,
    }
}

/// Validate the topology and build the graph, switch table and feed list.
///
/// Stations are merged into one global id space, so switches may end in
/// another station.
pub fn compile_topology(topology: &TopologyDoc) -> AppResult<Network> {
    validate_topology(topology).map_err(|e| AppError::Topology(e.to_string()))?;

    let mut builder = GraphBuilder::new();
    for (station_name, station) in &topology.stations {
        debug!(
            station = %station_name,
            nodes = station.nodes.len(),
            switches = station.switches.len(),
            "adding station"
        );
        for (id, node) in &station.nodes {
            builder.add_node(id.as_str(), node_kind(node), node.connects.iter().cloned())?;
        }
        for (id, switch) in &station.switches {
            builder.add_switch(id.as_str(), switch.from.as_str(), switch.to.as_str())?;
        }
    }
    let graph = builder.build()?;

    let mut initial_switches = SwitchTable::for_graph(&graph);
    for station in topology.stations.values() {
        for (id, switch) in &station.switches {
            if let Some(sw) = graph.lookup(id) {
                initial_switches.set(sw, switch.state);
            }
        }
    }

    let mut feeds = Vec::with_capacity(topology.feeds.len());
    for (name, def) in topology.feeds.entries() {
        let segment = graph.lookup(&def.node).ok_or_else(|| {
            AppError::Compile(format!("feed node '{}' is not in the graph", def.node))
        })?;
        feeds.push(Feed {
            name: name.map(str::to_string),
            segment,
            provenance: Provenance {
                phase: Some(def.phase.clone()),
                side: def.side.clone(),
            },
            group: def.group.clone(),
        });
    }

    let network = Network {
        graph,
        initial_switches,
        feeds,
        colors: topology.colors.clone(),
    };
    info!(
        segments = network.graph.segments().len(),
        switches = network.initial_switches.len(),
        feeds = network.feeds.len(),
        anomalies = network.anomalies().count(),
        "topology compiled"
    );
    Ok(network)
}
