//! Name-driven graph builder.
//!
//! Topology documents declare nodes with connection lists and switches with
//! `from`/`to` ids, in any order and across stations. The builder collects
//! everything first and resolves references in `build()`.

use std::collections::HashMap;
use std::fmt;

use sld_core::{SegmentId, SldResult};
use tracing::{debug, warn};

use crate::graph::{Graph, NodeKind, Segment, SegmentKind};
use crate::indexing::NameIndex;
use crate::validate;

/// An anomaly the builder tolerated. None of these stop a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildDiagnostic {
    /// A node lists a connection that is not a known switch; the entry is skipped.
    UnknownConnection { node: String, connection: String },

    /// A switch end could not be resolved; traversal dead-ends there.
    UnresolvedEndpoint { switch: String, declared: String },

    /// A switch end was recovered by scanning connection lists.
    RecoveredEndpoint {
        switch: String,
        declared: String,
        node: String,
    },

    /// A node lists a switch whose ends are two other nodes.
    ForeignConnection { node: String, switch: String },

    /// A switch end did not list the switch; it was appended to keep adjacency symmetric.
    ImplicitConnection { node: String, switch: String },
}

impl BuildDiagnostic {
    /// Whether this indicates inconsistent data, rather than a harmless omission.
    pub fn is_anomaly(&self) -> bool {
        !matches!(self, BuildDiagnostic::ImplicitConnection { .. })
    }
}

impl fmt::Display for BuildDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildDiagnostic::UnknownConnection { node, connection } => {
                write!(f, "node '{}' lists unknown switch '{}'", node, connection)
            }
            BuildDiagnostic::UnresolvedEndpoint { switch, declared } => {
                write!(
                    f,
                    "switch '{}' end '{}' matches no node; left disconnected",
                    switch, declared
                )
            }
            BuildDiagnostic::RecoveredEndpoint {
                switch,
                declared,
                node,
            } => {
                write!(
                    f,
                    "switch '{}' end '{}' matches no node; resolved to '{}' by connection lists",
                    switch, declared, node
                )
            }
            BuildDiagnostic::ForeignConnection { node, switch } => {
                write!(
                    f,
                    "node '{}' lists switch '{}' which ends at other nodes",
                    node, switch
                )
            }
            BuildDiagnostic::ImplicitConnection { node, switch } => {
                write!(f, "node '{}' did not list its switch '{}'", node, switch)
            }
        }
    }
}

#[derive(Debug)]
struct PendingSwitch {
    id: SegmentId,
    from: String,
    to: String,
}

/// Builder for constructing a graph from named nodes and switches.
///
/// Use `add_node` and `add_switch` in any order, then call `build()` to
/// resolve references and freeze the result into an immutable `Graph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    index: NameIndex,
    kinds: Vec<Option<NodeKind>>,
    declared_connections: Vec<Vec<String>>,
    pending_switches: Vec<PendingSwitch>,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with its ordered list of switch ids.
    pub fn add_node<I, S>(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        connections: I,
    ) -> SldResult<SegmentId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = self.index.insert(name)?;
        self.kinds.push(Some(kind));
        self.declared_connections
            .push(connections.into_iter().map(Into::into).collect());
        Ok(id)
    }

    /// Add a switch between two node ids. The ids need not exist yet.
    pub fn add_switch(
        &mut self,
        name: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> SldResult<SegmentId> {
        let id = self.index.insert(name)?;
        self.kinds.push(None);
        self.declared_connections.push(Vec::new());
        self.pending_switches.push(PendingSwitch {
            id,
            from: from.into(),
            to: to.into(),
        });
        Ok(id)
    }

    /// Whether an id has already been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.index.get(name).is_some()
    }

    /// Resolve references, build connection lists and validate the result.
    pub fn build(self) -> SldResult<Graph> {
        let GraphBuilder {
            index,
            kinds,
            declared_connections,
            pending_switches,
        } = self;

        let count = index.len();
        let name_of = |id: SegmentId| index.name(id).unwrap_or("?").to_string();
        let is_node = |id: SegmentId| matches!(kinds.get(id.slot()), Some(Some(_)));
        let is_switch = |id: SegmentId| matches!(kinds.get(id.slot()), Some(None));

        let mut diagnostics = Vec::new();
        let mut connections: Vec<Vec<SegmentId>> = vec![Vec::new(); count];
        // switch -> nodes that list it, in declaration order
        let mut listed_by: HashMap<SegmentId, Vec<SegmentId>> = HashMap::new();

        // Declared connection lists, in order, skipping what is not a switch.
        for (slot, declared) in declared_connections.iter().enumerate() {
            let node = SegmentId::from_slot(slot);
            for conn in declared {
                match index.get(conn).filter(|&id| is_switch(id)) {
                    Some(sw) => {
                        if !connections[slot].contains(&sw) {
                            connections[slot].push(sw);
                            listed_by.entry(sw).or_default().push(node);
                        }
                    }
                    None => {
                        let diag = BuildDiagnostic::UnknownConnection {
                            node: name_of(node),
                            connection: conn.clone(),
                        };
                        warn!("{}", diag);
                        diagnostics.push(diag);
                    }
                }
            }
        }

        // Switch endpoints: literal match first, then scan connection lists.
        let mut endpoints: HashMap<SegmentId, [Option<SegmentId>; 2]> = HashMap::new();
        for pending in &pending_switches {
            let literal = |declared: &str| index.get(declared).filter(|&id| is_node(id));
            let mut ends = [literal(&pending.from), literal(&pending.to)];
            let declared = [&pending.from, &pending.to];

            for side in 0..2 {
                if ends[side].is_some() {
                    continue;
                }
                let other = ends[1 - side];
                let recovered = listed_by
                    .get(&pending.id)
                    .and_then(|nodes| nodes.iter().copied().find(|&n| Some(n) != other));
                let diag = match recovered {
                    Some(node) => {
                        ends[side] = Some(node);
                        BuildDiagnostic::RecoveredEndpoint {
                            switch: name_of(pending.id),
                            declared: declared[side].clone(),
                            node: name_of(node),
                        }
                    }
                    None => BuildDiagnostic::UnresolvedEndpoint {
                        switch: name_of(pending.id),
                        declared: declared[side].clone(),
                    },
                };
                warn!("{}", diag);
                diagnostics.push(diag);
            }

            // Each resolved end must list the switch so traversal works both ways.
            for end in ends.iter().flatten() {
                let list = &mut connections[end.slot()];
                if !list.contains(&pending.id) {
                    list.push(pending.id);
                    let diag = BuildDiagnostic::ImplicitConnection {
                        node: name_of(*end),
                        switch: name_of(pending.id),
                    };
                    debug!("{}", diag);
                    diagnostics.push(diag);
                }
            }

            if let Some(nodes) = listed_by.get(&pending.id) {
                for &node in nodes {
                    if !ends.contains(&Some(node)) {
                        let diag = BuildDiagnostic::ForeignConnection {
                            node: name_of(node),
                            switch: name_of(pending.id),
                        };
                        warn!("{}", diag);
                        diagnostics.push(diag);
                    }
                }
            }

            endpoints.insert(pending.id, ends);
        }

        let segments: Vec<Segment> = kinds
            .into_iter()
            .enumerate()
            .map(|(slot, kind)| {
                let id = SegmentId::from_slot(slot);
                let kind = match kind {
                    Some(node_kind) => node_kind.into(),
                    None => SegmentKind::Switch {
                        endpoints: endpoints.get(&id).copied().unwrap_or([None, None]),
                    },
                };
                Segment {
                    id,
                    name: name_of(id),
                    kind,
                }
            })
            .collect();

        let (conn_offsets, flat) = Self::flatten(&connections);
        validate::validate_connections(&segments, &conn_offsets, &flat)?;

        Ok(Graph {
            segments,
            index,
            conn_offsets,
            connections: flat,
            diagnostics,
        })
    }

    /// Build compact connection lists: offsets plus one flat vector.
    fn flatten(lists: &[Vec<SegmentId>]) -> (Vec<usize>, Vec<SegmentId>) {
        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let mut flat = Vec::new();
        offsets.push(0);
        for list in lists {
            flat.extend_from_slice(list);
            offsets.push(flat.len());
        }
        (offsets, flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let mut builder = GraphBuilder::new();
        let n1 = builder.add_node("w_1", NodeKind::wire(), ["s_1"]).unwrap();
        let n2 = builder.add_node("w_2", NodeKind::Busbar, ["s_1"]).unwrap();
        let s1 = builder.add_switch("s_1", "w_1", "w_2").unwrap();

        assert_eq!(n1.index(), 0);
        assert_eq!(n2.index(), 1);
        assert_eq!(s1.index(), 2);
        assert!(builder.contains("s_1"));

        let graph = builder.build().unwrap();
        assert_eq!(graph.connections(n1), &[s1]);
        assert_eq!(graph.connections(n2), &[s1]);
        assert!(graph.connections(s1).is_empty());
        assert!(graph.diagnostics().is_empty());
    }

    #[test]
    fn builder_rejects_duplicate_ids() {
        let mut builder = GraphBuilder::new();
        builder.add_node("w_1", NodeKind::wire(), Vec::<String>::new()).unwrap();
        assert!(matches!(
            builder.add_switch("w_1", "a", "b"),
            Err(sld_core::SldError::DuplicateId { id }) if id == "w_1"
        ));
    }

    #[test]
    fn switch_declared_before_nodes() {
        let mut builder = GraphBuilder::new();
        let s = builder.add_switch("s_x", "w_a", "w_b").unwrap();
        let a = builder.add_node("w_a", NodeKind::wire(), ["s_x"]).unwrap();
        let b = builder.add_node("w_b", NodeKind::wire(), ["s_x"]).unwrap();
        let graph = builder.build().unwrap();
        assert_eq!(graph.far_end(s, a), Some(b));
        assert_eq!(graph.far_end(s, b), Some(a));
    }

    #[test]
    fn missing_connection_entry_is_added() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node("w_a", NodeKind::wire(), ["s_x"]).unwrap();
        let b = builder.add_node("w_b", NodeKind::wire(), Vec::<String>::new()).unwrap();
        let s = builder.add_switch("s_x", "w_a", "w_b").unwrap();
        let graph = builder.build().unwrap();

        assert_eq!(graph.connections(b), &[s]);
        assert_eq!(graph.far_end(s, b), Some(a));
        assert!(matches!(
            graph.diagnostics(),
            [BuildDiagnostic::ImplicitConnection { .. }]
        ));
        assert!(!graph.diagnostics()[0].is_anomaly());
    }

    #[test]
    fn unknown_connection_is_skipped() {
        let mut builder = GraphBuilder::new();
        let a = builder
            .add_node("w_a", NodeKind::wire(), ["s_ghost", "w_b"])
            .unwrap();
        builder.add_node("w_b", NodeKind::wire(), Vec::<String>::new()).unwrap();
        let graph = builder.build().unwrap();

        assert!(graph.connections(a).is_empty());
        assert_eq!(graph.diagnostics().len(), 2);
        assert!(graph.diagnostics().iter().all(|d| d.is_anomaly()));
    }

    #[test]
    fn mismatched_endpoint_recovered_from_connections() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node("w_a", NodeKind::wire(), ["s_x"]).unwrap();
        let b = builder.add_node("w_b", NodeKind::wire(), ["s_x"]).unwrap();
        // "to" is a typo
        let s = builder.add_switch("s_x", "w_a", "w_bb").unwrap();
        let graph = builder.build().unwrap();

        assert_eq!(graph.far_end(s, a), Some(b));
        assert!(graph.diagnostics().iter().any(|d| matches!(
            d,
            BuildDiagnostic::RecoveredEndpoint { node, .. } if node == "w_b"
        )));
    }

    #[test]
    fn unresolvable_endpoint_left_disconnected() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node("w_a", NodeKind::wire(), ["s_x"]).unwrap();
        let s = builder.add_switch("s_x", "w_a", "w_nowhere").unwrap();
        let graph = builder.build().unwrap();

        assert_eq!(graph.segment(s).unwrap().endpoints(), Some([Some(a), None]));
        assert_eq!(graph.far_end(s, a), None);
        assert!(graph.diagnostics().iter().any(|d| matches!(
            d,
            BuildDiagnostic::UnresolvedEndpoint { declared, .. } if declared == "w_nowhere"
        )));
    }
}
