//! Core graph data structures.

use sld_core::SegmentId;

use crate::builder::BuildDiagnostic;
use crate::indexing::NameIndex;

/// Kind of a node segment, as declared by the topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Ordinary line/wire section. Declared tags are static presentation hints.
    Wire {
        phase: Option<String>,
        side: Option<String>,
    },
    /// Station busbar ("gyujtosin").
    Busbar,
    /// Secondary circuit.
    SecondaryCircuit,
}

impl NodeKind {
    /// Untagged wire.
    pub fn wire() -> Self {
        NodeKind::Wire {
            phase: None,
            side: None,
        }
    }
}

/// What a segment is. Wire nodes and switches live in the same keyspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    Wire {
        phase: Option<String>,
        side: Option<String>,
    },
    Busbar,
    SecondaryCircuit,
    /// A switch is both a paintable segment and an edge between two nodes.
    /// An end is `None` when the topology gives no way to resolve it.
    Switch { endpoints: [Option<SegmentId>; 2] },
}

impl From<NodeKind> for SegmentKind {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Wire { phase, side } => SegmentKind::Wire { phase, side },
            NodeKind::Busbar => SegmentKind::Busbar,
            NodeKind::SecondaryCircuit => SegmentKind::SecondaryCircuit,
        }
    }
}

/// An energizable unit of the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: SegmentId,
    pub name: String,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn is_switch(&self) -> bool {
        matches!(self.kind, SegmentKind::Switch { .. })
    }

    pub fn endpoints(&self) -> Option<[Option<SegmentId>; 2]> {
        match self.kind {
            SegmentKind::Switch { endpoints } => Some(endpoints),
            _ => None,
        }
    }
}

/// The graph: a validated, immutable collection of segments plus node -> switch
/// connection lists.
///
/// Connection lists are stored compactly: segment i's switches are
/// `connections[conn_offsets[i]..conn_offsets[i + 1]]`. Switch segments have
/// empty lists; their reach is given by their endpoints.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) segments: Vec<Segment>,
    pub(crate) index: NameIndex,
    pub(crate) conn_offsets: Vec<usize>,
    pub(crate) connections: Vec<SegmentId>,
    pub(crate) diagnostics: Vec<BuildDiagnostic>,
}

impl Graph {
    /// Return all segments, in id order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Get a segment by ID (returns None if ID out of bounds).
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.slot())
    }

    /// Resolve a topology id.
    pub fn lookup(&self, name: &str) -> Option<SegmentId> {
        self.index.get(name)
    }

    /// Topology id of a segment.
    pub fn name(&self, id: SegmentId) -> Option<&str> {
        self.index.name(id)
    }

    pub fn index(&self) -> &NameIndex {
        &self.index
    }

    /// Ordered switch ids a node touches. Empty for switches and unknown ids.
    pub fn connections(&self, id: SegmentId) -> &[SegmentId] {
        let idx = id.slot();
        if idx >= self.segments.len() {
            return &[];
        }
        let start = self.conn_offsets[idx];
        let end = self.conn_offsets[idx + 1];
        &self.connections[start..end]
    }

    /// Endpoint of `switch` opposite `from`.
    ///
    /// When `from` is not one of the switch's ends (a node listing a switch that
    /// ends elsewhere), the first resolved end other than `from` is returned.
    pub fn far_end(&self, switch: SegmentId, from: SegmentId) -> Option<SegmentId> {
        let [a, b] = self.segment(switch)?.endpoints()?;
        match (a, b) {
            (Some(a), b) if a == from => b,
            (a, Some(b)) if b == from => a,
            (a, b) => a.or(b).filter(|&end| end != from),
        }
    }

    /// Iterate over switch segments.
    pub fn switches(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_switch())
    }

    /// Iterate over node (non-switch) segments.
    pub fn nodes(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| !s.is_switch())
    }

    /// Anomalies tolerated while building.
    pub fn diagnostics(&self) -> &[BuildDiagnostic] {
        &self.diagnostics
    }
}
