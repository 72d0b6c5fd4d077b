//! Graph-specific error types.

use sld_core::{SegmentId, SldError};

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two segments were declared with the same id.
    DuplicateName { name: String },

    /// A connection list entry refers to a segment that is not a switch.
    NotASwitch { node: SegmentId, segment: SegmentId },

    /// A switch endpoint does not list the switch among its connections.
    AsymmetricConnection { switch: SegmentId, node: SegmentId },

    /// Connection offsets do not cover the segment list.
    OffsetsLength { expected: usize, actual: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateName { name } => {
                write!(f, "Segment id '{}' declared more than once", name)
            }
            GraphError::NotASwitch { node, segment } => {
                write!(
                    f,
                    "Node {} lists segment {} as a connection but it is not a switch",
                    node, segment
                )
            }
            GraphError::AsymmetricConnection { switch, node } => {
                write!(
                    f,
                    "Switch {} ends at node {} but the node does not list it",
                    switch, node
                )
            }
            GraphError::OffsetsLength { expected, actual } => {
                write!(
                    f,
                    "Connection offsets have length {} (expected {})",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for SldError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::DuplicateName { name } => SldError::DuplicateId { id: name },
            other => SldError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
