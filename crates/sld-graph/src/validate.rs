//! Graph validation logic.

use sld_core::{SegmentId, SldResult};

use crate::error::GraphError;
use crate::graph::Segment;

/// Check the frozen connection lists: offsets cover every segment, every entry
/// is a switch, and every resolved switch end lists its switch.
pub(crate) fn validate_connections(
    segments: &[Segment],
    conn_offsets: &[usize],
    connections: &[SegmentId],
) -> SldResult<()> {
    if conn_offsets.len() != segments.len() + 1 {
        return Err(GraphError::OffsetsLength {
            expected: segments.len() + 1,
            actual: conn_offsets.len(),
        }
        .into());
    }

    let list = |id: SegmentId| {
        let idx = id.slot();
        &connections[conn_offsets[idx]..conn_offsets[idx + 1]]
    };

    for segment in segments {
        for &conn in list(segment.id) {
            let is_switch = segments.get(conn.slot()).is_some_and(Segment::is_switch);
            if !is_switch {
                return Err(GraphError::NotASwitch {
                    node: segment.id,
                    segment: conn,
                }
                .into());
            }
        }
    }

    // Symmetry: a closed switch must be reachable from both ends.
    for segment in segments {
        let Some(ends) = segment.endpoints() else {
            continue;
        };
        for end in ends.into_iter().flatten() {
            if end.slot() >= segments.len() || !list(end).contains(&segment.id) {
                return Err(GraphError::AsymmetricConnection {
                    switch: segment.id,
                    node: end,
                }
                .into());
            }
        }
    }

    Ok(())
}
