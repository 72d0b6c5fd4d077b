//! Breadth-first energization from feeds through closed switches.

use std::collections::VecDeque;

use sld_graph::{Graph, SegmentKind};
use tracing::{debug, warn};

use crate::energization::{Energization, EnergyState, SegmentEnergy};
use crate::feed::Feed;
use crate::switches::SwitchTable;

/// Compute which segments are energized and the phase/side they inherit.
///
/// Pure: reads the graph, the switch table and the feeds and returns a fresh
/// result. Feeds are stamped first and never overwritten. A segment keeps the
/// provenance of whichever feed reaches it first; radial networks never reach
/// a segment twice. A feed placed on an open or faulted switch is skipped: the
/// switch still reads `Open` and neither end is fed through it.
pub fn propagate(graph: &Graph, switches: &SwitchTable, feeds: &[Feed]) -> Energization {
    let count = graph.segments().len();

    // Reset: nothing energized; non-conducting switches read as open.
    let mut out: Vec<SegmentEnergy> = graph
        .segments()
        .iter()
        .map(|segment| match segment.kind {
            SegmentKind::Switch { .. } if !switches.effective(segment.id).conducts() => {
                SegmentEnergy::open()
            }
            _ => SegmentEnergy::default(),
        })
        .collect();
    let mut visited = vec![false; count];
    let mut queue = VecDeque::new();

    for feed in feeds {
        let slot = feed.segment.slot();
        if slot >= count {
            warn!(segment = %feed.segment, "feed on unknown segment skipped");
            continue;
        }
        if visited[slot] {
            debug!(segment = %feed.segment, "second feed on the same segment ignored");
            continue;
        }
        if graph.segment(feed.segment).is_some_and(|s| s.is_switch())
            && !switches.effective(feed.segment).conducts()
        {
            warn!(segment = %feed.segment, "feed on a non-conducting switch skipped");
            continue;
        }
        visited[slot] = true;
        out[slot] = SegmentEnergy::energized(feed.provenance.clone());
        queue.push_back(feed.segment);
    }

    while let Some(current) = queue.pop_front() {
        let Some(segment) = graph.segment(current) else {
            continue;
        };
        let provenance = out[current.slot()].provenance.clone();

        match &segment.kind {
            // Only reachable as a feed on a closed switch: it feeds both of its ends.
            SegmentKind::Switch { endpoints } => {
                for end in endpoints.iter().flatten() {
                    let slot = end.slot();
                    if slot < count && !visited[slot] {
                        visited[slot] = true;
                        out[slot] = SegmentEnergy::energized(provenance.clone());
                        queue.push_back(*end);
                    }
                }
            }
            SegmentKind::Wire { .. } | SegmentKind::Busbar | SegmentKind::SecondaryCircuit => {
                for &switch in graph.connections(current) {
                    let sw_slot = switch.slot();
                    if !switches.effective(switch).conducts() {
                        // Open and faulted switches stop propagation in both directions.
                        if !visited[sw_slot] {
                            out[sw_slot] = SegmentEnergy::open();
                        }
                        continue;
                    }

                    if !visited[sw_slot] {
                        visited[sw_slot] = true;
                        out[sw_slot] = SegmentEnergy::energized(provenance.clone());
                    }

                    let Some(far) = graph.far_end(switch, current) else {
                        continue;
                    };
                    let far_slot = far.slot();
                    if far_slot < count && !visited[far_slot] {
                        visited[far_slot] = true;
                        out[far_slot] = SegmentEnergy::energized(provenance.clone());
                        queue.push_back(far);
                    }
                }
            }
        }
    }

    let result = Energization { segments: out };
    debug!(
        segments = count,
        energized = result.count(EnergyState::Energized),
        open = result.count(EnergyState::Open),
        "propagation finished"
    );
    result
}
