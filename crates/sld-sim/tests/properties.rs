//! Property tests for propagation on generated radial networks.

use proptest::prelude::*;
use sld_core::{Provenance, SegmentId, SwitchState};
use sld_graph::{Graph, GraphBuilder, NodeKind};
use sld_sim::{EnergyState, Feed, SwitchTable, propagate};

/// A radial network: node i > 0 hangs off `parents[i - 1]` through switch `s_i`.
#[derive(Debug)]
struct Radial {
    graph: Graph,
    switches: SwitchTable,
    feeds: Vec<Feed>,
    parents: Vec<usize>,
}

impl Radial {
    fn new(parent_picks: &[prop::sample::Index], states: &[u8]) -> Self {
        let n = parent_picks.len() + 1;
        let parents: Vec<usize> = parent_picks
            .iter()
            .enumerate()
            .map(|(i, pick)| pick.index(i + 1))
            .collect();

        let mut b = GraphBuilder::new();
        for node in 0..n {
            let mut conns = Vec::new();
            if node > 0 {
                conns.push(format!("s_{node}"));
            }
            for (child0, &p) in parents.iter().enumerate() {
                if p == node {
                    conns.push(format!("s_{}", child0 + 1));
                }
            }
            b.add_node(format!("w_{node}"), NodeKind::wire(), conns).unwrap();
        }
        for (child0, &p) in parents.iter().enumerate() {
            let child = child0 + 1;
            b.add_switch(format!("s_{child}"), format!("w_{p}"), format!("w_{child}"))
                .unwrap();
        }
        let graph = b.build().unwrap();
        assert!(graph.diagnostics().is_empty());

        let mut switches = SwitchTable::for_graph(&graph);
        for (child0, &code) in states.iter().enumerate().take(n - 1) {
            let state = match code % 4 {
                0 => SwitchState::Closed,
                1 => SwitchState::Open,
                2 => SwitchState::Fault,
                _ => SwitchState::Other,
            };
            switches.set(graph.lookup(&format!("s_{}", child0 + 1)).unwrap(), state);
        }

        let feeds = vec![Feed::new(graph.lookup("w_0").unwrap(), "A").with_side("jobb")];
        Self {
            graph,
            switches,
            feeds,
            parents,
        }
    }

    fn node(&self, i: usize) -> SegmentId {
        self.graph.lookup(&format!("w_{i}")).unwrap()
    }

    fn switch(&self, child: usize) -> SegmentId {
        self.graph.lookup(&format!("s_{child}")).unwrap()
    }

    /// Reference answer: a node is live iff every switch on its path to w_0 conducts.
    fn expected_live(&self) -> Vec<bool> {
        let n = self.parents.len() + 1;
        let mut live = vec![false; n];
        live[0] = true;
        for child in 1..n {
            let parent = self.parents[child - 1];
            live[child] = live[parent] && self.switches.effective(self.switch(child)).conducts();
        }
        live
    }

    /// Nodes joined to `start` through conducting switches, in either direction.
    fn component_of(&self, start: usize) -> Vec<bool> {
        let n = self.parents.len() + 1;
        let mut live = vec![false; n];
        live[start] = true;
        let mut changed = true;
        while changed {
            changed = false;
            for child in 1..n {
                let parent = self.parents[child - 1];
                if live[child] != live[parent]
                    && self.switches.effective(self.switch(child)).conducts()
                {
                    live[child] = true;
                    live[parent] = true;
                    changed = true;
                }
            }
        }
        live
    }
}

fn network() -> impl Strategy<Value = Radial> {
    (1usize..24)
        .prop_flat_map(|edges| {
            (
                prop::collection::vec(any::<prop::sample::Index>(), edges),
                prop::collection::vec(0u8..4, edges),
            )
        })
        .prop_map(|(picks, states)| Radial::new(&picks, &states))
}

proptest! {
    #[test]
    fn matches_reference_reachability(net in network()) {
        let e = propagate(&net.graph, &net.switches, &net.feeds);
        let live = net.expected_live();

        // Feed authority
        prop_assert!(e.is_energized(net.node(0)));
        prop_assert_eq!(e.phase(net.node(0)), Some("A"));

        for (i, &is_live) in live.iter().enumerate() {
            prop_assert_eq!(e.is_energized(net.node(i)), is_live);
            let expected_phase = if is_live { Some("A") } else { None };
            prop_assert_eq!(e.phase(net.node(i)), expected_phase);
        }

        for child in 1..live.len() {
            let sw = net.switch(child);
            let parent = net.parents[child - 1];
            let expected = if !net.switches.effective(sw).conducts() {
                EnergyState::Open
            } else if live[parent] {
                EnergyState::Energized
            } else {
                EnergyState::Unenergized
            };
            prop_assert_eq!(e.state(sw), expected);
            if expected != EnergyState::Energized {
                prop_assert_eq!(&e.get(sw).unwrap().provenance, &Provenance::default());
            }
        }
    }

    #[test]
    fn feed_anywhere_reaches_only_its_component(
        net in network(),
        pick in any::<prop::sample::Index>(),
    ) {
        let n = net.parents.len() + 1;
        let start = pick.index(n);
        let feeds = vec![Feed::new(net.node(start), "B")];
        let e = propagate(&net.graph, &net.switches, &feeds);
        let live = net.component_of(start);

        for (i, &is_live) in live.iter().enumerate() {
            prop_assert_eq!(e.is_energized(net.node(i)), is_live, "w_{}", i);
        }
        for child in 1..n {
            let sw = net.switch(child);
            let expected = if !net.switches.effective(sw).conducts() {
                EnergyState::Open
            } else if live[child] {
                EnergyState::Energized
            } else {
                EnergyState::Unenergized
            };
            prop_assert_eq!(e.state(sw), expected, "s_{}", child);
        }
    }

    #[test]
    fn propagation_is_idempotent(net in network()) {
        let first = propagate(&net.graph, &net.switches, &net.feeds);
        let second = propagate(&net.graph, &net.switches, &net.feeds);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn double_toggle_restores_result(mut net in network(), pick in any::<prop::sample::Index>()) {
        let before = propagate(&net.graph, &net.switches, &net.feeds);
        let sw = net.switch(pick.index(net.parents.len()) + 1);

        net.switches.toggle(sw);
        net.switches.toggle(sw);

        let after = propagate(&net.graph, &net.switches, &net.feeds);
        prop_assert_eq!(before, after);
    }

    #[test]
    fn empty_scenario_energizes_whole_tree(mut net in network()) {
        net.switches.apply_scenario(std::iter::empty());
        prop_assert!(net.switches.iter().all(|(_, e)| e.state == SwitchState::Closed));

        let e = propagate(&net.graph, &net.switches, &net.feeds);
        prop_assert_eq!(e.count(EnergyState::Energized), net.graph.segments().len());
    }
}
