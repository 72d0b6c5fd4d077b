//! Two substations feeding one line with a normally-open section point.

mod support;

use sld_app::{LoadRequest, Session, summarize};
use sld_sim::EnergyState;
use support::fixture;

fn session() -> Session {
    let mut session = Session::new();
    session
        .load(&LoadRequest {
            topology: fixture("line82/topologia.json"),
            switch_states: Some(fixture("line82/switch_states.json")),
            scenarios: Some(fixture("line82/scenarios.json")),
        })
        .unwrap();
    session
}

#[test]
fn normal_state_splits_at_section_point() {
    let session = session();
    let sim = session.simulation().unwrap();
    let report = sim.report();

    for id in ["w_HTK_gys", "s_HTK_1", "w_HTK_ki", "s_HTK_2", "w_M_1", "s_M_sec", "w_M_sec"] {
        let r = report.get(id).unwrap();
        assert_eq!(r.state, EnergyState::Energized, "{id}");
        assert_eq!(r.phase.as_deref(), Some("A"), "{id}");
        assert_eq!(r.side.as_deref(), Some("jobb"), "{id}");
    }
    for id in ["w_Hn_gys", "s_Hn_1", "w_Hn_ki", "s_M_2", "w_M_2"] {
        let r = report.get(id).unwrap();
        assert_eq!(r.state, EnergyState::Energized, "{id}");
        assert_eq!(r.phase.as_deref(), Some("B"), "{id}");
        assert_eq!(r.side.as_deref(), Some("bal"), "{id}");
    }
    assert_eq!(report.get("s_M_1").unwrap().state, EnergyState::Open);

    let summary = summarize(sim.energization());
    assert_eq!(summary.segments, 13);
    assert_eq!(summary.energized, 12);
    assert_eq!(summary.open, 1);
    assert_eq!(summary.by_phase["A"], 7);
    assert_eq!(summary.by_phase["B"], 5);
}

#[test]
fn groups_come_from_switch_states_and_feeds() {
    let report = session().report().unwrap();
    assert_eq!(report.get("s_M_1").unwrap().group, "g_M_1");
    assert_eq!(report.get("w_HTK_gys").unwrap().group, "g_HTK_feed");
    assert_eq!(report.get("w_M_2").unwrap().group, "w_M_2");
}

#[test]
fn losing_htk_moves_middle_to_hatvan() {
    let mut session = session();
    assert!(session.apply_scenario("htk_kiesett"));
    let sim = session.simulation().unwrap();
    let summary = summarize(sim.energization());
    assert_eq!(summary.by_phase["A"], 3);
    assert_eq!(summary.by_phase["B"], 9);
    assert_eq!(summary.open, 1);

    let report = sim.report();
    assert_eq!(report.get("w_M_1").unwrap().phase.as_deref(), Some("B"));
    assert_eq!(report.get("w_M_sec").unwrap().phase.as_deref(), Some("B"));
}

#[test]
fn maintenance_scenario_with_fault() {
    let mut session = session();
    assert!(session.apply_scenario("karbantartas"));
    let sim = session.simulation().unwrap();
    let report = sim.report();

    assert_eq!(report.get("s_Hn_1").unwrap().state, EnergyState::Open);
    assert_eq!(
        sim.switch_state("s_Hn_1"),
        Some(sld_core::SwitchState::Fault)
    );
    assert_eq!(report.get("w_Hn_ki").unwrap().state, EnergyState::Unenergized);
    // closed but nothing behind it is fed
    assert_eq!(report.get("s_M_2").unwrap().state, EnergyState::Unenergized);
    assert_eq!(report.get("w_M_sec").unwrap().state, EnergyState::Unenergized);

    let summary = summarize(sim.energization());
    assert_eq!((summary.energized, summary.unenergized, summary.open), (6, 4, 3));

    // faulted switches do not toggle
    assert!(!session.toggle("s_Hn_1"));
}

#[test]
fn unknown_scenario_is_noop() {
    let mut session = session();
    let before = session.report().unwrap();
    assert!(!session.apply_scenario("nincs_ilyen"));
    assert_eq!(session.report().unwrap(), before);
}

#[test]
fn colors_pass_through() {
    let session = session();
    let sim = session.simulation().unwrap();
    assert_eq!(sim.colors()["gyujtosin"], "#CC9900");
    assert_eq!(sim.feeds().len(), 2);
    assert_eq!(sim.feeds()[0].name.as_deref(), Some("Alallomas_HTK"));
}

#[test]
fn station_listing() {
    let topo = sld_app::load_topology(&fixture("line82/topologia.json")).unwrap();
    let stations = sld_app::list_stations(&topo);
    let names: Vec<_> = stations.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Alallomas_HTK", "Alallomas_Hatvan", "Szakaszolo_Hely"]);
    assert_eq!(stations[2].node_count, 3);
    assert_eq!(stations[2].switch_count, 3);
}
