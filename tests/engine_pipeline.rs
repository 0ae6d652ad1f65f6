mod support;

use std::collections::BTreeSet;

use fleetdeck::api::FetchError;
use fleetdeck::fleet::list::{LOAD_FAILED_TEXT, NO_MATCHES_TEXT};
use fleetdeck::fleet::{
    CycleOutcome, DashboardEngine, DetailView, FleetStats, IconCategory, ListView, classify,
};
use serde_json::json;
use support::layer::{LayerOp, RecordingLayer};
use support::trucks::{snapshot, truck, with};
use time::UtcOffset;

fn engine() -> DashboardEngine<RecordingLayer> {
    DashboardEngine::new(RecordingLayer::default(), UtcOffset::UTC)
}

fn row_ids(engine: &DashboardEngine<RecordingLayer>) -> Vec<String> {
    engine
        .list()
        .rows()
        .iter()
        .map(|row| row.truck_id.clone())
        .collect()
}

fn ids(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn unchanged_snapshot_reconciles_idempotently() {
    let mut engine = engine();
    let data = snapshot(vec![truck("T1"), truck("T2")]);
    engine.apply_snapshot(1, data.clone());
    let adds_after_first = engine.layer().count(|op| matches!(op, LayerOp::Add(_)));

    let outcome = engine.apply_snapshot(2, data);

    let CycleOutcome::Applied(report) = outcome else {
        panic!("second cycle should apply");
    };
    assert!(report.created.is_empty());
    assert!(report.removed.is_empty());
    assert_eq!(report.updated, vec!["T1".to_string(), "T2".to_string()]);
    assert_eq!(
        engine.layer().count(|op| matches!(op, LayerOp::Add(_))),
        adds_after_first
    );
    assert_eq!(engine.layer().count(|op| matches!(op, LayerOp::Remove(_))), 0);
    assert_eq!(engine.layer().truck_ids(), ids(&["T1", "T2"]));
}

#[test]
fn marker_set_tracks_ids_with_valid_coordinates() {
    let mut engine = engine();
    engine.apply_snapshot(
        1,
        snapshot(vec![
            truck("A"),
            truck("B"),
            with(truck("C"), "latitude", json!(null)),
        ]),
    );
    assert_eq!(engine.layer().truck_ids(), ids(&["A", "B"]));

    engine.apply_snapshot(
        2,
        snapshot(vec![
            with(truck("B"), "longitude", json!("east")),
            truck("C"),
            truck("D"),
        ]),
    );
    assert_eq!(engine.layer().truck_ids(), ids(&["C", "D"]));
    assert_eq!(engine.markers().live_ids(), vec!["C", "D"]);
}

#[test]
fn markers_follow_moves_and_icon_changes() {
    let mut engine = engine();
    engine.apply_snapshot(1, snapshot(vec![truck("T1")]));
    assert_eq!(
        engine.layer().truck("T1").map(|marker| marker.icon),
        Some(IconCategory::SermsukOutbound)
    );

    let moved = with(with(truck("T1"), "latitude", json!(14.1)), "is_delayed", json!(true));
    engine.apply_snapshot(2, snapshot(vec![moved]));

    let marker = engine.layer().truck("T1").unwrap();
    assert_eq!(marker.position.lat, 14.1);
    assert_eq!(marker.icon, IconCategory::Delayed);
    let popup = marker.popup.as_ref().unwrap();
    assert!(popup.lines.iter().any(|line| line.ends_with("(Delayed)")));
}

#[test]
fn selection_clears_when_truck_disappears() {
    let mut engine = engine();
    engine.apply_snapshot(1, snapshot(vec![truck("T1"), truck("T2")]));
    let effect = engine.select("T1").unwrap();
    assert_eq!(effect.recenter.map(|at| at.lat), Some(13.75));
    assert_eq!(engine.detail().truck_id(), Some("T1"));

    engine.apply_snapshot(2, snapshot(vec![truck("T2")]));

    assert_eq!(engine.selected(), None);
    assert_eq!(engine.detail(), &DetailView::Placeholder);
    assert!(engine.list().rows().iter().all(|row| !row.active));
}

#[test]
fn selected_truck_detail_refreshes_each_cycle() {
    let mut engine = engine();
    engine.apply_snapshot(1, snapshot(vec![truck("T1")]));
    engine.select("T1");

    engine.apply_snapshot(2, snapshot(vec![with(truck("T1"), "speed_kmh", json!(80))]));

    let DetailView::Truck(detail) = engine.detail() else {
        panic!("detail should follow the selection");
    };
    assert_eq!(detail.speed, "80 km/h");
    assert!(engine.list().rows()[0].active);
}

#[test]
fn list_puts_delayed_first_then_sorts_by_id() {
    let mut engine = engine();
    engine.apply_snapshot(
        1,
        snapshot(vec![
            truck("T3"),
            with(truck("T9"), "is_delayed", json!(true)),
            truck("T1"),
            with(truck("T2"), "is_delayed", json!(true)),
        ]),
    );
    assert_eq!(row_ids(&engine), vec!["T2", "T9", "T1", "T3"]);
}

#[test]
fn filter_matches_id_or_sku_ignoring_case() {
    let mut engine = engine();
    engine.apply_snapshot(
        1,
        snapshot(vec![
            truck("BKK-001"),
            with(
                truck("CNX-002"),
                "shipments",
                json!([{"sku": "Water-600", "quantity": 3}]),
            ),
        ]),
    );

    engine.set_filter("bkk");
    assert_eq!(row_ids(&engine), vec!["BKK-001"]);

    engine.set_filter("WATER");
    assert_eq!(row_ids(&engine), vec!["CNX-002"]);

    engine.set_filter("nothing-like-this");
    assert_eq!(engine.list(), &ListView::NoMatches);
    assert_eq!(engine.list().message(), Some(NO_MATCHES_TEXT));

    engine.set_filter("");
    assert_eq!(row_ids(&engine).len(), 2);
}

#[test]
fn stats_count_total_en_route_and_delayed() {
    let mut engine = engine();
    engine.apply_snapshot(
        1,
        snapshot(vec![
            truck("A"),
            with(truck("B"), "is_delayed", json!(true)),
            with(
                with(truck("C"), "status", json!("stopped")),
                "is_delayed",
                json!(true),
            ),
        ]),
    );
    assert_eq!(
        engine.stats(),
        FleetStats {
            total: 3,
            en_route: 2,
            delayed: 2
        }
    );
}

#[test]
fn classifier_picks_unit_direction_icon_unless_delayed() {
    let on_time = snapshot(vec![truck("T1")]);
    let classified = classify(&on_time.records()[0]);
    assert_eq!(classified.icon.key(), "sermsuk_outbound");
    assert_eq!(classified.status_label, "En Route");

    let late = snapshot(vec![with(truck("T1"), "is_delayed", json!(true))]);
    let classified = classify(&late.records()[0]);
    assert_eq!(classified.icon.key(), "delayed");
    assert_eq!(classified.status_label, "En Route (Delayed)");
    assert!(classified.status_class.delayed);
}

#[test]
fn bad_latitude_only_affects_its_own_marker() {
    let mut engine = engine();
    let outcome = engine.apply_snapshot(
        1,
        snapshot(vec![with(truck("BAD"), "latitude", json!("bad")), truck("OK")]),
    );

    let CycleOutcome::Applied(report) = outcome else {
        panic!("cycle should apply");
    };
    assert_eq!(report.skipped, vec!["BAD".to_string()]);
    assert_eq!(engine.layer().truck_ids(), ids(&["OK"]));
    assert_eq!(row_ids(&engine), vec!["BAD", "OK"]);
    assert_eq!(engine.stats().total, 2);
}

#[test]
fn unkeyed_records_are_dropped_from_the_snapshot() {
    let data = snapshot(vec![json!("junk"), json!({"truck_id": 7}), truck("T1")]);
    assert_eq!(data.len(), 1);
    assert_eq!(data.dropped(), 2);
}

#[test]
fn stale_results_are_ignored() {
    let mut engine = engine();
    engine.apply_snapshot(5, snapshot(vec![truck("NEW")]));

    let outcome = engine.apply_snapshot(4, snapshot(vec![truck("OLD")]));
    assert_eq!(outcome, CycleOutcome::Stale { seq: 4, latest: 5 });
    assert!(!engine.apply_fetch_failure(3, &FetchError::BadStatus { status: 500 }));

    assert_eq!(row_ids(&engine), vec!["NEW"]);
    assert_eq!(engine.latest_seq(), Some(5));
}

#[test]
fn fetch_failure_keeps_markers_and_selection() {
    let mut engine = engine();
    engine.apply_snapshot(1, snapshot(vec![truck("T1"), truck("T2")]));
    engine.select("T2");

    assert!(engine.apply_fetch_failure(2, &FetchError::Network("timed out".into())));

    assert_eq!(engine.list(), &ListView::Failed(LOAD_FAILED_TEXT.to_string()));
    assert_eq!(engine.layer().truck_ids(), ids(&["T1", "T2"]));
    assert_eq!(engine.selected(), Some("T2"));
    assert_eq!(engine.stats().total, 2);

    engine.set_filter("T1");
    assert_eq!(row_ids(&engine), vec!["T1"]);
}

#[test]
fn empty_snapshot_shows_placeholder() {
    let mut engine = engine();
    assert_eq!(engine.list(), &ListView::Loading);
    engine.apply_snapshot(1, snapshot(Vec::new()));
    assert_eq!(engine.list(), &ListView::Empty);
    assert_eq!(engine.list().message(), Some(NO_MATCHES_TEXT));
}
