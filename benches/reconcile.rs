use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fleetdeck::fleet::{
    DashboardEngine, IconCategory, LatLon, MarkerKey, MarkerLayer, PopupContent, Snapshot,
};
use serde_json::{Value, json};
use time::UtcOffset;

const TRUCK_COUNT: usize = 1_000;

/// Layer that only hands out handles, so the bench measures the engine.
#[derive(Default)]
struct CountingLayer {
    next: u32,
}

impl MarkerLayer for CountingLayer {
    type Handle = u32;

    fn add(&mut self, _key: &MarkerKey, _position: LatLon, _icon: IconCategory) -> u32 {
        self.next += 1;
        self.next
    }

    fn set_position(&mut self, _handle: u32, _position: LatLon) {}

    fn set_icon(&mut self, _handle: u32, _icon: IconCategory) {}

    fn set_popup(&mut self, _handle: u32, _popup: PopupContent) {}

    fn remove(&mut self, _handle: u32) {}
}

fn fleet(count: usize, offset: f64) -> Arc<Snapshot> {
    let records: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "truck_id": format!("TRK-{i:04}"),
                "business_unit": if i % 2 == 0 { "Sermsuk" } else { "TBL" },
                "direction": if i % 3 == 0 { "inbound" } else { "outbound" },
                "status": "en_route",
                "is_delayed": i % 7 == 0,
                "latitude": 13.0 + (i as f64) * 0.001 + offset,
                "longitude": 100.0 + (i as f64) * 0.001,
                "speed_kmh": 40 + i % 50,
                "shipments": [{"sku": format!("SKU-{}", i % 40), "quantity": 10}],
            })
        })
        .collect();
    let body = Value::Array(records).to_string();
    Arc::new(Snapshot::from_json_slice(body.as_bytes()).unwrap_or_else(|_| Snapshot::empty()))
}

fn bench_reconcile(c: &mut Criterion) {
    let first = fleet(TRUCK_COUNT, 0.0);
    let moved = fleet(TRUCK_COUNT, 0.01);
    c.bench_with_input(
        BenchmarkId::new("apply_snapshot", TRUCK_COUNT),
        &(first, moved),
        |b, (first, moved)| {
            let mut engine = DashboardEngine::new(CountingLayer::default(), UtcOffset::UTC);
            engine.apply_snapshot(1, first.clone());
            let mut seq = 1;
            b.iter(|| {
                seq += 1;
                let data = if seq % 2 == 0 { moved } else { first };
                black_box(engine.apply_snapshot(seq, data.clone()));
            });
        },
    );
}

fn bench_filter(c: &mut Criterion) {
    let mut engine = DashboardEngine::new(CountingLayer::default(), UtcOffset::UTC);
    engine.apply_snapshot(1, fleet(TRUCK_COUNT, 0.0));
    c.bench_function("filter_by_sku", |b| {
        let mut toggle = false;
        b.iter(|| {
            toggle = !toggle;
            engine.set_filter(if toggle { "sku-1" } else { "" });
            black_box(engine.list().rows().len());
        });
    });
}

criterion_group!(benches, bench_reconcile, bench_filter);
criterion_main!(benches);
