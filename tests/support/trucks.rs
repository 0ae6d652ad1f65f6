use std::sync::Arc;

use fleetdeck::fleet::Snapshot;
use serde_json::{Value, json};

/// On-time Sermsuk truck heading out, with one shipment.
pub fn truck(id: &str) -> Value {
    json!({
        "truck_id": id,
        "business_unit": "Sermsuk",
        "direction": "outbound",
        "origin": "Central DC",
        "destination": "Rangsit Plant",
        "status": "en_route",
        "is_delayed": false,
        "latitude": 13.75,
        "longitude": 100.50,
        "speed_kmh": 62,
        "eta": "2024-05-01T10:30:00Z",
        "last_updated": "2024-05-01T09:00:00Z",
        "shipments": [
            {"order_id": "ORD-1", "sku": "COLA-330", "quantity": 120, "expected_arrival_time": "2024-05-01T10:30:00Z"}
        ],
    })
}

/// Copy of `base` with `key` replaced.
pub fn with(mut base: Value, key: &str, value: Value) -> Value {
    if let Value::Object(map) = &mut base {
        map.insert(key.to_string(), value);
    }
    base
}

pub fn snapshot(records: Vec<Value>) -> Arc<Snapshot> {
    let body = Value::Array(records).to_string();
    Arc::new(Snapshot::from_json_slice(body.as_bytes()).unwrap())
}
