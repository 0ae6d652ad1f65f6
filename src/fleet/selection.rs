use time::UtcOffset;

use super::detail::{DetailView, TruckDetail};
use super::model::LatLon;
use super::snapshot::Snapshot;

/// Result of a user selecting a truck.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionEffect {
    pub truck_id: String,
    /// Where to recenter the map, when the truck has a valid position.
    pub recenter: Option<LatLon>,
    pub detail: DetailView,
}

/// Remembers which truck the detail panel follows.
#[derive(Clone, Debug, Default)]
pub struct SelectionTracker {
    selected: Option<String>,
}

impl SelectionTracker {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select `truck_id` if it is part of `snapshot`.
    pub fn select(
        &mut self,
        snapshot: &Snapshot,
        truck_id: &str,
        offset: UtcOffset,
    ) -> Option<SelectionEffect> {
        let Some(record) = snapshot.get(truck_id) else {
            tracing::warn!("Ignoring selection of unknown truck {truck_id}");
            return None;
        };
        self.selected = Some(record.truck_id.clone());
        Some(SelectionEffect {
            truck_id: record.truck_id.clone(),
            recenter: record.position(),
            detail: DetailView::Truck(Box::new(TruckDetail::from_record(record, offset))),
        })
    }

    /// Refresh the detail for a new snapshot, clearing the selection when the
    /// truck is gone.
    pub fn reconcile(&mut self, snapshot: &Snapshot, offset: UtcOffset) -> DetailView {
        let Some(selected) = self.selected.as_deref() else {
            return DetailView::Placeholder;
        };
        match snapshot.get(selected) {
            Some(record) => DetailView::Truck(Box::new(TruckDetail::from_record(record, offset))),
            None => {
                tracing::info!("Selected truck {selected} left the snapshot");
                self.selected = None;
                DetailView::Placeholder
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(values: serde_json::Value) -> Snapshot {
        Snapshot::new(serde_json::from_value(values).unwrap())
    }

    #[test]
    fn select_yields_recenter_and_detail() {
        let mut tracker = SelectionTracker::default();
        let snap = snapshot(json!([{ "truck_id": "A", "latitude": 1.5, "longitude": 2.5 }]));
        let effect = tracker.select(&snap, "A", UtcOffset::UTC).unwrap();
        assert_eq!(effect.recenter, Some(LatLon::new(1.5, 2.5)));
        assert_eq!(effect.detail.truck_id(), Some("A"));
        assert_eq!(tracker.selected(), Some("A"));
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut tracker = SelectionTracker::default();
        let snap = snapshot(json!([{ "truck_id": "A" }]));
        tracker.select(&snap, "A", UtcOffset::UTC);
        assert!(tracker.select(&snap, "Z", UtcOffset::UTC).is_none());
        assert_eq!(tracker.selected(), Some("A"));
    }

    #[test]
    fn disappearance_clears_selection() {
        let mut tracker = SelectionTracker::default();
        tracker.select(&snapshot(json!([{ "truck_id": "A" }])), "A", UtcOffset::UTC);
        let detail = tracker.reconcile(&snapshot(json!([{ "truck_id": "B" }])), UtcOffset::UTC);
        assert_eq!(detail, DetailView::Placeholder);
        assert_eq!(tracker.selected(), None);
    }

    #[test]
    fn invalid_coordinates_select_without_recenter() {
        let mut tracker = SelectionTracker::default();
        let snap = snapshot(json!([{ "truck_id": "A", "latitude": "bad", "longitude": 2.0 }]));
        let effect = tracker.select(&snap, "A", UtcOffset::UTC).unwrap();
        assert_eq!(effect.recenter, None);
    }
}
