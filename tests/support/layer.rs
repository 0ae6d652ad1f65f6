use std::collections::{BTreeMap, BTreeSet};

use fleetdeck::fleet::{IconCategory, LatLon, MarkerKey, MarkerLayer, PopupContent};

#[derive(Clone, Debug, PartialEq)]
pub enum LayerOp {
    Add(MarkerKey),
    SetPosition(usize),
    SetIcon(usize),
    SetPopup(usize),
    Remove(usize),
}

#[derive(Clone, Debug)]
pub struct RecordedMarker {
    pub key: MarkerKey,
    pub position: LatLon,
    pub icon: IconCategory,
    pub popup: Option<PopupContent>,
}

/// `MarkerLayer` that keeps every call for later inspection.
#[derive(Debug, Default)]
pub struct RecordingLayer {
    next: usize,
    pub live: BTreeMap<usize, RecordedMarker>,
    pub ops: Vec<LayerOp>,
}

impl RecordingLayer {
    pub fn truck_ids(&self) -> BTreeSet<String> {
        self.live
            .values()
            .filter_map(|marker| match &marker.key {
                MarkerKey::Truck(id) => Some(id.clone()),
                MarkerKey::Facility(_) => None,
            })
            .collect()
    }

    pub fn truck(&self, truck_id: &str) -> Option<&RecordedMarker> {
        self.live
            .values()
            .find(|marker| marker.key == MarkerKey::Truck(truck_id.to_string()))
    }

    pub fn count(&self, matches: impl Fn(&LayerOp) -> bool) -> usize {
        self.ops.iter().filter(|op| matches(op)).count()
    }
}

impl MarkerLayer for RecordingLayer {
    type Handle = usize;

    fn add(&mut self, key: &MarkerKey, position: LatLon, icon: IconCategory) -> usize {
        self.next += 1;
        self.ops.push(LayerOp::Add(key.clone()));
        self.live.insert(
            self.next,
            RecordedMarker {
                key: key.clone(),
                position,
                icon,
                popup: None,
            },
        );
        self.next
    }

    fn set_position(&mut self, handle: usize, position: LatLon) {
        self.ops.push(LayerOp::SetPosition(handle));
        if let Some(marker) = self.live.get_mut(&handle) {
            marker.position = position;
        }
    }

    fn set_icon(&mut self, handle: usize, icon: IconCategory) {
        self.ops.push(LayerOp::SetIcon(handle));
        if let Some(marker) = self.live.get_mut(&handle) {
            marker.icon = icon;
        }
    }

    fn set_popup(&mut self, handle: usize, popup: PopupContent) {
        self.ops.push(LayerOp::SetPopup(handle));
        if let Some(marker) = self.live.get_mut(&handle) {
            marker.popup = Some(popup);
        }
    }

    fn remove(&mut self, handle: usize) {
        self.ops.push(LayerOp::Remove(handle));
        self.live.remove(&handle);
    }
}
