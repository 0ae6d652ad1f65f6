//! Retained marker store painted by the map canvas.

use std::collections::BTreeMap;

use crate::fleet::{IconCategory, LatLon, MarkerKey, MarkerLayer, PopupContent};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasMarker {
    pub key: MarkerKey,
    pub position: LatLon,
    pub icon: IconCategory,
    pub popup: Option<PopupContent>,
}

impl CanvasMarker {
    pub fn truck_id(&self) -> Option<&str> {
        match &self.key {
            MarkerKey::Truck(id) => Some(id),
            MarkerKey::Facility(_) => None,
        }
    }
}

/// `MarkerLayer` that keeps markers in memory for immediate-mode painting.
#[derive(Debug, Default)]
pub struct CanvasLayer {
    next_id: u64,
    markers: BTreeMap<MarkerId, CanvasMarker>,
}

impl CanvasLayer {
    pub fn get(&self, id: MarkerId) -> Option<&CanvasMarker> {
        self.markers.get(&id)
    }

    /// Facilities first so trucks paint on top of them.
    pub fn paint_order(&self) -> Vec<(MarkerId, &CanvasMarker)> {
        let mut ordered: Vec<_> = self.markers.iter().map(|(id, marker)| (*id, marker)).collect();
        ordered.sort_by_key(|(id, marker)| (marker.truck_id().is_some(), *id));
        ordered
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn find_truck(&self, truck_id: &str) -> Option<MarkerId> {
        self.markers
            .iter()
            .find(|(_, marker)| marker.truck_id() == Some(truck_id))
            .map(|(id, _)| *id)
    }

    /// Marker closest to `pointer` within `radius` screen points.
    pub fn hit_test(
        &self,
        pointer: egui::Pos2,
        radius: f32,
        to_screen: impl Fn(LatLon) -> egui::Pos2,
    ) -> Option<MarkerId> {
        let limit = radius * radius;
        let mut best: Option<(MarkerId, f32)> = None;
        for (id, marker) in self.paint_order() {
            let dist_sq = to_screen(marker.position).distance_sq(pointer);
            if dist_sq > limit {
                continue;
            }
            match best {
                Some((_, best_sq)) if dist_sq > best_sq => {}
                _ => best = Some((id, dist_sq)),
            }
        }
        best.map(|(id, _)| id)
    }
}

impl MarkerLayer for CanvasLayer {
    type Handle = MarkerId;

    fn add(&mut self, key: &MarkerKey, position: LatLon, icon: IconCategory) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.markers.insert(
            id,
            CanvasMarker {
                key: key.clone(),
                position,
                icon,
                popup: None,
            },
        );
        id
    }

    fn set_position(&mut self, handle: MarkerId, position: LatLon) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.position = position;
        }
    }

    fn set_icon(&mut self, handle: MarkerId, icon: IconCategory) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.icon = icon;
        }
    }

    fn set_popup(&mut self, handle: MarkerId, popup: PopupContent) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.popup = Some(popup);
        }
    }

    fn remove(&mut self, handle: MarkerId) {
        self.markers.remove(&handle);
    }
}
