//! Keeps one map marker per visible truck in step with the latest snapshot.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use time::UtcOffset;

use super::classify::{IconCategory, classify};
use super::model::{FacilityKind, FacilityLocation, LatLon};
use super::popup::PopupContent;
use super::snapshot::Snapshot;

/// Identity of a marker as seen by the layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKey {
    Truck(String),
    Facility(FacilityKind),
}

/// Map primitive the reconciler drives.
///
/// Handles are opaque to the reconciler; it never inspects them beyond
/// passing them back to the layer that issued them.
pub trait MarkerLayer {
    type Handle: Copy + Eq + fmt::Debug;

    fn add(&mut self, key: &MarkerKey, position: LatLon, icon: IconCategory) -> Self::Handle;
    fn set_position(&mut self, handle: Self::Handle, position: LatLon);
    fn set_icon(&mut self, handle: Self::Handle, icon: IconCategory);
    fn set_popup(&mut self, handle: Self::Handle, popup: PopupContent);
    fn remove(&mut self, handle: Self::Handle);
}

/// Ids touched by one reconciliation pass, each list sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
    pub skipped: Vec<String>,
}

impl ReconcileReport {
    fn sort(&mut self) {
        self.created.sort();
        self.updated.sort();
        self.removed.sort();
        self.skipped.sort();
    }
}

pub struct MarkerReconciler<L: MarkerLayer> {
    layer: L,
    trucks: HashMap<String, L::Handle>,
    facilities: BTreeMap<FacilityKind, L::Handle>,
}

impl<L: MarkerLayer> MarkerReconciler<L> {
    pub fn new(layer: L) -> Self {
        Self {
            layer,
            trucks: HashMap::new(),
            facilities: BTreeMap::new(),
        }
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    /// Truck ids that currently own a marker, sorted.
    pub fn live_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.trucks.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn has_marker(&self, truck_id: &str) -> bool {
        self.trucks.contains_key(truck_id)
    }

    pub fn has_facility(&self, kind: FacilityKind) -> bool {
        self.facilities.contains_key(&kind)
    }

    /// Bring the truck markers in line with `snapshot`.
    ///
    /// Afterwards the marker set equals the ids in `snapshot` that carry
    /// valid coordinates.
    pub fn reconcile(&mut self, snapshot: &Snapshot, offset: UtcOffset) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let mut placed: HashSet<&str> = HashSet::with_capacity(snapshot.len());
        let mut seen: HashSet<&str> = HashSet::with_capacity(snapshot.len());
        for record in snapshot.records() {
            if !seen.insert(record.truck_id.as_str()) {
                tracing::warn!("Duplicate truck id {} in snapshot; keeping first", record.truck_id);
                report.skipped.push(record.truck_id.clone());
                continue;
            }
            let Some(position) = record.position() else {
                tracing::warn!(
                    "Truck {} has no valid coordinates (lat {:?}, lon {:?})",
                    record.truck_id,
                    record.latitude,
                    record.longitude
                );
                report.skipped.push(record.truck_id.clone());
                continue;
            };
            let icon = classify(record).icon;
            let popup = PopupContent::for_truck(record, offset);
            match self.trucks.get(&record.truck_id) {
                Some(&handle) => {
                    self.layer.set_position(handle, position);
                    self.layer.set_icon(handle, icon);
                    self.layer.set_popup(handle, popup);
                    report.updated.push(record.truck_id.clone());
                }
                None => {
                    let key = MarkerKey::Truck(record.truck_id.clone());
                    let handle = self.layer.add(&key, position, icon);
                    self.layer.set_popup(handle, popup);
                    self.trucks.insert(record.truck_id.clone(), handle);
                    report.created.push(record.truck_id.clone());
                }
            }
            placed.insert(record.truck_id.as_str());
        }

        let layer = &mut self.layer;
        self.trucks.retain(|truck_id, handle| {
            if placed.contains(truck_id.as_str()) {
                return true;
            }
            layer.remove(*handle);
            report.removed.push(truck_id.clone());
            false
        });
        report.sort();
        report
    }

    /// Place or move the marker of a static facility.
    pub fn place_facility(&mut self, kind: FacilityKind, location: &FacilityLocation) {
        let position = location.position();
        let popup = PopupContent::for_facility(location);
        match self.facilities.get(&kind) {
            Some(&handle) => {
                self.layer.set_position(handle, position);
                self.layer.set_popup(handle, popup);
            }
            None => {
                let handle =
                    self.layer
                        .add(&MarkerKey::Facility(kind), position, IconCategory::facility(kind));
                self.layer.set_popup(handle, popup);
                self.facilities.insert(kind, handle);
            }
        }
        tracing::info!(
            "Placed {} marker '{}' at ({:.4}, {:.4})",
            kind.label(),
            location.name,
            location.latitude,
            location.longitude
        );
    }
}
