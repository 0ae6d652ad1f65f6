//! Single owner of all dashboard state, fed by poll results on the UI thread.

use std::sync::Arc;

use time::UtcOffset;

use super::detail::DetailView;
use super::list::{FilterState, LOAD_FAILED_TEXT, ListView, build_list_view};
use super::model::{FacilityKind, FacilityLocation};
use super::reconcile::{MarkerLayer, MarkerReconciler, ReconcileReport};
use super::selection::{SelectionEffect, SelectionTracker};
use super::snapshot::Snapshot;
use super::stats::FleetStats;
use crate::api::FetchError;

/// What happened to a snapshot handed to the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    Applied(ReconcileReport),
    /// A newer request was already applied.
    Stale { seq: u64, latest: u64 },
}

pub struct DashboardEngine<L: MarkerLayer> {
    markers: MarkerReconciler<L>,
    selection: SelectionTracker,
    filter: FilterState,
    snapshot: Option<Arc<Snapshot>>,
    list: ListView,
    stats: FleetStats,
    detail: DetailView,
    latest_seq: Option<u64>,
    display_offset: UtcOffset,
}

impl<L: MarkerLayer> DashboardEngine<L> {
    pub fn new(layer: L, display_offset: UtcOffset) -> Self {
        Self {
            markers: MarkerReconciler::new(layer),
            selection: SelectionTracker::default(),
            filter: FilterState::default(),
            snapshot: None,
            list: ListView::Loading,
            stats: FleetStats::default(),
            detail: DetailView::Placeholder,
            latest_seq: None,
            display_offset,
        }
    }

    /// Apply the snapshot fetched by request `seq`.
    ///
    /// Runs the full cycle: markers, stats, selection, then the list, whose
    /// active flag reads the reconciled selection.
    pub fn apply_snapshot(&mut self, seq: u64, snapshot: Arc<Snapshot>) -> CycleOutcome {
        if let Some(stale) = self.stale(seq) {
            return stale;
        }
        self.latest_seq = Some(seq);
        let report = self.markers.reconcile(&snapshot, self.display_offset);
        tracing::debug!(
            "Cycle #{seq}: {} trucks, created {}, updated {}, removed {}, skipped {}",
            snapshot.len(),
            report.created.len(),
            report.updated.len(),
            report.removed.len(),
            report.skipped.len()
        );
        self.stats = FleetStats::from_snapshot(&snapshot);
        self.detail = self.selection.reconcile(&snapshot, self.display_offset);
        self.snapshot = Some(snapshot);
        self.rebuild_list();
        CycleOutcome::Applied(report)
    }

    /// Record a failed fetch; markers, stats and selection stay as they were.
    pub fn apply_fetch_failure(&mut self, seq: u64, error: &FetchError) -> bool {
        if self.stale(seq).is_some() {
            return false;
        }
        self.latest_seq = Some(seq);
        tracing::warn!("Snapshot fetch #{seq} failed: {error}");
        self.list = ListView::Failed(LOAD_FAILED_TEXT.to_string());
        true
    }

    pub fn set_filter(&mut self, term: &str) {
        self.filter = FilterState::new(term);
        if self.snapshot.is_some() {
            self.rebuild_list();
        }
    }

    pub fn select(&mut self, truck_id: &str) -> Option<SelectionEffect> {
        let snapshot = self.snapshot.as_ref()?;
        let effect = self.selection.select(snapshot, truck_id, self.display_offset)?;
        self.detail = effect.detail.clone();
        self.rebuild_list();
        Some(effect)
    }

    pub fn place_facility(&mut self, kind: FacilityKind, location: &FacilityLocation) {
        self.markers.place_facility(kind, location);
    }

    pub fn layer(&self) -> &L {
        self.markers.layer()
    }

    pub fn markers(&self) -> &MarkerReconciler<L> {
        &self.markers
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn stats(&self) -> FleetStats {
        self.stats
    }

    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        self.snapshot.as_ref()
    }

    pub fn latest_seq(&self) -> Option<u64> {
        self.latest_seq
    }

    fn stale(&self, seq: u64) -> Option<CycleOutcome> {
        match self.latest_seq {
            Some(latest) if seq <= latest => {
                tracing::debug!("Discarding stale poll result #{seq}; latest is #{latest}");
                Some(CycleOutcome::Stale { seq, latest })
            }
            _ => None,
        }
    }

    fn rebuild_list(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            self.list = build_list_view(
                snapshot,
                &self.filter,
                self.selection.selected(),
                self.display_offset,
            );
        }
    }
}
