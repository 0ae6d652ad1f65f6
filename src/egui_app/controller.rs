//! Owns the dashboard engine and bridges worker results to the egui UI.

mod jobs;

use std::sync::Arc;
use std::sync::mpsc::TryRecvError;

use time::UtcOffset;

pub(crate) use jobs::JobMessage;
use jobs::ControllerJobs;

use crate::api::{FetchError, FleetApi};
use crate::config::AppSettings;
use crate::egui_app::map_layer::{CanvasLayer, MarkerId};
use crate::egui_app::state::{StatusBarState, UiState};
use crate::egui_app::ui::style::StatusTone;
use crate::fleet::timefmt;
use crate::fleet::warehouse::{IncomingView, WarehouseBoard};
use crate::fleet::{
    CycleOutcome, DashboardEngine, DetailView, FacilityKind, FacilityLocation, FleetStats,
    ListView,
};
use crate::poller::{Poller, SnapshotFetched};

/// Maintains app state and bridges the fleet engine to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    engine: DashboardEngine<CanvasLayer>,
    warehouses: WarehouseBoard,
    settings: AppSettings,
    api: Arc<dyn FleetApi>,
    jobs: ControllerJobs,
    poller: Option<Poller>,
    display_offset: UtcOffset,
}

impl EguiController {
    pub fn new(settings: AppSettings, api: Arc<dyn FleetApi>) -> Self {
        Self::with_display_offset(settings, api, timefmt::local_offset())
    }

    pub fn with_display_offset(
        settings: AppSettings,
        api: Arc<dyn FleetApi>,
        display_offset: UtcOffset,
    ) -> Self {
        Self {
            ui: UiState::new(&settings.map),
            engine: DashboardEngine::new(CanvasLayer::default(), display_offset),
            warehouses: WarehouseBoard::default(),
            settings,
            api,
            jobs: ControllerJobs::new(),
            poller: None,
            display_offset,
        }
    }

    /// Start polling and the one-shot startup fetches.
    pub fn start(&mut self) {
        if self.poller.is_none() {
            match Poller::spawn(
                Arc::clone(&self.api),
                self.settings.polling.interval(),
                self.jobs.message_sender(),
            ) {
                Ok(poller) => self.poller = Some(poller),
                Err(err) => {
                    tracing::error!("Failed to start poller: {err}");
                    self.set_status(format!("Polling unavailable: {err}"), StatusTone::Error);
                    return;
                }
            }
        }
        for kind in FacilityKind::ALL {
            self.jobs.begin_facility_fetch(Arc::clone(&self.api), kind);
        }
        self.load_warehouses();
        self.set_status("Loading trucks...", StatusTone::Busy);
    }

    fn load_warehouses(&mut self) {
        if !self.jobs.begin_warehouses_fetch(Arc::clone(&self.api)) {
            self.warehouses.set_warehouses_failed();
        }
    }

    /// Apply every result that arrived since the last frame.
    pub fn tick(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.jobs.try_recv_message() {
                Ok(message) => {
                    self.handle_message(message);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    pub(crate) fn handle_message(&mut self, message: JobMessage) {
        match message {
            JobMessage::Snapshot(fetched) => self.handle_snapshot(fetched),
            JobMessage::Facility { kind, result } => self.handle_facility(kind, result),
            JobMessage::Warehouses(result) => {
                self.jobs.clear_warehouses_fetch();
                match result {
                    Ok(warehouses) => {
                        tracing::info!("Loaded {} warehouses", warehouses.len());
                        self.warehouses.set_warehouses(warehouses);
                    }
                    Err(err) => {
                        tracing::warn!("Failed to load warehouses: {err}");
                        self.warehouses.set_warehouses_failed();
                    }
                }
            }
            JobMessage::IncomingShipments { seq, result } => {
                self.warehouses.apply_incoming(seq, result);
            }
        }
    }

    fn handle_snapshot(&mut self, fetched: SnapshotFetched) {
        let SnapshotFetched { seq, result } = fetched;
        match result {
            Ok(snapshot) => {
                let count = snapshot.len();
                let fetched_at = snapshot.fetched_at();
                if let CycleOutcome::Applied(_) = self.engine.apply_snapshot(seq, snapshot) {
                    self.drop_orphaned_popup();
                    self.set_status(
                        format!(
                            "Tracking {count} trucks, updated {}",
                            timefmt::clock(Some(fetched_at), self.display_offset)
                        ),
                        StatusTone::Info,
                    );
                }
            }
            Err(err) => {
                if self.engine.apply_fetch_failure(seq, &err) {
                    self.set_status(format!("Truck update failed: {err}"), StatusTone::Warning);
                }
            }
        }
    }

    fn handle_facility(&mut self, kind: FacilityKind, result: Result<FacilityLocation, FetchError>) {
        match result {
            Ok(location) => {
                self.engine.place_facility(kind, &location);
                if kind == FacilityKind::Warehouse && !self.ui.map.user_moved {
                    self.ui.map.center = location.position();
                }
            }
            Err(err) => {
                tracing::warn!("Failed to load {} location: {err}", kind.label());
                self.set_status(
                    format!("{} location unavailable: {err}", kind.label()),
                    StatusTone::Warning,
                );
            }
        }
    }

    /// Select a truck from the list or a popup and move the map onto it.
    pub fn select_truck(&mut self, truck_id: &str) {
        let Some(effect) = self.engine.select(truck_id) else {
            return;
        };
        if let Some(center) = effect.recenter {
            self.ui.map.center = center;
            self.ui.map.zoom = self.settings.map.selection_zoom;
            self.ui.map.user_moved = true;
        }
    }

    /// A marker click only opens its popup; selection goes through the popup action.
    pub fn click_marker(&mut self, id: MarkerId) {
        if self.engine.layer().get(id).is_some() {
            self.ui.map.open_popup = Some(id);
        }
    }

    pub fn close_popup(&mut self) {
        self.ui.map.open_popup = None;
    }

    /// Push the search box text to the list.
    pub fn apply_filter_input(&mut self) {
        if self.ui.filter_input != self.engine.filter().raw() {
            let term = self.ui.filter_input.clone();
            self.engine.set_filter(&term);
        }
    }

    pub fn select_warehouse(&mut self, warehouse_id: Option<String>) {
        match warehouse_id {
            Some(id) => {
                let failed = matches!(self.warehouses.incoming(), IncomingView::Failed);
                if self.warehouses.selected() == Some(id.as_str()) && !failed {
                    return;
                }
                let seq = self.warehouses.begin_request(&id);
                if !self.jobs.begin_incoming_fetch(Arc::clone(&self.api), id, seq) {
                    let err = FetchError::Network("no worker thread available".into());
                    self.warehouses.apply_incoming(seq, Err(err));
                }
            }
            None => self.warehouses.clear_selection(),
        }
    }

    pub fn refresh_now(&mut self) {
        if let Some(poller) = &self.poller {
            poller.refresh_now();
            self.set_status("Refreshing...", StatusTone::Busy);
        }
    }

    /// Stop polling; results still in flight are discarded.
    pub fn shutdown(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
    }

    pub fn layer(&self) -> &CanvasLayer {
        self.engine.layer()
    }

    pub fn list(&self) -> &ListView {
        self.engine.list()
    }

    pub fn stats(&self) -> FleetStats {
        self.engine.stats()
    }

    pub fn detail(&self) -> &DetailView {
        self.engine.detail()
    }

    pub fn selected_truck(&self) -> Option<&str> {
        self.engine.selected()
    }

    pub fn warehouses(&self) -> &WarehouseBoard {
        &self.warehouses
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::with_tone(text, tone);
    }

    fn drop_orphaned_popup(&mut self) {
        let layer = self.engine.layer();
        if self.ui.map.open_popup.is_some_and(|id| layer.get(id).is_none()) {
            self.ui.map.open_popup = None;
        }
    }
}

impl Drop for EguiController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
