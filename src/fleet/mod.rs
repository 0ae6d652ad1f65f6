//! Fleet domain: snapshot records and everything derived from them.

pub mod classify;
pub mod detail;
pub mod engine;
pub mod list;
pub mod model;
pub mod popup;
pub mod reconcile;
pub mod selection;
pub mod snapshot;
pub mod stats;
pub mod timefmt;
pub mod warehouse;

pub use classify::{Classification, IconCategory, StatusClass, classify};
pub use detail::{DetailView, TruckDetail};
pub use engine::{CycleOutcome, DashboardEngine};
pub use list::{FilterState, ListRow, ListView};
pub use model::{
    BusinessUnit, Direction, FacilityKind, FacilityLocation, IncomingShipment, LatLon,
    TruckSnapshotRecord, Warehouse,
};
pub use popup::{PopupAction, PopupContent};
pub use reconcile::{MarkerKey, MarkerLayer, MarkerReconciler, ReconcileReport};
pub use selection::SelectionEffect;
pub use snapshot::Snapshot;
pub use stats::FleetStats;
pub use warehouse::WarehouseBoard;
