//! Access to the fleet tracking backend.

mod http;

pub use http::{ApiUrlError, HttpFleetApi};

use crate::fleet::model::{FacilityKind, FacilityLocation, IncomingShipment, Warehouse};
use crate::fleet::snapshot::Snapshot;

/// Why a fetch produced no usable data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}")]
    BadStatus { status: u16 },
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Only transport failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Read-only backend operations, shared between worker threads.
pub trait FleetApi: Send + Sync {
    fn fetch_snapshot(&self) -> Result<Snapshot, FetchError>;
    fn fetch_facility(&self, kind: FacilityKind) -> Result<FacilityLocation, FetchError>;
    fn fetch_warehouses(&self) -> Result<Vec<Warehouse>, FetchError>;
    fn fetch_incoming_shipments(
        &self,
        warehouse_id: &str,
    ) -> Result<Vec<IncomingShipment>, FetchError>;
}
