use serde::de::DeserializeOwned;
use url::Url;

use super::{FetchError, FleetApi};
use crate::config::{ApiSettings, SnapshotEndpoint};
use crate::fleet::model::{FacilityKind, FacilityLocation, IncomingShipment, Warehouse};
use crate::fleet::snapshot::Snapshot;
use crate::http_client::{self, BodyError, HttpTimeouts};

#[derive(Debug, thiserror::Error)]
pub enum ApiUrlError {
    #[error("Invalid API base URL {url}: {source}")]
    Parse {
        url: String,
        source: url::ParseError,
    },
    #[error("API base URL {0} cannot carry a path")]
    NotABase(String),
}

/// `FleetApi` over plain HTTP GETs with JSON bodies.
pub struct HttpFleetApi {
    base: Url,
    snapshot_endpoint: SnapshotEndpoint,
    agent: ureq::Agent,
    max_response_bytes: usize,
}

impl HttpFleetApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiUrlError> {
        let base = Url::parse(settings.base_url.trim()).map_err(|source| ApiUrlError::Parse {
            url: settings.base_url.clone(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiUrlError::NotABase(settings.base_url.clone()));
        }
        let agent = http_client::build_agent(HttpTimeouts {
            connect: settings.connect_timeout(),
            read: settings.read_timeout(),
        });
        Ok(Self {
            base,
            snapshot_endpoint: settings.snapshot_endpoint,
            agent,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let request = self.agent.get(url.as_str()).set("Accept", "application/json");
        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::BadStatus { status });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(FetchError::Network(err.to_string()));
            }
        };
        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(FetchError::BadStatus { status });
        }
        http_client::read_body_limited(response, self.max_response_bytes).map_err(|err| match err {
            BodyError::TooLarge { .. } => FetchError::Malformed(err.to_string()),
            BodyError::Io(_) => FetchError::Network(err.to_string()),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let bytes = self.get_bytes(url)?;
        serde_json::from_slice(&bytes).map_err(|err| FetchError::Malformed(err.to_string()))
    }
}

impl FleetApi for HttpFleetApi {
    fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let url = self.endpoint(&[self.snapshot_endpoint.path()]);
        let bytes = self.get_bytes(&url)?;
        let snapshot = Snapshot::from_json_slice(&bytes)
            .map_err(|err| FetchError::Malformed(err.to_string()))?;
        if snapshot.dropped() > 0 {
            tracing::warn!("Snapshot dropped {} unkeyed records", snapshot.dropped());
        }
        Ok(snapshot)
    }

    fn fetch_facility(&self, kind: FacilityKind) -> Result<FacilityLocation, FetchError> {
        self.get_json(&self.endpoint(&[kind.endpoint()]))
    }

    fn fetch_warehouses(&self) -> Result<Vec<Warehouse>, FetchError> {
        self.get_json(&self.endpoint(&["warehouses"]))
    }

    fn fetch_incoming_shipments(
        &self,
        warehouse_id: &str,
    ) -> Result<Vec<IncomingShipment>, FetchError> {
        self.get_json(&self.endpoint(&["warehouses", warehouse_id, "incoming_shipments"]))
    }
}
