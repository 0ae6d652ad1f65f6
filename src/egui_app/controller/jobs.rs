use std::io;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use crate::api::{FetchError, FleetApi};
use crate::fleet::{FacilityKind, FacilityLocation, IncomingShipment, Warehouse};
use crate::http_client::RetryPolicy;
use crate::poller::SnapshotFetched;

/// Results delivered from worker threads to the UI thread.
#[derive(Debug)]
pub(crate) enum JobMessage {
    Snapshot(SnapshotFetched),
    Facility {
        kind: FacilityKind,
        result: Result<FacilityLocation, FetchError>,
    },
    Warehouses(Result<Vec<Warehouse>, FetchError>),
    IncomingShipments {
        seq: u64,
        result: Result<Vec<IncomingShipment>, FetchError>,
    },
}

impl From<SnapshotFetched> for JobMessage {
    fn from(fetched: SnapshotFetched) -> Self {
        Self::Snapshot(fetched)
    }
}

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Starts a named worker running `job`.
pub(super) type Spawner = fn(String, Job) -> io::Result<()>;

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    warehouses_in_progress: bool,
    spawner: Spawner,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            warehouses_in_progress: false,
            spawner: spawn_named,
        }
    }

    #[cfg(test)]
    pub(super) fn set_spawner(&mut self, spawner: Spawner) {
        self.spawner = spawner;
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn message_sender(&self) -> Sender<JobMessage> {
        self.message_tx.clone()
    }

    /// One-shot facility lookup; transport failures are retried a few times.
    pub(super) fn begin_facility_fetch(&self, api: Arc<dyn FleetApi>, kind: FacilityKind) {
        let tx = self.message_tx.clone();
        self.spawn(format!("fleetdeck-{}", kind.endpoint()), move || {
            let result =
                RetryPolicy::STARTUP.run(|| api.fetch_facility(kind), FetchError::is_retryable);
            let _ = tx.send(JobMessage::Facility { kind, result });
        });
    }

    /// Returns false when no worker could be started; a fetch already in
    /// flight counts as started.
    pub(super) fn begin_warehouses_fetch(&mut self, api: Arc<dyn FleetApi>) -> bool {
        if self.warehouses_in_progress {
            return true;
        }
        let tx = self.message_tx.clone();
        self.warehouses_in_progress = self.spawn("fleetdeck-warehouses".to_string(), move || {
            let result = RetryPolicy::STARTUP.run(|| api.fetch_warehouses(), FetchError::is_retryable);
            let _ = tx.send(JobMessage::Warehouses(result));
        });
        self.warehouses_in_progress
    }

    pub(super) fn clear_warehouses_fetch(&mut self) {
        self.warehouses_in_progress = false;
    }

    /// Returns false when no worker could be started.
    pub(super) fn begin_incoming_fetch(
        &self,
        api: Arc<dyn FleetApi>,
        warehouse_id: String,
        seq: u64,
    ) -> bool {
        let tx = self.message_tx.clone();
        self.spawn("fleetdeck-incoming".to_string(), move || {
            let result = api.fetch_incoming_shipments(&warehouse_id);
            let _ = tx.send(JobMessage::IncomingShipments { seq, result });
        })
    }

    fn spawn(&self, name: String, job: impl FnOnce() + Send + 'static) -> bool {
        match (self.spawner)(name.clone(), Box::new(job)) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!("Failed to start {name} thread: {err}");
                false
            }
        }
    }
}

fn spawn_named(name: String, job: Job) -> io::Result<()> {
    thread::Builder::new().name(name).spawn(job).map(|_| ())
}
