//! Background worker that fetches the truck snapshot on a fixed cadence.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::api::{FetchError, FleetApi};
use crate::fleet::snapshot::Snapshot;

/// Commands accepted by the poll thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollCommand {
    /// Fetch immediately; the regular cadence is unaffected.
    RefreshNow,
    Stop,
}

/// Outcome of one snapshot request, tagged with the order it was started in.
#[derive(Debug)]
pub struct SnapshotFetched {
    pub seq: u64,
    pub result: Result<Arc<Snapshot>, FetchError>,
}

/// Handle to the poll thread. Dropping it stops polling.
pub struct Poller {
    commands: Sender<PollCommand>,
    cancelled: Arc<AtomicBool>,
}

impl Poller {
    /// Start polling; the first fetch happens right away.
    pub fn spawn<M>(
        api: Arc<dyn FleetApi>,
        interval: Duration,
        results: Sender<M>,
    ) -> io::Result<Self>
    where
        M: From<SnapshotFetched> + Send + 'static,
    {
        let (commands, command_rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let worker = PollWorker {
            api,
            interval: interval.max(Duration::from_millis(1)),
            results,
            cancelled: Arc::clone(&cancelled),
            seq: 0,
        };
        thread::Builder::new()
            .name("fleetdeck-poller".into())
            .spawn(move || worker.run(command_rx))?;
        Ok(Self {
            commands,
            cancelled,
        })
    }

    pub fn refresh_now(&self) {
        if self.commands.send(PollCommand::RefreshNow).is_err() {
            tracing::debug!("Refresh requested after the poller exited");
        }
    }

    /// Stop the timer. A fetch already in flight finishes but is not delivered.
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::Release);
        let _ = self.commands.send(PollCommand::Stop);
    }

    pub fn is_stopped(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

struct PollWorker<M> {
    api: Arc<dyn FleetApi>,
    interval: Duration,
    results: Sender<M>,
    cancelled: Arc<AtomicBool>,
    seq: u64,
}

impl<M: From<SnapshotFetched>> PollWorker<M> {
    fn run(mut self, commands: Receiver<PollCommand>) {
        tracing::info!("Polling every {:?}", self.interval);
        let mut next_due = Instant::now();
        loop {
            if self.cancelled.load(Ordering::Acquire) {
                break;
            }
            let now = Instant::now();
            if now >= next_due {
                while next_due <= now {
                    next_due += self.interval;
                }
                if !self.fetch() {
                    break;
                }
                continue;
            }
            match commands.recv_timeout(next_due - now) {
                Ok(PollCommand::RefreshNow) => {
                    if !self.fetch() {
                        break;
                    }
                }
                Ok(PollCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
        tracing::info!("Poller stopped after {} requests", self.seq);
    }

    /// Returns false once results can no longer be delivered.
    fn fetch(&mut self) -> bool {
        self.seq += 1;
        let seq = self.seq;
        let result = self.api.fetch_snapshot().map(Arc::new);
        if self.cancelled.load(Ordering::Acquire) {
            tracing::debug!("Discarding poll result #{seq} after stop");
            return false;
        }
        self.results
            .send(M::from(SnapshotFetched { seq, result }))
            .is_ok()
    }
}
