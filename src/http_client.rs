//! Shared ureq plumbing: agent setup, size-capped body reads and retry policy.

use std::io::{self, Read};
use std::time::Duration;

/// Connect/read timeouts applied to every request of an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            read: Duration::from_secs(10),
        }
    }
}

pub(crate) fn build_agent(timeouts: HttpTimeouts) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(timeouts.connect)
        .timeout_read(timeouts.read)
        .timeout_write(timeouts.read)
        .user_agent(concat!("fleetdeck/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum BodyError {
    #[error("Response body larger than {limit} bytes")]
    TooLarge { limit: usize },
    #[error("Failed reading response body: {0}")]
    Io(#[from] io::Error),
}

/// Read a whole body, refusing anything over `limit` bytes.
///
/// A declared `Content-Length` over the limit fails before any byte is read.
pub(crate) fn read_body_limited(response: ureq::Response, limit: usize) -> Result<Vec<u8>, BodyError> {
    let declared = response
        .header("Content-Length")
        .and_then(|value| value.trim().parse::<u64>().ok());
    if declared.is_some_and(|length| length > limit as u64) {
        return Err(BodyError::TooLarge { limit });
    }
    let mut body = Vec::with_capacity(declared.map_or(0, |length| length as usize));
    response
        .into_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut body)?;
    if body.len() > limit {
        return Err(BodyError::TooLarge { limit });
    }
    Ok(body)
}

/// Bounded exponential backoff between attempts of one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Total tries, the first one included.
    pub attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Used for the one-shot fetches made at startup.
    pub(crate) const STARTUP: RetryPolicy = RetryPolicy {
        attempts: 3,
        initial_delay: Duration::from_millis(500),
        max_delay: Duration::from_secs(4),
    };

    /// Pause after failed try number `attempt` (1-based).
    fn delay_after(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(31);
        self.initial_delay
            .checked_mul(1 << doublings)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Run `request` until it succeeds, returns an error `retryable` rejects,
    /// or the attempts are used up.
    pub(crate) fn run<T, E>(
        &self,
        mut request: impl FnMut() -> Result<T, E>,
        retryable: impl Fn(&E) -> bool,
    ) -> Result<T, E>
    where
        E: std::fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match request() {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.attempts && retryable(&err) => {
                    let delay = self.delay_after(attempt);
                    tracing::debug!("Try {attempt}/{} failed: {err}; next in {delay:?}", self.attempts);
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
