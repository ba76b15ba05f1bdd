//! Reachability probing.
//!
//! A probe runs the method-fallback ladder against one URL and reduces the
//! final response to a [`ProbeOutcome`]. Transport failures never escape: they
//! become "no response" and, if nothing else answered, `NetworkFailure`.

mod curl_transport;
#[cfg(test)]
pub(crate) mod fake;
mod ladder;
mod outcome;
mod transport;

pub use curl_transport::CurlTransport;
pub use outcome::{
    ProbeOutcome, STATUS_NOT_FOUND, STATUS_OK, STATUS_TOO_MANY_REQUESTS,
    TRANSIENT_BLOCK_STATUSES,
};
pub use transport::{FailureKind, Method, Transport, TransportError};

use std::time::Duration;

use crate::config::ProbeConfig;
use ladder::Stage;

/// Anything that can produce an outcome for a URL. The batch runner is generic
/// over this; an `Err` is isolated to the entry being checked.
pub trait Probe {
    fn probe(&mut self, url: &str) -> anyhow::Result<ProbeOutcome>;
}

impl<P: Probe + ?Sized> Probe for &mut P {
    fn probe(&mut self, url: &str) -> anyhow::Result<ProbeOutcome> {
        (**self).probe(url)
    }
}

/// Ladder-driven prober over a [`Transport`].
pub struct LinkProber<T> {
    transport: T,
    head_timeout: Duration,
    get_timeout: Duration,
    throttle_backoff: Duration,
}

impl<T: Transport> LinkProber<T> {
    pub fn new(transport: T, cfg: &ProbeConfig) -> Self {
        Self {
            transport,
            head_timeout: cfg.head_timeout(),
            get_timeout: cfg.get_timeout(),
            throttle_backoff: cfg.throttle_backoff(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs HEAD, then the throttle / fallback GETs as needed (1 to 3 requests).
    pub fn run_ladder(&mut self, url: &str) -> ProbeOutcome {
        let mut stage = Stage::Head;
        while let Some(method) = stage.method() {
            if stage == Stage::ThrottledGet {
                tracing::debug!(
                    url,
                    backoff = ?self.throttle_backoff,
                    "rate limited, backing off"
                );
                std::thread::sleep(self.throttle_backoff);
            }
            let timeout = match method {
                Method::Head => self.head_timeout,
                Method::Get => self.get_timeout,
            };
            let response = match self.transport.send(method, url, timeout) {
                Ok(code) => {
                    tracing::debug!(url, %method, status = code, "response");
                    Some(code)
                }
                Err(e) => {
                    tracing::debug!(url, %method, kind = %e.kind, error = %e.message, "no response");
                    None
                }
            };
            stage = stage.advance(response);
        }

        match stage {
            Stage::Done(response) => ProbeOutcome::from_response(response),
            _ => ProbeOutcome::NetworkFailure,
        }
    }
}

impl<T: Transport> Probe for LinkProber<T> {
    fn probe(&mut self, url: &str) -> anyhow::Result<ProbeOutcome> {
        Ok(self.run_ladder(url))
    }
}

/// Prober over a fresh libcurl handle configured from `cfg`.
pub fn curl_prober(cfg: &ProbeConfig) -> LinkProber<CurlTransport> {
    LinkProber::new(CurlTransport::new(cfg), cfg)
}
