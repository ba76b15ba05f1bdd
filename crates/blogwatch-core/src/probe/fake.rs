//! Scripted transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use super::transport::{FailureKind, Method, Transport, TransportError};

/// Replays per-URL scripted results in order and records every request.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    scripts: HashMap<String, VecDeque<Result<u32, TransportError>>>,
    pub(crate) sent: Vec<(Method, String, Duration)>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script(mut self, url: &str, results: Vec<Result<u32, TransportError>>) -> Self {
        self.scripts.insert(url.to_string(), results.into());
        self
    }

    pub(crate) fn timeout() -> Result<u32, TransportError> {
        Err(TransportError::new(FailureKind::Timeout, "timed out"))
    }

    pub(crate) fn refused() -> Result<u32, TransportError> {
        Err(TransportError::new(FailureKind::Connection, "connection refused"))
    }

    pub(crate) fn methods(&self) -> Vec<Method> {
        self.sent.iter().map(|(m, _, _)| *m).collect()
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, method: Method, url: &str, timeout: Duration) -> Result<u32, TransportError> {
        self.sent.push((method, url.to_string(), timeout));
        self.scripts
            .get_mut(url)
            .and_then(|q| q.pop_front())
            .unwrap_or_else(|| Err(TransportError::new(FailureKind::Other, "unscripted request")))
    }
}
