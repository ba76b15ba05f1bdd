//! The HTTP seam used by the probe ladder.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Request method issued by the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Head,
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Head => write!(f, "HEAD"),
            Method::Get => write!(f, "GET"),
        }
    }
}

/// Coarse classification of a failed request, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connect or transfer exceeded the request timeout.
    Timeout,
    /// DNS, refused/reset connection, or empty reply.
    Connection,
    /// TLS handshake or certificate problem.
    Tls,
    /// The request could not be built (malformed URL, bad header, unsupported scheme).
    Setup,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connection => "connection",
            FailureKind::Tls => "tls",
            FailureKind::Setup => "setup",
            FailureKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// A request that produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failure: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Sends one request and returns the final HTTP status (after redirects).
///
/// Implementations own their header profile and connection reuse.
pub trait Transport {
    fn send(&mut self, method: Method, url: &str, timeout: Duration) -> Result<u32, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, method: Method, url: &str, timeout: Duration) -> Result<u32, TransportError> {
        (**self).send(method, url, timeout)
    }
}
