//! libcurl-backed [`Transport`].
//!
//! One `Easy` handle is reused for every request in a run; `reset()` clears
//! options between requests but keeps the connection, DNS and TLS session caches.

use std::time::Duration;

use super::transport::{FailureKind, Method, Transport, TransportError};
use crate::config::ProbeConfig;

const MAX_REDIRECTS: u32 = 10;

pub struct CurlTransport {
    easy: curl::easy::Easy,
    user_agent: String,
    headers: Vec<String>,
}

impl CurlTransport {
    pub fn new(cfg: &ProbeConfig) -> Self {
        Self {
            easy: curl::easy::Easy::new(),
            user_agent: cfg.user_agent.clone(),
            headers: cfg.extra_headers.clone(),
        }
    }

    fn configure(&mut self, method: Method, url: &str, timeout: Duration) -> Result<(), curl::Error> {
        self.easy.reset();
        self.easy.url(url)?;
        match method {
            Method::Head => self.easy.nobody(true)?,
            Method::Get => self.easy.get(true)?,
        }
        self.easy.follow_location(true)?;
        self.easy.max_redirections(MAX_REDIRECTS)?;
        self.easy.timeout(timeout)?;
        self.easy.useragent(&self.user_agent)?;
        // Let curl advertise and decode whatever encodings it was built with.
        self.easy.accept_encoding("")?;

        let mut list = curl::easy::List::new();
        for h in &self.headers {
            list.append(h)?;
        }
        self.easy.http_headers(list)?;
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn send(&mut self, method: Method, url: &str, timeout: Duration) -> Result<u32, TransportError> {
        self.configure(method, url, timeout)
            .map_err(|e| TransportError::new(FailureKind::Setup, e.to_string()))?;

        {
            let mut transfer = self.easy.transfer();
            // Body content is irrelevant; discard it.
            transfer
                .write_function(|data| Ok(data.len()))
                .map_err(|e| TransportError::new(FailureKind::Setup, e.to_string()))?;
            transfer.perform().map_err(|e| from_curl(&e))?;
        }

        let code = self.easy.response_code().map_err(|e| from_curl(&e))?;
        if code == 0 {
            return Err(TransportError::new(FailureKind::Other, "no HTTP status received"));
        }
        Ok(code)
    }
}

fn from_curl(e: &curl::Error) -> TransportError {
    TransportError::new(classify_curl_error(e), e.to_string())
}

/// Classify a curl error for logging.
pub(crate) fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FailureKind::Connection;
    }
    if e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_ssl_certproblem()
        || e.is_ssl_cacert()
    {
        return FailureKind::Tls;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return FailureKind::Setup;
    }
    FailureKind::Other
}
