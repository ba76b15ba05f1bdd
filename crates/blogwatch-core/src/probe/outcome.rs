//! Normalized probe outcome and the status-code mapping that produces it.

use std::fmt;

pub const STATUS_OK: u32 = 200;
pub const STATUS_NOT_FOUND: u32 = 404;
pub const STATUS_TOO_MANY_REQUESTS: u32 = 429;

/// Codes meaning "the server refused a bot", not "the page is gone".
/// 999 is LinkedIn's anti-automation sentinel.
pub const TRANSIENT_BLOCK_STATUSES: &[u32] = &[403, STATUS_TOO_MANY_REQUESTS, 999];

/// What a single probe learned about a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success(u32),
    ClientError(u32),
    TransientBlocked(u32),
    /// No HTTP response was obtained from any attempt.
    NetworkFailure,
}

impl ProbeOutcome {
    /// Maps the final response status (None if nothing came back).
    pub fn from_response(status: Option<u32>) -> Self {
        match status {
            None => ProbeOutcome::NetworkFailure,
            Some(STATUS_OK) => ProbeOutcome::Success(STATUS_OK),
            Some(STATUS_NOT_FOUND) => ProbeOutcome::ClientError(STATUS_NOT_FOUND),
            Some(code) if TRANSIENT_BLOCK_STATUSES.contains(&code) => {
                ProbeOutcome::TransientBlocked(code)
            }
            Some(code) => ProbeOutcome::ClientError(code),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Success(c) => write!(f, "OK ({c})"),
            ProbeOutcome::ClientError(c) => write!(f, "HTTP {c}"),
            ProbeOutcome::TransientBlocked(c) => write!(f, "blocked ({c})"),
            ProbeOutcome::NetworkFailure => write!(f, "network failure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisive_codes() {
        assert_eq!(ProbeOutcome::from_response(Some(200)), ProbeOutcome::Success(200));
        assert_eq!(
            ProbeOutcome::from_response(Some(404)),
            ProbeOutcome::ClientError(404)
        );
        assert_eq!(ProbeOutcome::from_response(None), ProbeOutcome::NetworkFailure);
    }

    #[test]
    fn bot_defense_codes_are_transient() {
        for code in [403, 429, 999] {
            assert_eq!(
                ProbeOutcome::from_response(Some(code)),
                ProbeOutcome::TransientBlocked(code)
            );
        }
    }

    #[test]
    fn everything_else_is_a_client_error() {
        for code in [201, 204, 301, 405, 410, 500, 503] {
            assert_eq!(
                ProbeOutcome::from_response(Some(code)),
                ProbeOutcome::ClientError(code)
            );
        }
    }
}
