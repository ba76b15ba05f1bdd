//! The HEAD → throttle-GET → fallback-GET escalation as an explicit stage machine.
//!
//! Each stage names the request to send next; [`Stage::advance`] consumes the
//! result of that request (`None` = no response) and picks the next stage.

use super::outcome::STATUS_TOO_MANY_REQUESTS;
use super::transport::Method;

/// Any status at or above this triggers the fallback GET (covers 403 and 405).
const FALLBACK_FROM_STATUS: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    /// Initial HEAD.
    Head,
    /// GET after a short pause, because HEAD was rate-limited.
    ThrottledGet,
    /// GET because nothing usable came back so far; `prior` is kept if this fails too.
    FallbackGet { prior: Option<u32> },
    /// Final response, if any.
    Done(Option<u32>),
}

impl Stage {
    /// Request to issue in this stage; `None` once done.
    pub(crate) fn method(self) -> Option<Method> {
        match self {
            Stage::Head => Some(Method::Head),
            Stage::ThrottledGet | Stage::FallbackGet { .. } => Some(Method::Get),
            Stage::Done(_) => None,
        }
    }

    pub(crate) fn advance(self, response: Option<u32>) -> Stage {
        match self {
            Stage::Head => match response {
                Some(STATUS_TOO_MANY_REQUESTS) => Stage::ThrottledGet,
                r if needs_fallback(r) => Stage::FallbackGet { prior: r },
                r => Stage::Done(r),
            },
            Stage::ThrottledGet => {
                if needs_fallback(response) {
                    Stage::FallbackGet { prior: response }
                } else {
                    Stage::Done(response)
                }
            }
            Stage::FallbackGet { prior } => Stage::Done(response.or(prior)),
            Stage::Done(r) => Stage::Done(r),
        }
    }
}

fn needs_fallback(response: Option<u32>) -> bool {
    match response {
        None => true,
        Some(code) => code >= FALLBACK_FROM_STATUS,
    }
}
