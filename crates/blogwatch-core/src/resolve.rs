//! Maps a probe outcome to the persisted update for an entry.
//!
//! The policy is the static [`DECISION_TABLE`]; the first matching row wins.
//! Any HTTP response at all resets the staleness clock, so hosts are not
//! re-probed every run. A network failure leaves the entry untouched so the
//! next run retries it.

use chrono::NaiveDate;

use crate::probe::{ProbeOutcome, STATUS_NOT_FOUND};
use crate::registry::EntryStatus::{Active, Invalid};
use crate::registry::{EntryStatus, RegistryEntry};
use self::HostRule::{Any, Protected, Unprotected};

/// Outcome shape the table keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutcomeClass {
    Success,
    NotFound,
    TransientBlocked,
    OtherClientError,
    NetworkFailure,
}

impl From<ProbeOutcome> for OutcomeClass {
    fn from(o: ProbeOutcome) -> Self {
        match o {
            ProbeOutcome::Success(_) => OutcomeClass::Success,
            ProbeOutcome::ClientError(STATUS_NOT_FOUND) => OutcomeClass::NotFound,
            ProbeOutcome::ClientError(_) => OutcomeClass::OtherClientError,
            ProbeOutcome::TransientBlocked(_) => OutcomeClass::TransientBlocked,
            ProbeOutcome::NetworkFailure => OutcomeClass::NetworkFailure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostRule {
    Any,
    Protected,
    Unprotected,
}

impl HostRule {
    fn matches(self, is_protected: bool) -> bool {
        match self {
            HostRule::Any => true,
            HostRule::Protected => is_protected,
            HostRule::Unprotected => !is_protected,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    outcome: OutcomeClass,
    host: HostRule,
    status: Option<EntryStatus>,
    advance_clock: bool,
}

const fn rule(
    outcome: OutcomeClass,
    host: HostRule,
    status: Option<EntryStatus>,
    advance_clock: bool,
) -> Rule {
    Rule {
        outcome,
        host,
        status,
        advance_clock,
    }
}

const DECISION_TABLE: &[Rule] = &[
    rule(OutcomeClass::Success, Any, Some(Active), true),
    rule(OutcomeClass::NotFound, Any, Some(Invalid), true),
    rule(OutcomeClass::TransientBlocked, Protected, Some(Active), true),
    rule(OutcomeClass::TransientBlocked, Unprotected, None, true),
    rule(OutcomeClass::OtherClientError, Any, None, true),
    rule(OutcomeClass::NetworkFailure, Any, None, false),
];

/// Fields to write back; `None` means leave as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedUpdate {
    pub status: Option<EntryStatus>,
    pub last_checked_at: Option<NaiveDate>,
}

impl ResolvedUpdate {
    /// Writes the update into `entry`; returns true if any field changed.
    /// `last_checked_at` never moves backwards.
    pub fn apply(&self, entry: &mut RegistryEntry) -> bool {
        let mut changed = false;
        if let Some(status) = self.status {
            if entry.status != status {
                entry.status = status;
                changed = true;
            }
        }
        if let Some(date) = self.last_checked_at {
            let newer = entry.last_checked_at.map_or(true, |prev| date > prev);
            if newer {
                entry.last_checked_at = Some(date);
                changed = true;
            }
        }
        changed
    }
}

/// `None` is "no change" (network failure).
pub fn resolve(outcome: ProbeOutcome, is_protected: bool, today: NaiveDate) -> Option<ResolvedUpdate> {
    let class = OutcomeClass::from(outcome);
    let rule = DECISION_TABLE
        .iter()
        .find(|r| r.outcome == class && r.host.matches(is_protected))?;
    let update = ResolvedUpdate {
        status: rule.status,
        last_checked_at: rule.advance_clock.then_some(today),
    };
    if update.status.is_none() && update.last_checked_at.is_none() {
        return None;
    }
    Some(update)
}
