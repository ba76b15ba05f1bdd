//! Batch runner: walks the registry in order and checks every due entry.
//!
//! Entries are probed strictly one after another with a fixed pause between
//! probes, so a run never bursts a host even when URLs repeat. A probe error
//! is logged and the entry left as it was; it never aborts the batch.

use chrono::NaiveDate;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::BlogwatchConfig;
use crate::domain::ProtectedHosts;
use crate::probe::{Probe, ProbeOutcome};
use crate::registry::{EntryStatus, Registry};
use crate::resolve::resolve;
use crate::staleness::StalenessGate;

/// What happened to one probed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryResult {
    Checked {
        outcome: ProbeOutcome,
        is_protected: bool,
        /// Status after resolution.
        status: EntryStatus,
        changed: bool,
    },
    /// The probe itself errored; the entry is untouched.
    Failed(String),
}

/// Per-entry progress report, sent while the run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub index: usize,
    pub name: String,
    pub url: String,
    pub result: EntryResult,
}

/// Totals for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries in the registry.
    pub total: usize,
    /// Entries that were due and probed.
    pub probed: usize,
    /// Entries skipped by the staleness gate.
    pub skipped: usize,
    /// Probes that errored.
    pub failed: usize,
    /// Entries whose status or last_checked_at changed.
    pub changed: usize,
}

pub struct BatchRunner<P> {
    probe: P,
    gate: StalenessGate,
    protected: ProtectedHosts,
    pacing: Duration,
}

impl<P: Probe> BatchRunner<P> {
    pub fn new(probe: P, gate: StalenessGate, protected: ProtectedHosts, pacing: Duration) -> Self {
        Self {
            probe,
            gate,
            protected,
            pacing,
        }
    }

    pub fn from_config(probe: P, cfg: &BlogwatchConfig) -> Self {
        Self::new(
            probe,
            cfg.staleness_gate(),
            cfg.protected_hosts(),
            cfg.pacing_delay(),
        )
    }

    pub fn probe_ref(&self) -> &P {
        &self.probe
    }

    /// Checks every due entry and returns the updated registry with the run totals.
    ///
    /// Reports are sent with `blocking_send`, so call this off the async runtime
    /// (e.g. from `spawn_blocking`) when `reports` is set.
    pub fn run(
        &mut self,
        mut registry: Registry,
        force: bool,
        today: NaiveDate,
        reports: Option<&mpsc::Sender<EntryReport>>,
    ) -> (Registry, RunSummary) {
        let mut summary = RunSummary {
            total: registry.len(),
            ..RunSummary::default()
        };

        for (index, entry) in registry.entries_mut().iter_mut().enumerate() {
            if !self.gate.is_due(entry.last_checked_at, force, today) {
                summary.skipped += 1;
                continue;
            }

            if summary.probed > 0 && !self.pacing.is_zero() {
                std::thread::sleep(self.pacing);
            }
            summary.probed += 1;

            let class = self.protected.classify(&entry.url);
            let result = match self.probe.probe(&entry.url) {
                Ok(outcome) => {
                    let changed = match resolve(outcome, class.is_protected, today) {
                        Some(update) => update.apply(entry),
                        None => false,
                    };
                    log_outcome(&entry.name, &entry.url, outcome, class.is_protected);
                    EntryResult::Checked {
                        outcome,
                        is_protected: class.is_protected,
                        status: entry.status,
                        changed,
                    }
                }
                Err(e) => {
                    tracing::error!(name = %entry.name, url = %entry.url, "probe failed: {:#}", e);
                    EntryResult::Failed(format!("{e:#}"))
                }
            };

            match &result {
                EntryResult::Checked { changed: true, .. } => summary.changed += 1,
                EntryResult::Failed(_) => summary.failed += 1,
                EntryResult::Checked { .. } => {}
            }

            if let Some(tx) = reports {
                let _ = tx.blocking_send(EntryReport {
                    index,
                    name: entry.name.clone(),
                    url: entry.url.clone(),
                    result,
                });
            }
        }

        tracing::info!(
            total = summary.total,
            probed = summary.probed,
            skipped = summary.skipped,
            failed = summary.failed,
            changed = summary.changed,
            "validation run finished"
        );
        (registry, summary)
    }
}

fn log_outcome(name: &str, url: &str, outcome: ProbeOutcome, is_protected: bool) {
    match outcome {
        ProbeOutcome::Success(_) => tracing::info!(name, url, %outcome, "ok"),
        ProbeOutcome::ClientError(404) => tracing::info!(name, url, %outcome, "marked invalid"),
        ProbeOutcome::TransientBlocked(_) if is_protected => {
            tracing::info!(name, url, %outcome, "blocked on protected host, kept active")
        }
        ProbeOutcome::NetworkFailure => {
            tracing::warn!(name, url, "no response, will retry next run")
        }
        _ => tracing::warn!(name, url, %outcome, "inconclusive, keeping status"),
    }
}
