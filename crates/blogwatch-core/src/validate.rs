//! One validation pass over a registry store: load, run, save only if something changed.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tokio::sync::mpsc;

use crate::probe::Probe;
use crate::registry::RegistryStore;
use crate::runner::{BatchRunner, EntryReport, RunSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRun {
    pub summary: RunSummary,
    /// True if the registry was written back.
    pub saved: bool,
}

/// Load and save failures are returned; per-entry probe failures are not.
pub fn validate_registry<S, P>(
    store: &S,
    runner: &mut BatchRunner<P>,
    force: bool,
    today: NaiveDate,
    reports: Option<&mpsc::Sender<EntryReport>>,
) -> Result<ValidationRun>
where
    S: RegistryStore + ?Sized,
    P: Probe,
{
    let registry = store.load().context("load registry")?;
    tracing::info!(entries = registry.len(), force, %today, "validating registry");

    let (registry, summary) = runner.run(registry, force, today, reports);

    let saved = if summary.changed > 0 {
        store.save(&registry).context("save registry")?;
        true
    } else {
        tracing::info!("no entries changed, registry left untouched");
        false
    };

    Ok(ValidationRun { summary, saved })
}
