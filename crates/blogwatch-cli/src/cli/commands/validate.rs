//! `blogwatch validate` – check due entries and persist any changes.

use anyhow::{Context, Result};
use blogwatch_core::config::BlogwatchConfig;
use blogwatch_core::probe::{curl_prober, ProbeOutcome};
use blogwatch_core::registry::JsonRegistryStore;
use blogwatch_core::runner::{BatchRunner, EntryReport, EntryResult};
use blogwatch_core::validate::validate_registry;
use std::path::Path;

pub async fn run_validate(cfg: &BlogwatchConfig, registry_path: &Path, force: bool) -> Result<()> {
    let store = JsonRegistryStore::new(registry_path);
    let today = chrono::Local::now().date_naive();

    let (report_tx, mut report_rx) = tokio::sync::mpsc::channel::<EntryReport>(16);
    let printer = tokio::spawn(async move {
        while let Some(report) = report_rx.recv().await {
            println!("{}", format_report(&report));
        }
    });

    let run = tokio::task::spawn_blocking({
        let cfg = cfg.clone();
        let store = store.clone();
        move || {
            let mut runner = BatchRunner::from_config(curl_prober(&cfg.probe), &cfg);
            validate_registry(&store, &mut runner, force, today, Some(&report_tx))
        }
    })
    .await
    .context("validation task join")??;

    let _ = printer.await;

    let s = run.summary;
    println!(
        "Validated {} of {} entries ({} skipped, {} failed), updated {}.",
        s.probed, s.total, s.skipped, s.failed, s.changed
    );
    if run.saved {
        println!("Saved updates to {}", store.path().display());
    } else {
        println!("No updates needed.");
    }
    Ok(())
}

pub(super) fn format_report(report: &EntryReport) -> String {
    let verdict = match &report.result {
        EntryResult::Failed(err) => format!("ERROR: {err}"),
        EntryResult::Checked {
            outcome,
            is_protected,
            status,
            ..
        } => match outcome {
            ProbeOutcome::Success(_) => "OK".to_string(),
            ProbeOutcome::ClientError(404) => "FAILED (404) - marked invalid".to_string(),
            ProbeOutcome::TransientBlocked(code) if *is_protected => {
                format!("blocked ({code}) on protected host - keeping active")
            }
            ProbeOutcome::NetworkFailure => "no response - will retry next run".to_string(),
            other => format!("warning ({other}) - keeping status {status}"),
        },
    };
    format!("Checking {} - {} ... {}", report.name, report.url, verdict)
}
