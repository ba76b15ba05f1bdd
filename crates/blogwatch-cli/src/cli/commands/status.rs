//! `blogwatch status` – show entries, their status and when they are next due.

use anyhow::Result;
use blogwatch_core::config::BlogwatchConfig;
use blogwatch_core::registry::{JsonRegistryStore, RegistryStore};
use std::path::Path;

pub fn run_status(cfg: &BlogwatchConfig, registry_path: &Path) -> Result<()> {
    let store = JsonRegistryStore::new(registry_path);
    let registry = store.load()?;
    if registry.is_empty() {
        println!("No entries in {}.", registry_path.display());
        return Ok(());
    }

    let gate = cfg.staleness_gate();
    let today = chrono::Local::now().date_naive();

    println!(
        "{:<8} {:<12} {:<12} {:<32} {}",
        "STATUS", "CHECKED", "NEXT DUE", "NAME", "URL"
    );
    let mut due = 0usize;
    for e in registry.entries() {
        let checked = e
            .last_checked_at
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let next = if gate.is_due(e.last_checked_at, false, today) {
            due += 1;
            "now".to_string()
        } else {
            gate.next_due(e.last_checked_at)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        println!(
            "{:<8} {:<12} {:<12} {:<32} {}",
            e.status.to_string(),
            checked,
            next,
            e.name,
            e.url
        );
    }

    let invalid = registry
        .entries()
        .iter()
        .filter(|e| e.status == blogwatch_core::registry::EntryStatus::Invalid)
        .count();
    println!();
    println!(
        "{} entries, {} invalid, {} due for a check.",
        registry.len(),
        invalid,
        due
    );

    for (key, indices) in registry.duplicate_urls() {
        let names: Vec<&str> = indices
            .iter()
            .map(|&i| registry.entries()[i].name.as_str())
            .collect();
        println!("warning: duplicate URL {} ({})", key, names.join(", "));
    }
    Ok(())
}
