//! `blogwatch check <url>` – probe one URL ad hoc; the registry is not touched.

use anyhow::{Context, Result};
use blogwatch_core::config::BlogwatchConfig;
use blogwatch_core::probe::curl_prober;
use blogwatch_core::resolve::resolve;

pub async fn run_check(cfg: &BlogwatchConfig, url: &str) -> Result<()> {
    let class = cfg.protected_hosts().classify(url);
    let outcome = tokio::task::spawn_blocking({
        let url = url.to_string();
        let probe_cfg = cfg.probe.clone();
        move || curl_prober(&probe_cfg).run_ladder(&url)
    })
    .await
    .context("probe task join")?;

    let host = if class.host.is_empty() {
        "(unparseable)"
    } else {
        class.host.as_str()
    };
    println!("URL:       {}", url);
    println!("Host:      {}", host);
    println!("Protected: {}", if class.is_protected { "yes" } else { "no" });
    println!("Outcome:   {}", outcome);

    let today = chrono::Local::now().date_naive();
    let verdict = match resolve(outcome, class.is_protected, today) {
        None => "no change (retried next run)".to_string(),
        Some(update) => match update.status {
            Some(status) => format!("mark {}", status),
            None => "keep current status, reset check date".to_string(),
        },
    };
    println!("Would:     {}", verdict);
    Ok(())
}
