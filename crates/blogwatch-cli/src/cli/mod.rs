//! CLI for the blogwatch link validator.

mod commands;

use anyhow::Result;
use blogwatch_core::config::{self, BlogwatchConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_check, run_status, run_validate};

/// Top-level CLI for blogwatch.
#[derive(Debug, Parser)]
#[command(name = "blogwatch")]
#[command(about = "blogwatch: keeps an engineering-blog registry free of dead links", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/blogwatch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check every due entry and update its status in the registry.
    Validate {
        /// Check all entries regardless of when they were last checked.
        #[arg(long)]
        force: bool,
        /// Registry JSON file (overrides `registry_path` from the config).
        #[arg(long, value_name = "PATH")]
        registry: Option<PathBuf>,
    },

    /// Show every entry's status and when it is next due.
    Status {
        /// Registry JSON file (overrides `registry_path` from the config).
        #[arg(long, value_name = "PATH")]
        registry: Option<PathBuf>,
    },

    /// Probe a single URL without touching the registry.
    Check {
        /// URL to probe.
        url: String,
    },
}

fn load_config(path: Option<&std::path::Path>) -> Result<BlogwatchConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Validate { force, registry } => {
                let path = registry.unwrap_or_else(|| cfg.registry_path.clone());
                run_validate(&cfg, &path, force).await?;
            }
            CliCommand::Status { registry } => {
                let path = registry.unwrap_or_else(|| cfg.registry_path.clone());
                run_status(&cfg, &path)?;
            }
            CliCommand::Check { url } => run_check(&cfg, &url).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
