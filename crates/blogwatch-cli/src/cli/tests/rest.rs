//! Tests for status and check subcommands.

use super::{parse, parse_cli};
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_status() {
    match parse(&["blogwatch", "status"]) {
        CliCommand::Status { registry } => assert!(registry.is_none()),
        _ => panic!("expected Status"),
    }
}

#[test]
fn cli_parse_status_with_registry() {
    match parse(&["blogwatch", "status", "--registry", "blogs.json"]) {
        CliCommand::Status { registry } => {
            assert_eq!(registry.as_deref(), Some(Path::new("blogs.json")))
        }
        _ => panic!("expected Status with --registry"),
    }
}

#[test]
fn cli_parse_check() {
    match parse(&["blogwatch", "check", "https://stripe.com/blog"]) {
        CliCommand::Check { url } => assert_eq!(url, "https://stripe.com/blog"),
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_check_requires_url() {
    assert!(Cli::try_parse_from(["blogwatch", "check"]).is_err());
}

#[test]
fn cli_parse_config_before_subcommand() {
    let cli = parse_cli(&["blogwatch", "--config", "cfg.toml", "status"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("cfg.toml")));
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(Cli::try_parse_from(["blogwatch"]).is_err());
}
