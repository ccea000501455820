//! Read-only listing command handlers.

use super::OutputOptions;
use crate::config::AppConfig;
use crate::pipeline::{open_store, output_report};
use crate::registry::RegistryStats;
use anyhow::{Context, Result};

/// Run the list command. Only active records unless `all` is set.
pub fn run_list(config: &AppConfig, all: bool, output: &OutputOptions) -> Result<()> {
    let store = open_store(&config.storage);
    let certificates = if all {
        store.list_all()
    } else {
        store.list_active()
    }
    .context("Failed to read the registry")?;

    output_report(
        output.format,
        output.no_color,
        &output.target(),
        output.quiet,
        |r| r.certificates_report(&certificates),
    )
}

/// Run the logs command.
pub fn run_logs(config: &AppConfig, output: &OutputOptions) -> Result<()> {
    let store = open_store(&config.storage);
    let entries = store
        .list_verification_logs()
        .context("Failed to read the verification log")?;

    output_report(
        output.format,
        output.no_color,
        &output.target(),
        output.quiet,
        |r| r.logs_report(&entries),
    )
}

/// Run the stats command.
pub fn run_stats(config: &AppConfig, output: &OutputOptions) -> Result<()> {
    let store = open_store(&config.storage);
    let stats = RegistryStats::collect(store.as_ref()).context("Failed to collect statistics")?;

    output_report(
        output.format,
        output.no_color,
        &output.target(),
        output.quiet,
        |r| r.stats_report(&stats),
    )
}

/// Run the users command.
pub fn run_users(config: &AppConfig, output: &OutputOptions) -> Result<()> {
    output_report(
        output.format,
        output.no_color,
        &output.target(),
        output.quiet,
        |r| r.users_report(&config.auth.users),
    )
}
