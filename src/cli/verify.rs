//! Verify and lookup command handlers.

use super::{OutputOptions, command_failed, load_image};
use crate::config::AppConfig;
use crate::pipeline::{build_engine, exit_code_for, open_store, output_report};
use crate::verify::CancellationToken;
use anyhow::{Context, Result};

/// Run the verify command.
///
/// `image` is a file path or a `data:` URL. Returns the exit code for the verdict.
pub fn run_verify(config: &AppConfig, image: &str, output: &OutputOptions) -> Result<i32> {
    let image = load_image(image, config.verification.max_upload_bytes)?;

    let store = open_store(&config.storage);
    let engine = build_engine(config, store)?;
    let payload = engine
        .verify_image(&image, &CancellationToken::new())
        .map_err(|e| command_failed(e, "Verification failed"))?;

    output_report(
        output.format,
        output.no_color,
        &output.target(),
        output.quiet,
        |r| r.verification_report(&payload),
    )?;

    Ok(exit_code_for(payload.status))
}

/// Run the lookup command.
pub fn run_lookup(config: &AppConfig, cert_id: &str, output: &OutputOptions) -> Result<i32> {
    let store = open_store(&config.storage);
    let engine = build_engine(config, store)?;
    let payload = engine
        .lookup_by_id(cert_id)
        .with_context(|| format!("Lookup of '{cert_id}' failed"))?;

    output_report(
        output.format,
        output.no_color,
        &output.target(),
        output.quiet,
        |r| r.verification_report(&payload),
    )?;

    Ok(exit_code_for(payload.status))
}
