//! Registration and revocation command handlers.

use super::{Credentials, OutputOptions, command_failed, load_image, open_session};
use crate::config::AppConfig;
use crate::pipeline::{build_registrar, open_store, output_report};
use anyhow::{Context, Result};

/// Run the register command.
///
/// `image` is a file path or a `data:` URL.
pub fn run_register(
    config: &AppConfig,
    image: &str,
    cert_id: Option<&str>,
    credentials: &Credentials,
    output: &OutputOptions,
) -> Result<()> {
    let session = open_session(config, credentials)?;
    let image = load_image(image, config.verification.max_upload_bytes)?;

    let registrar = build_registrar(config, open_store(&config.storage))?;
    let record = registrar
        .register_image(&session, &image, cert_id)
        .map_err(|e| command_failed(e, "Registration failed"))?;

    output_report(
        output.format,
        output.no_color,
        &output.target(),
        output.quiet,
        |r| r.certificates_report(std::slice::from_ref(&record)),
    )
}

/// Run the revoke or reinstate command.
pub fn run_set_status(
    config: &AppConfig,
    id: &str,
    revoke: bool,
    credentials: &Credentials,
    output: &OutputOptions,
) -> Result<()> {
    let session = open_session(config, credentials)?;
    let registrar = build_registrar(config, open_store(&config.storage))?;

    let record = if revoke {
        registrar.revoke(&session, id)
    } else {
        registrar.reinstate(&session, id)
    }
    .with_context(|| format!("Cannot change status of {id}"))?;

    output_report(
        output.format,
        output.no_color,
        &output.target(),
        output.quiet,
        |r| r.certificates_report(std::slice::from_ref(&record)),
    )
}
