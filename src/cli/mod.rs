//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod admin;
mod inspect;
mod verify;

pub use admin::{run_register, run_set_status};
pub use inspect::{run_list, run_logs, run_stats, run_users};
pub use verify::{run_lookup, run_verify};

use crate::config::{AppConfig, OutputConfig};
use crate::error::CertError;
use crate::model::ImageUpload;
use crate::pipeline::OutputTarget;
use crate::reports::ReportFormat;
use crate::session::{Session, UserDirectory};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Output settings shared by every handler.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub format: ReportFormat,
    pub file: Option<PathBuf>,
    pub no_color: bool,
    pub quiet: bool,
}

impl OutputOptions {
    /// Start from the config file's output section.
    #[must_use]
    pub fn from_config(output: &OutputConfig, quiet: bool) -> Self {
        Self {
            format: output.format,
            file: output.file.clone(),
            no_color: output.no_color,
            quiet,
        }
    }

    pub(crate) fn target(&self) -> OutputTarget {
        OutputTarget::from_option(self.file.clone())
    }
}

/// Operator credentials for gated commands.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Log in against the configured operator list.
pub(crate) fn open_session(config: &AppConfig, credentials: &Credentials) -> Result<Session> {
    let mut directory = UserDirectory::new(config.auth.users.clone(), config.auth.login_policy());
    directory
        .login(&credentials.username, &credentials.password)
        .with_context(|| format!("Login failed for '{}'", credentials.username))
}

/// Load a certificate image from a file path or a `data:<mime>;base64,` URL.
pub fn load_image(source: &str, max_bytes: u64) -> Result<ImageUpload> {
    if source.trim_start().starts_with("data:") {
        ImageUpload::from_data_url(source, max_bytes)
            .context("Cannot use the data URL as a certificate image")
    } else {
        ImageUpload::from_path(Path::new(source), max_bytes)
            .with_context(|| format!("Cannot use {source} as a certificate image"))
    }
}

/// Wrap a library failure, noting when a retry could succeed.
pub(crate) fn command_failed(err: CertError, what: &str) -> anyhow::Error {
    if err.is_transient() {
        tracing::warn!("{what} hit a temporary failure; retrying later may succeed");
    }
    anyhow::Error::new(err).context(what.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    #[test]
    fn test_load_image_from_data_url() {
        let payload = base64::engine::general_purpose::STANDARD.encode([0x89, b'P', b'N', b'G']);
        let image = load_image(&format!("data:image/png;base64,{payload}"), 1024).unwrap();
        assert_eq!(image.media_type(), "image/png");
        assert_eq!(image.bytes(), &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_load_image_rejects_bad_data_url() {
        let err = load_image("data:image/png;base64,@@@", 1024).unwrap_err();
        assert!(format!("{err:#}").contains("Malformed data URL"));
    }

    #[test]
    fn test_load_image_missing_file_names_path() {
        let err = load_image("/nonexistent/scan.png", 1024).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/scan.png"));
    }

    #[test]
    fn test_command_failed_keeps_chain() {
        let err = command_failed(
            CertError::ocr("OCR gateway", crate::error::OcrErrorKind::RateLimited),
            "Verification failed",
        );
        let text = format!("{err:#}");
        assert!(text.starts_with("Verification failed"));
        assert!(text.contains("Rate limit exceeded"));
    }
}
