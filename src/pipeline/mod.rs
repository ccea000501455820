//! Wiring shared by the CLI command handlers.
//!
//! Builds the store, OCR extractor and engines from an [`AppConfig`](crate::config::AppConfig),
//! and renders reports to stdout or a file.

mod output;
mod setup;

pub use output::{OutputTarget, output_report, should_use_color, write_output};
pub use setup::{build_engine, build_extractor, build_registrar, open_store};

use crate::model::PayloadStatus;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A collaborator could not be constructed
    #[error("Failed to set up {component}: {source}")]
    SetupFailed {
        component: &'static str,
        #[source]
        source: crate::error::CertError,
    },
}

/// Exit codes for scripting
pub mod exit_codes {
    /// Command succeeded; for verification, the certificate is original
    pub const SUCCESS: i32 = 0;
    /// Verification found a partial match with discrepancies
    pub const SUSPICIOUS: i32 = 1;
    /// Verification found no registered certificate
    pub const NOT_FOUND: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Map a verification outcome to a process exit code.
#[must_use]
pub const fn exit_code_for(status: PayloadStatus) -> i32 {
    match status {
        PayloadStatus::Original => exit_codes::SUCCESS,
        PayloadStatus::Fake => exit_codes::SUSPICIOUS,
        PayloadStatus::NoMatch => exit_codes::NOT_FOUND,
    }
}

/// Platform-specific data directory utilities
pub mod dirs {
    use std::path::PathBuf;

    /// Default registry directory, e.g. `~/.local/share/certchain` on Linux.
    #[must_use]
    pub fn data_dir() -> PathBuf {
        ::dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".local").join("share"))
            .join("certchain")
    }
}
