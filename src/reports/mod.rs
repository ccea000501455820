//! Rendering of verification results and registry listings.
//!
//! Two formats are available:
//! - Summary: compact, optionally colored terminal output
//! - JSON: the caller-facing payload shape, for programmatic integration

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::ReportFormat;

use crate::model::{RegisteredCertificate, VerificationLogEntry, VerificationPayload};
use crate::registry::RegistryStats;
use crate::session::UserRecord;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a verification or lookup payload.
    fn verification_report(&self, payload: &VerificationPayload) -> Result<String, ReportError>;

    /// Render a list of registered certificates.
    fn certificates_report(
        &self,
        certificates: &[RegisteredCertificate],
    ) -> Result<String, ReportError>;

    /// Render audit log entries.
    fn logs_report(&self, entries: &[VerificationLogEntry]) -> Result<String, ReportError>;

    /// Render registry statistics.
    fn stats_report(&self, stats: &RegistryStats) -> Result<String, ReportError>;

    /// Render the operator list.
    fn users_report(&self, users: &[UserRecord]) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
