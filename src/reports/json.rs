//! JSON report generator.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::model::{RegisteredCertificate, VerificationLogEntry, VerificationPayload};
use crate::registry::RegistryStats;
use crate::session::UserRecord;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn verification_report(&self, payload: &VerificationPayload) -> Result<String, ReportError> {
        self.render(payload)
    }

    fn certificates_report(
        &self,
        certificates: &[RegisteredCertificate],
    ) -> Result<String, ReportError> {
        self.render(certificates)
    }

    fn logs_report(&self, entries: &[VerificationLogEntry]) -> Result<String, ReportError> {
        self.render(entries)
    }

    fn stats_report(&self, stats: &RegistryStats) -> Result<String, ReportError> {
        self.render(stats)
    }

    fn users_report(&self, users: &[UserRecord]) -> Result<String, ReportError> {
        self.render(users)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PayloadStatus;

    #[test]
    fn test_payload_shape() {
        let payload = VerificationPayload {
            is_original: false,
            status: PayloadStatus::NoMatch,
            match_score: 0,
            matched_certificate: None,
            message: "none".into(),
            extracted_data: None,
            differences: None,
        };
        let out = JsonReporter::new().pretty(false).verification_report(&payload).unwrap();
        assert_eq!(
            out,
            r#"{"isOriginal":false,"status":"no_match","matchScore":0,"message":"none"}"#
        );
    }
}
