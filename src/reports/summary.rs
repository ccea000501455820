//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::model::{
    PayloadStatus, RegisteredCertificate, VerificationLogEntry, VerificationPayload,
};
use crate::registry::RegistryStats;
use crate::session::UserRecord;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn status_color(status: PayloadStatus) -> &'static str {
    match status {
        PayloadStatus::Original => "green",
        PayloadStatus::Fake => "yellow",
        PayloadStatus::NoMatch => "red",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn header(&self, lines: &mut Vec<String>, title: &str) {
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
    }

    fn field(&self, lines: &mut Vec<String>, label: &str, value: &str) {
        lines.push(format!("  {} {}", self.color(&format!("{label}:"), "cyan"), value));
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn verification_report(&self, payload: &VerificationPayload) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        self.header(&mut lines, "Certificate Verification");
        lines.push(self.color(&payload.message, status_color(payload.status)));
        lines.push(format!(
            "{}  {} ({})",
            self.color("Score:", "cyan"),
            payload.match_score,
            payload.status
        ));

        if let Some(cert) = &payload.matched_certificate {
            lines.push(String::new());
            lines.push(self.color("Matched record:", "bold"));
            self.field(&mut lines, "Certificate ID", &cert.certificate_id);
            self.field(&mut lines, "Holder", &cert.holder_name);
            self.field(&mut lines, "Institution", &cert.institution);
            self.field(&mut lines, "Department", &cert.department);
            self.field(
                &mut lines,
                "Period",
                &format!("{} - {}", cert.start_year, cert.end_year),
            );
        }

        if let Some(extracted) = &payload.extracted_data {
            lines.push(String::new());
            lines.push(self.color("Extracted:", "bold"));
            let fields = [
                ("Certificate ID", &extracted.certificate_id),
                ("Holder", &extracted.holder_name),
                ("Institution", &extracted.institution),
                ("Department", &extracted.department),
            ];
            for (label, value) in fields {
                if let Some(value) = value {
                    self.field(&mut lines, label, value);
                }
            }
            self.field(&mut lines, "Confidence", extracted.confidence.as_str());
        }

        let differences = payload.differences();
        if !differences.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Differences:", "bold"));
            for diff in differences {
                lines.push(format!("  {} {diff}", self.color("!", "yellow")));
            }
        }

        Ok(lines.join("\n"))
    }

    fn certificates_report(
        &self,
        certificates: &[RegisteredCertificate],
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "Registered Certificates");

        if certificates.is_empty() {
            lines.push(self.color("No certificates registered.", "dim"));
            return Ok(lines.join("\n"));
        }

        for cert in certificates {
            let status = if cert.is_active() {
                self.color(&cert.status.to_string(), "green")
            } else {
                self.color(&cert.status.to_string(), "red")
            };
            lines.push(format!(
                "  {:<20} {:<24} {} [{}]",
                truncate(&cert.certificate_id, 20),
                truncate(&cert.holder_name, 24),
                truncate(&cert.institution, 30),
                status
            ));
        }
        lines.push(String::new());
        lines.push(format!("{} record(s)", certificates.len()));

        Ok(lines.join("\n"))
    }

    fn logs_report(&self, entries: &[VerificationLogEntry]) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "Verification Log");

        if entries.is_empty() {
            lines.push(self.color("No verifications recorded.", "dim"));
            return Ok(lines.join("\n"));
        }

        for entry in entries {
            lines.push(format!(
                "  {}  {:<9} {:>3}  {}",
                entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                self.color(entry.result.as_str(), status_color(entry.result)),
                entry.confidence_score,
                entry.certificate_id.as_deref().unwrap_or("-")
            ));
        }

        Ok(lines.join("\n"))
    }

    fn stats_report(&self, stats: &RegistryStats) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "Registry Statistics");

        lines.push(format!(
            "{}  {} total, {} active, {} revoked",
            self.color("Certificates:", "cyan"),
            stats.total_certificates,
            stats.active_certificates,
            stats.revoked_certificates
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Verifications:", "cyan"),
            stats.total_verifications
        ));
        lines.push(format!(
            "  {} original",
            self.color(&stats.original_verdicts.to_string(), "green")
        ));
        lines.push(format!(
            "  {} suspicious",
            self.color(&stats.fake_verdicts.to_string(), "yellow")
        ));
        lines.push(format!(
            "  {} not found",
            self.color(&stats.no_match_verdicts.to_string(), "red")
        ));

        Ok(lines.join("\n"))
    }

    fn users_report(&self, users: &[UserRecord]) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "Operators");

        for user in users {
            lines.push(format!(
                "  {:<16} {:<10} {} login(s)",
                user.username,
                user.role.as_str(),
                user.login_count
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Truncate a string to `max_len` characters, appending an ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CertificateStatus, ExtractedFields, NewCertificate};
    use crate::session::Role;

    fn payload() -> VerificationPayload {
        VerificationPayload {
            is_original: false,
            status: PayloadStatus::Fake,
            match_score: 60,
            matched_certificate: None,
            message: "partial".into(),
            extracted_data: Some(ExtractedFields::default().with_holder_name("Jane Doe")),
            differences: Some(vec!["Institution differs".into()]),
        }
    }

    #[test]
    fn test_verification_report_plain() {
        let out = SummaryReporter::new()
            .no_color()
            .verification_report(&payload())
            .unwrap();
        assert!(out.contains("partial"));
        assert!(out.contains("Score:  60 (fake)"));
        assert!(out.contains("Holder: Jane Doe"));
        assert!(out.contains("Institution differs"));
        assert!(!out.contains("\x1b["));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let out = SummaryReporter::new().verification_report(&payload()).unwrap();
        assert!(out.contains("\x1b[33m"));
    }

    #[test]
    fn test_certificates_report_marks_revoked() {
        let cert = RegisteredCertificate::from_new(
            "rec_000001",
            NewCertificate::new("CERT-1", "Jane", "MIT", "CS")
                .with_status(CertificateStatus::Revoked),
        );
        let out = SummaryReporter::new()
            .no_color()
            .certificates_report(&[cert])
            .unwrap();
        assert!(out.contains("CERT-1"));
        assert!(out.contains("[revoked]"));
        assert!(out.contains("1 record(s)"));
    }

    #[test]
    fn test_empty_listings() {
        let reporter = SummaryReporter::new().no_color();
        assert!(reporter.certificates_report(&[]).unwrap().contains("No certificates"));
        assert!(reporter.logs_report(&[]).unwrap().contains("No verifications"));
    }

    #[test]
    fn test_users_report() {
        let users = vec![UserRecord::new("admin", Role::Admin)];
        let out = SummaryReporter::new().no_color().users_report(&users).unwrap();
        assert!(out.contains("admin"));
        assert!(out.contains("0 login(s)"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
