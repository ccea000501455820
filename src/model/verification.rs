//! Caller-facing verification payloads and audit log entries.

use super::{ExtractedFields, RegisteredCertificate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadStatus {
    Original,
    /// Partial match with discrepancies (suspicious / tampered)
    Fake,
    NoMatch,
}

impl PayloadStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Fake => "fake",
            Self::NoMatch => "no_match",
        }
    }
}

impl std::fmt::Display for PayloadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result returned by both the image-based and the ID-based entry points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    pub is_original: bool,
    pub status: PayloadStatus,
    pub match_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_certificate: Option<RegisteredCertificate>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<ExtractedFields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub differences: Option<Vec<String>>,
}

impl VerificationPayload {
    /// Discrepancies as a slice, empty when none were reported.
    #[must_use]
    pub fn differences(&self) -> &[String] {
        self.differences.as_deref().unwrap_or_default()
    }
}

/// Audit record written after every image-based verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationLogEntry {
    /// Storage id of the matched record, when the verdict associates one
    #[serde(default)]
    pub certificate_id: Option<String>,
    pub result: PayloadStatus,
    pub confidence_score: u32,
    #[serde(default)]
    pub extracted_data: Option<ExtractedFields>,
    #[serde(default)]
    pub differences: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl VerificationLogEntry {
    /// Build the audit entry for a payload the caller is about to receive.
    #[must_use]
    pub fn from_payload(payload: &VerificationPayload) -> Self {
        Self {
            certificate_id: payload.matched_certificate.as_ref().map(|c| c.id.clone()),
            result: payload.status,
            confidence_score: payload.match_score,
            extracted_data: payload.extracted_data.clone(),
            differences: payload.differences().to_vec(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serializes_camel_case_and_omits_absent() {
        let payload = VerificationPayload {
            is_original: false,
            status: PayloadStatus::NoMatch,
            match_score: 0,
            matched_certificate: None,
            message: "not found".to_string(),
            extracted_data: None,
            differences: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["isOriginal"], false);
        assert_eq!(json["status"], "no_match");
        assert_eq!(json["matchScore"], 0);
        assert!(json.get("matchedCertificate").is_none());
        assert!(json.get("differences").is_none());
    }

    #[test]
    fn test_log_entry_from_payload() {
        let payload = VerificationPayload {
            is_original: false,
            status: PayloadStatus::Fake,
            match_score: 55,
            matched_certificate: None,
            message: String::new(),
            extracted_data: Some(ExtractedFields::default()),
            differences: Some(vec!["Name mismatch: \"a\" vs \"b\"".to_string()]),
        };
        let entry = VerificationLogEntry::from_payload(&payload);
        assert_eq!(entry.result, PayloadStatus::Fake);
        assert_eq!(entry.confidence_score, 55);
        assert_eq!(entry.differences.len(), 1);
        assert!(entry.certificate_id.is_none());
    }
}
