//! Verdict classification.
//!
//! Score bands are fixed: `>= 80` original, `40..80` suspicious, below 40 not
//! found. A sub-40 best candidate is never attached to the payload.

use crate::matching::MatchResult;
use crate::model::{ExtractedFields, PayloadStatus, RegisteredCertificate, VerificationPayload};
use serde::Serialize;

/// Lowest score classified as original.
pub const ORIGINAL_THRESHOLD: u32 = 80;
/// Lowest score classified as suspicious.
pub const SUSPICIOUS_THRESHOLD: u32 = 40;
/// Score reported by a successful direct-ID lookup.
pub const ID_LOOKUP_SCORE: u32 = 100;

pub const ORIGINAL_MESSAGE: &str =
    "✅ ORIGINAL CERTIFICATE - This certificate matches our registered records.";
pub const SUSPICIOUS_MESSAGE: &str =
    "⚠️ SUSPICIOUS CERTIFICATE - Data partially matches but contains discrepancies.";
pub const NOT_FOUND_MESSAGE: &str =
    "❌ NOT FOUND - This certificate is not registered in our blockchain.";
pub const EMPTY_REGISTRY_MESSAGE: &str =
    "No registered certificates found in the system. Please contact administrator.";
pub const ID_FOUND_MESSAGE: &str = "✅ ORIGINAL - Certificate ID found in blockchain registry.";
pub const ID_NOT_FOUND_MESSAGE: &str =
    "❌ NOT FOUND - No certificate with this ID exists in our records.";

/// Three-way classification of a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Original,
    Suspicious,
    NotFound,
}

impl Verdict {
    /// Band a best score.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        if score >= ORIGINAL_THRESHOLD {
            Self::Original
        } else if score >= SUSPICIOUS_THRESHOLD {
            Self::Suspicious
        } else {
            Self::NotFound
        }
    }

    /// Status reported to the caller.
    #[must_use]
    pub const fn payload_status(&self) -> PayloadStatus {
        match self {
            Self::Original => PayloadStatus::Original,
            Self::Suspicious => PayloadStatus::Fake,
            Self::NotFound => PayloadStatus::NoMatch,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Original => ORIGINAL_MESSAGE,
            Self::Suspicious => SUSPICIOUS_MESSAGE,
            Self::NotFound => NOT_FOUND_MESSAGE,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Suspicious => "suspicious",
            Self::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assemble the caller-facing payload for an image-based verification.
pub fn classify(result: MatchResult, extracted: ExtractedFields) -> VerificationPayload {
    if result.is_empty_registry() {
        return VerificationPayload {
            is_original: false,
            status: PayloadStatus::NoMatch,
            match_score: 0,
            matched_certificate: None,
            message: EMPTY_REGISTRY_MESSAGE.to_string(),
            extracted_data: Some(extracted),
            differences: None,
        };
    }

    let score = result.best_score;
    // A verdict above "not found" always has a candidate, since the score is > 0.
    let verdict = match (&result.matched, Verdict::from_score(score)) {
        (None, _) => Verdict::NotFound,
        (Some(_), verdict) => verdict,
    };

    let (matched_certificate, differences) = match verdict {
        Verdict::Original => (
            result.matched,
            Some(result.discrepancies).filter(|d| !d.is_empty()),
        ),
        Verdict::Suspicious => (result.matched, Some(result.discrepancies)),
        Verdict::NotFound => (None, None),
    };

    VerificationPayload {
        is_original: verdict == Verdict::Original,
        status: verdict.payload_status(),
        match_score: score,
        matched_certificate,
        message: verdict.message().to_string(),
        extracted_data: Some(extracted),
        differences,
    }
}

/// Payload for a direct-ID lookup.
pub fn classify_lookup(found: Option<RegisteredCertificate>) -> VerificationPayload {
    match found {
        Some(record) => VerificationPayload {
            is_original: true,
            status: PayloadStatus::Original,
            match_score: ID_LOOKUP_SCORE,
            matched_certificate: Some(record),
            message: ID_FOUND_MESSAGE.to_string(),
            extracted_data: None,
            differences: None,
        },
        None => VerificationPayload {
            is_original: false,
            status: PayloadStatus::NoMatch,
            match_score: 0,
            matched_certificate: None,
            message: ID_NOT_FOUND_MESSAGE.to_string(),
            extracted_data: None,
            differences: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewCertificate;

    fn result_with(score: u32, discrepancies: Vec<String>) -> MatchResult {
        MatchResult {
            best_score: score,
            matched: (score > 0).then(|| {
                RegisteredCertificate::from_new(
                    "rec_000001",
                    NewCertificate::new("CERT_1", "Priya", "Anna University", "Civil"),
                )
            }),
            breakdown: None,
            discrepancies,
            candidates_scored: 1,
        }
    }

    #[test]
    fn test_bands() {
        assert_eq!(Verdict::from_score(100), Verdict::Original);
        assert_eq!(Verdict::from_score(80), Verdict::Original);
        assert_eq!(Verdict::from_score(79), Verdict::Suspicious);
        assert_eq!(Verdict::from_score(40), Verdict::Suspicious);
        assert_eq!(Verdict::from_score(39), Verdict::NotFound);
        assert_eq!(Verdict::from_score(0), Verdict::NotFound);
    }

    #[test]
    fn test_original_omits_empty_differences() {
        let payload = classify(result_with(100, Vec::new()), ExtractedFields::default());
        assert!(payload.is_original);
        assert_eq!(payload.status, PayloadStatus::Original);
        assert!(payload.differences.is_none());
        assert!(payload.matched_certificate.is_some());
    }

    #[test]
    fn test_original_keeps_fuzzy_differences() {
        let payload = classify(
            result_with(80, vec!["Name differs: \"a\" vs \"b\"".into()]),
            ExtractedFields::default(),
        );
        assert!(payload.is_original);
        assert_eq!(payload.differences().len(), 1);
    }

    #[test]
    fn test_suspicious_always_has_differences() {
        let payload = classify(result_with(79, Vec::new()), ExtractedFields::default());
        assert_eq!(payload.status, PayloadStatus::Fake);
        assert!(!payload.is_original);
        assert_eq!(payload.differences, Some(Vec::new()));
        assert!(payload.matched_certificate.is_some());
    }

    #[test]
    fn test_low_score_drops_candidate() {
        let payload = classify(result_with(39, vec!["x".into()]), ExtractedFields::default());
        assert_eq!(payload.status, PayloadStatus::NoMatch);
        assert_eq!(payload.match_score, 39);
        assert!(payload.matched_certificate.is_none());
        assert!(payload.differences.is_none());
        assert_eq!(payload.message, NOT_FOUND_MESSAGE);
        assert!(payload.extracted_data.is_some());
    }

    #[test]
    fn test_empty_registry_message_is_distinct() {
        let payload = classify(MatchResult::empty_registry(), ExtractedFields::default());
        assert_eq!(payload.status, PayloadStatus::NoMatch);
        assert_eq!(payload.match_score, 0);
        assert_eq!(payload.message, EMPTY_REGISTRY_MESSAGE);
        assert_ne!(payload.message, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_lookup_payloads() {
        let hit = classify_lookup(Some(RegisteredCertificate::from_new(
            "rec_000001",
            NewCertificate::new("CERT_1", "n", "i", "d"),
        )));
        assert_eq!(hit.match_score, 100);
        assert_eq!(hit.message, ID_FOUND_MESSAGE);
        let miss = classify_lookup(None);
        assert_eq!(miss.match_score, 0);
        assert_eq!(miss.status, PayloadStatus::NoMatch);
    }
}
