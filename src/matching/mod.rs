//! Verification-matching engine.
//!
//! Scores OCR-extracted fields against registered certificates and keeps the
//! best candidate.
//!
//! # Architecture
//!
//! - [`normalize`] and [`similarity`]: text canonicalization and the
//!   character-overlap heuristic.
//! - [`compare_field`]: one field under one [`FieldRule`] (exact, contains,
//!   fuzzy or mismatch), producing points and a discrepancy message.
//! - [`CertificateMatcher`]: the scoring seam; its `find_best_match` runs the
//!   selection scan with a first-seen tie-break.
//! - [`FieldMatcher`]: the production matcher over [`FIELD_RULES`].
//!
//! # Example
//!
//! ```
//! use certchain::matching::{CertificateMatcher, FieldMatcher};
//! use certchain::model::{ExtractedFields, NewCertificate, RegisteredCertificate};
//!
//! let record = RegisteredCertificate::from_new(
//!     "rec_000001",
//!     NewCertificate::new("CERT_2024_002", "Priya Sharma", "Anna University", "Mechanical Engineering"),
//! );
//! let extracted = ExtractedFields::default()
//!     .with_holder_name("Priya Sharma")
//!     .with_institution("Anna University")
//!     .with_certificate_id("CERT_2024_002")
//!     .with_department("Mechanical Engineering");
//!
//! let result = FieldMatcher::new().find_best_match(&extracted, &[record]);
//! assert_eq!(result.best_score, 100);
//! assert!(result.discrepancies.is_empty());
//! ```

pub mod config;
pub mod scoring;
pub mod string_similarity;
mod traits;

pub use config::{CertField, FIELD_RULES, FieldRule, FuzzyTier, max_total_score};
pub use scoring::{CandidateScore, FieldComparison, FieldOutcome, compare_field};
pub use string_similarity::{normalize, similarity};
pub use traits::{CertificateMatcher, MatchResult};

use crate::model::{ExtractedFields, RegisteredCertificate};

/// Weighted per-field matcher.
#[derive(Debug, Clone)]
#[must_use]
pub struct FieldMatcher {
    rules: Vec<FieldRule>,
}

impl FieldMatcher {
    /// Matcher over the standard rule table.
    pub fn new() -> Self {
        Self {
            rules: FIELD_RULES.to_vec(),
        }
    }

    /// Matcher over a custom rule table, evaluated in the given order.
    pub fn with_rules(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// The rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CertificateMatcher for FieldMatcher {
    fn score(
        &self,
        extracted: &ExtractedFields,
        record: &RegisteredCertificate,
    ) -> CandidateScore {
        let comparisons = self
            .rules
            .iter()
            .map(|rule| {
                compare_field(
                    rule,
                    rule.field.extracted(extracted),
                    rule.field.registered(record),
                )
            })
            .collect();
        CandidateScore::from_comparisons(comparisons)
    }

    fn name(&self) -> &'static str {
        "FieldMatcher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewCertificate;

    fn priya() -> RegisteredCertificate {
        RegisteredCertificate::from_new(
            "rec_000002",
            NewCertificate::new(
                "CERT_2024_002",
                "Priya Sharma",
                "Anna University",
                "Mechanical Engineering",
            ),
        )
    }

    fn extracted(name: &str) -> ExtractedFields {
        ExtractedFields::default()
            .with_holder_name(name)
            .with_institution("Anna University")
            .with_certificate_id("CERT_2024_002")
            .with_department("Mechanical Engineering")
    }

    #[test]
    fn test_identical_record_scores_100() {
        let score = FieldMatcher::new().score(&extracted("Priya Sharma"), &priya());
        assert_eq!(score.total, 100);
        assert!(score.discrepancies().is_empty());
    }

    #[test]
    fn test_one_letter_typo_scores_80_with_discrepancy() {
        let score = FieldMatcher::new().score(&extracted("Priya Sharme"), &priya());
        assert_eq!(score.total, 80);
        assert_eq!(
            score.discrepancies(),
            vec!["Name differs: \"Priya Sharme\" vs \"Priya Sharma\"".to_string()]
        );
    }

    #[test]
    fn test_absent_fields_lower_ceiling_without_penalty() {
        let partial = ExtractedFields::default()
            .with_holder_name("Priya Sharma")
            .with_certificate_id("CERT_2024_002");
        let score = FieldMatcher::new().score(&partial, &priya());
        assert_eq!(score.total, 60);
        assert!(score.discrepancies().is_empty());
    }

    #[test]
    fn test_empty_registered_department_is_absent() {
        let mut record = priya();
        record.department = String::new();
        let score = FieldMatcher::new().score(&extracted("Priya Sharma"), &record);
        assert_eq!(score.total, 85);
        assert_eq!(score.comparisons[3].outcome, FieldOutcome::FieldAbsent);
    }

    #[test]
    fn test_best_match_keeps_breakdown_of_winner() {
        let result = FieldMatcher::new().find_best_match(&extracted("Priya Sharme"), &[priya()]);
        let breakdown = result.breakdown.unwrap();
        assert_eq!(
            breakdown.summary(),
            "Total: 80 (Name: 15, Institution: 25, Certificate ID: 25, Department: 15)"
        );
        assert!(breakdown.breakdown()[0].contains("fuzzy"));
    }

    #[test]
    fn test_custom_rule_table_order() {
        let matcher = FieldMatcher::with_rules(vec![config::DEPARTMENT_RULE]);
        let score = matcher.score(&extracted("Nobody"), &priya());
        assert_eq!(score.total, 15);
        assert_eq!(matcher.rules().len(), 1);
    }
}
