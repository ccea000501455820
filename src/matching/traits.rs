//! The matcher seam and best-candidate selection.

use super::scoring::CandidateScore;
use crate::model::{ExtractedFields, RegisteredCertificate};

/// Outcome of scanning the active registry for the best candidate.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct MatchResult {
    /// Highest candidate score seen (0 when nothing scored above zero)
    pub best_score: u32,
    /// The first record that reached `best_score`, if `best_score > 0`
    pub matched: Option<RegisteredCertificate>,
    /// Breakdown for the matched record
    pub breakdown: Option<CandidateScore>,
    /// Discrepancies for the matched record, in field evaluation order
    pub discrepancies: Vec<String>,
    /// Number of records scored
    pub candidates_scored: usize,
}

impl MatchResult {
    /// Result for an empty registry: nothing was scored.
    pub fn empty_registry() -> Self {
        Self::default()
    }

    /// Whether the registry held no active records at all.
    #[must_use]
    pub const fn is_empty_registry(&self) -> bool {
        self.candidates_scored == 0
    }

    /// Whether a record was retained as best candidate.
    #[must_use]
    pub const fn has_candidate(&self) -> bool {
        self.matched.is_some()
    }
}

/// Trait for certificate matching strategies.
///
/// Implementors score one extraction against one registered record; selection
/// of the best record is shared.
pub trait CertificateMatcher: Send + Sync {
    /// Score a single registered record against the extraction.
    fn score(&self, extracted: &ExtractedFields, record: &RegisteredCertificate)
    -> CandidateScore;

    /// Scan every record and keep the strictly highest score.
    ///
    /// Ties keep the record seen first, so the result depends only on the
    /// order of `records`. The scan never exits early. A record is only ever
    /// retained with a score above zero.
    fn find_best_match(
        &self,
        extracted: &ExtractedFields,
        records: &[RegisteredCertificate],
    ) -> MatchResult {
        if records.is_empty() {
            return MatchResult::empty_registry();
        }

        let mut best_score = 0;
        let mut best: Option<(&RegisteredCertificate, CandidateScore)> = None;

        for record in records {
            let candidate = self.score(extracted, record);
            tracing::debug!(
                record = %record.id,
                certificate_id = %record.certificate_id,
                score = candidate.total,
                "scored candidate"
            );
            if candidate.total > best_score {
                best_score = candidate.total;
                best = Some((record, candidate));
            }
        }

        match best {
            Some((record, candidate)) => MatchResult {
                best_score,
                matched: Some(record.clone()),
                discrepancies: candidate.discrepancies(),
                breakdown: Some(candidate),
                candidates_scored: records.len(),
            },
            None => MatchResult {
                candidates_scored: records.len(),
                ..MatchResult::default()
            },
        }
    }

    /// Get the name of this matcher for logging/debugging.
    fn name(&self) -> &'static str {
        "CertificateMatcher"
    }
}
