//! Field comparison and per-candidate score breakdowns.

use super::config::{CertField, FieldRule};
use super::string_similarity::{contains_either, normalize, similarity};
use serde::Serialize;

/// How one field compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOutcome {
    ExactMatch,
    ContainsMatch,
    FuzzyMatch,
    Mismatch,
    /// One side had no value; contributes nothing and is not a mismatch
    FieldAbsent,
}

impl FieldOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExactMatch => "exact",
            Self::ContainsMatch => "contains",
            Self::FuzzyMatch => "fuzzy",
            Self::Mismatch => "mismatch",
            Self::FieldAbsent => "absent",
        }
    }
}

/// Result of comparing one field of an extraction against one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldComparison {
    pub field: CertField,
    pub outcome: FieldOutcome,
    pub points: u32,
    /// Similarity, when the fuzzy tier was consulted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discrepancy: Option<String>,
}

impl FieldComparison {
    fn absent(field: CertField) -> Self {
        Self {
            field,
            outcome: FieldOutcome::FieldAbsent,
            points: 0,
            similarity: None,
            discrepancy: None,
        }
    }
}

/// Format a discrepancy the way operators read them in audit logs.
fn discrepancy(field: CertField, relation: &str, extracted: &str, registered: &str) -> String {
    format!(
        "{} {relation}: \"{extracted}\" vs \"{registered}\"",
        field.label()
    )
}

/// Compare one field under `rule`.
///
/// Absent or empty on either side contributes 0 and records nothing. Otherwise
/// both sides are normalized and tried, in order, for equality, containment
/// in either direction, and the fuzzy tier. Fuzzy matches earn points but are
/// always flagged; mismatches earn nothing and are flagged.
///
/// The emptiness check runs on the raw values. A value made only of
/// punctuation or whitespace (e.g. `"---"`) normalizes to `""`, which is
/// contained in every string, so it earns the contains points.
#[must_use]
pub fn compare_field(
    rule: &FieldRule,
    extracted: Option<&str>,
    registered: Option<&str>,
) -> FieldComparison {
    let (Some(extracted), Some(registered)) = (extracted, registered) else {
        return FieldComparison::absent(rule.field);
    };
    if extracted.is_empty() || registered.is_empty() {
        return FieldComparison::absent(rule.field);
    }

    let norm_extracted = normalize(extracted);
    let norm_registered = normalize(registered);

    if norm_extracted == norm_registered {
        return FieldComparison {
            field: rule.field,
            outcome: FieldOutcome::ExactMatch,
            points: rule.exact_points,
            similarity: None,
            discrepancy: None,
        };
    }

    if contains_either(&norm_extracted, &norm_registered) {
        return FieldComparison {
            field: rule.field,
            outcome: FieldOutcome::ContainsMatch,
            points: rule.contains_points,
            similarity: None,
            discrepancy: rule.contains_flagged.then(|| {
                discrepancy(rule.field, rule.fuzzy_relation, extracted, registered)
            }),
        };
    }

    if let Some(tier) = rule.fuzzy {
        let sim = similarity(&norm_extracted, &norm_registered);
        if sim > tier.threshold {
            return FieldComparison {
                field: rule.field,
                outcome: FieldOutcome::FuzzyMatch,
                points: tier.points,
                similarity: Some(sim),
                discrepancy: Some(discrepancy(
                    rule.field,
                    rule.fuzzy_relation,
                    extracted,
                    registered,
                )),
            };
        }
        return FieldComparison {
            field: rule.field,
            outcome: FieldOutcome::Mismatch,
            points: 0,
            similarity: Some(sim),
            discrepancy: Some(discrepancy(
                rule.field,
                rule.mismatch_relation,
                extracted,
                registered,
            )),
        };
    }

    FieldComparison {
        field: rule.field,
        outcome: FieldOutcome::Mismatch,
        points: 0,
        similarity: None,
        discrepancy: Some(discrepancy(
            rule.field,
            rule.mismatch_relation,
            extracted,
            registered,
        )),
    }
}

/// Score of one registered record against one extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateScore {
    /// Sum of field points
    pub total: u32,
    /// One entry per rule, in evaluation order
    pub comparisons: Vec<FieldComparison>,
}

impl CandidateScore {
    /// Sum up a set of field comparisons.
    #[must_use]
    pub fn from_comparisons(comparisons: Vec<FieldComparison>) -> Self {
        let total = comparisons.iter().map(|c| c.points).sum();
        Self { total, comparisons }
    }

    /// Discrepancy messages in field evaluation order.
    #[must_use]
    pub fn discrepancies(&self) -> Vec<String> {
        self.comparisons
            .iter()
            .filter_map(|c| c.discrepancy.clone())
            .collect()
    }

    /// One line per field, for operator-facing breakdowns.
    #[must_use]
    pub fn breakdown(&self) -> Vec<String> {
        self.comparisons
            .iter()
            .map(|c| match c.similarity {
                Some(sim) => format!(
                    "{:<15} {:<9} {:>3} pts (similarity {:.2})",
                    c.field.label(),
                    c.outcome.as_str(),
                    c.points,
                    sim
                ),
                None => format!(
                    "{:<15} {:<9} {:>3} pts",
                    c.field.label(),
                    c.outcome.as_str(),
                    c.points
                ),
            })
            .collect()
    }

    /// Human-readable summary of the breakdown.
    #[must_use]
    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .comparisons
            .iter()
            .map(|c| format!("{}: {}", c.field.label(), c.points))
            .collect();
        format!("Total: {} ({})", self.total, parts.join(", "))
    }
}
