//! Per-field comparison rules.
//!
//! Point values and fuzzy thresholds are fixed design constants. Together they
//! cap a candidate's score at 100 and place the verdict bands in
//! [`crate::verify`] at meaningful positions.

use crate::model::{ExtractedFields, RegisteredCertificate};
use serde::{Deserialize, Serialize};

/// The four fields that participate in matching, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertField {
    HolderName,
    Institution,
    CertificateId,
    Department,
}

impl CertField {
    /// Human-readable label used in discrepancy messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HolderName => "Name",
            Self::Institution => "Institution",
            Self::CertificateId => "Certificate ID",
            Self::Department => "Department",
        }
    }

    /// Value on the extracted side; empty strings count as absent.
    #[must_use]
    pub fn extracted<'a>(&self, fields: &'a ExtractedFields) -> Option<&'a str> {
        let value = match self {
            Self::HolderName => fields.holder_name.as_deref(),
            Self::Institution => fields.institution.as_deref(),
            Self::CertificateId => fields.certificate_id.as_deref(),
            Self::Department => fields.department.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Value on the registered side; empty strings count as absent.
    #[must_use]
    pub fn registered<'a>(&self, record: &'a RegisteredCertificate) -> Option<&'a str> {
        let value = match self {
            Self::HolderName => record.holder_name.as_str(),
            Self::Institution => record.institution.as_str(),
            Self::CertificateId => record.certificate_id.as_str(),
            Self::Department => record.department.as_str(),
        };
        (!value.is_empty()).then_some(value)
    }
}

impl std::fmt::Display for CertField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fuzzy tier: similarity strictly above `threshold` earns `points`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyTier {
    pub threshold: f64,
    pub points: u32,
}

/// Comparison rule for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub field: CertField,
    /// Points for equal normalized values
    pub exact_points: u32,
    /// Points when one normalized value contains the other
    pub contains_points: u32,
    /// Whether a containment match still records a discrepancy
    pub contains_flagged: bool,
    /// Fuzzy tier, if the field has one
    pub fuzzy: Option<FuzzyTier>,
    /// Relation word used for a fuzzy-tier discrepancy
    pub fuzzy_relation: &'static str,
    /// Relation word used for a mismatch discrepancy
    pub mismatch_relation: &'static str,
}

impl FieldRule {
    /// Points this rule can award at most.
    #[must_use]
    pub const fn max_points(&self) -> u32 {
        self.exact_points
    }
}

/// Holder name: 35 exact, 25 contains, >0.70 similarity for 15.
pub const HOLDER_NAME_RULE: FieldRule = FieldRule {
    field: CertField::HolderName,
    exact_points: 35,
    contains_points: 25,
    contains_flagged: false,
    fuzzy: Some(FuzzyTier {
        threshold: 0.70,
        points: 15,
    }),
    fuzzy_relation: "differs",
    mismatch_relation: "mismatch",
};

/// Institution: containment counts as exact (legal-suffix noise), >0.60 for 15.
pub const INSTITUTION_RULE: FieldRule = FieldRule {
    field: CertField::Institution,
    exact_points: 25,
    contains_points: 25,
    contains_flagged: false,
    fuzzy: Some(FuzzyTier {
        threshold: 0.60,
        points: 15,
    }),
    fuzzy_relation: "differs",
    mismatch_relation: "mismatch",
};

/// Certificate id: 25 exact, 15 contains (flagged), no fuzzy tier.
pub const CERTIFICATE_ID_RULE: FieldRule = FieldRule {
    field: CertField::CertificateId,
    exact_points: 25,
    contains_points: 15,
    contains_flagged: true,
    fuzzy: None,
    fuzzy_relation: "differs",
    mismatch_relation: "mismatch",
};

/// Department: containment counts as exact, everything else is a mismatch.
pub const DEPARTMENT_RULE: FieldRule = FieldRule {
    field: CertField::Department,
    exact_points: 15,
    contains_points: 15,
    contains_flagged: false,
    fuzzy: None,
    fuzzy_relation: "differs",
    mismatch_relation: "differs",
};

/// All rules in evaluation order; discrepancy messages follow this order.
pub const FIELD_RULES: [FieldRule; 4] = [
    HOLDER_NAME_RULE,
    INSTITUTION_RULE,
    CERTIFICATE_ID_RULE,
    DEPARTMENT_RULE,
];

/// Highest score a candidate can reach when every field is present and exact.
#[must_use]
pub fn max_total_score(rules: &[FieldRule]) -> u32 {
    rules.iter().map(FieldRule::max_points).sum()
}
