//! Registered certificate records.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a registered certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    /// Eligible for matching and direct-ID lookup
    #[default]
    Active,
    /// Withdrawn by an operator; never matched
    #[serde(alias = "inactive")]
    Revoked,
}

impl CertificateStatus {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Revoked => write!(f, "revoked"),
        }
    }
}

/// A certificate stored in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredCertificate {
    /// Storage-assigned identifier
    pub id: String,
    /// External certificate identifier (not guaranteed unique)
    pub certificate_id: String,
    pub holder_name: String,
    pub institution: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub start_year: String,
    #[serde(default)]
    pub end_year: String,
    /// Content-addressed reference to the stored image (`sha256:<hex>`)
    #[serde(default)]
    pub image_ref: Option<String>,
    /// Full OCR text captured at registration
    #[serde(default)]
    pub extracted_text: String,
    #[serde(default)]
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: CertificateStatus,
}

impl RegisteredCertificate {
    /// Materialize a new record with a storage-assigned id.
    #[must_use]
    pub fn from_new(id: impl Into<String>, new: NewCertificate) -> Self {
        Self {
            id: id.into(),
            certificate_id: new.certificate_id,
            holder_name: new.holder_name,
            institution: new.institution,
            department: new.department,
            start_year: new.start_year,
            end_year: new.end_year,
            image_ref: new.image_ref,
            extracted_text: new.extracted_text,
            created_by: new.created_by,
            created_at: Utc::now(),
            status: new.status,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// A certificate about to be inserted; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCertificate {
    pub certificate_id: String,
    pub holder_name: String,
    pub institution: String,
    pub department: String,
    pub start_year: String,
    pub end_year: String,
    pub image_ref: Option<String>,
    pub extracted_text: String,
    pub created_by: String,
    pub status: CertificateStatus,
}

impl NewCertificate {
    /// Minimal active record with the four matchable fields.
    #[must_use]
    pub fn new(
        certificate_id: impl Into<String>,
        holder_name: impl Into<String>,
        institution: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            certificate_id: certificate_id.into(),
            holder_name: holder_name.into(),
            institution: institution.into(),
            department: department.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: CertificateStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_years(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_year = start.into();
        self.end_year = end.into();
        self
    }
}
