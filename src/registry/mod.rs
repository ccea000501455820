//! Certificate registration and lifecycle management.
//!
//! Registration runs the OCR collaborator over a certificate image and stores
//! the extracted fields as a new active record. Revocation takes a record out
//! of matching and direct-ID lookup without deleting it. Both are admin-only.

mod stats;

pub use stats::RegistryStats;

use crate::error::{CertError, InputErrorKind, Result};
use crate::model::{
    CertificateStatus, ExtractedFields, ImageUpload, NewCertificate, RegisteredCertificate,
};
use crate::ocr::OcrExtractor;
use crate::session::{Permission, Session};
use crate::store::CertificateStore;
use chrono::Utc;
use std::sync::Arc;

/// Placeholder for holder name and institution when OCR could not read them.
pub const UNKNOWN_FIELD: &str = "Unknown";

/// Registers and manages certificates on behalf of an operator session.
pub struct Registrar {
    store: Arc<dyn CertificateStore>,
    extractor: Arc<dyn OcrExtractor>,
}

impl Registrar {
    pub fn new(store: Arc<dyn CertificateStore>, extractor: Arc<dyn OcrExtractor>) -> Self {
        Self { store, extractor }
    }

    /// OCR an image and register the result.
    ///
    /// The permission check happens before the OCR call.
    pub fn register_image(
        &self,
        session: &Session,
        image: &ImageUpload,
        manual_cert_id: Option<&str>,
    ) -> Result<RegisteredCertificate> {
        session.require(Permission::Register)?;
        let extracted = self.extractor.extract(image)?;
        self.register_extracted(session, &extracted, Some(image), manual_cert_id)
    }

    /// Register already-extracted fields.
    pub fn register_extracted(
        &self,
        session: &Session,
        extracted: &ExtractedFields,
        image: Option<&ImageUpload>,
        manual_cert_id: Option<&str>,
    ) -> Result<RegisteredCertificate> {
        session.require(Permission::Register)?;

        let manual = match manual_cert_id {
            Some(id) if id.trim().is_empty() => {
                return Err(CertError::input(
                    "manual certificate id",
                    InputErrorKind::EmptyCertificateId,
                ));
            }
            Some(id) => Some(id.trim()),
            None => None,
        };

        let record = build_new_certificate(
            extracted,
            manual,
            image.map(ImageUpload::content_ref),
            session.username(),
            Utc::now().timestamp_millis(),
        );
        let cert_id = record.certificate_id.clone();
        let id = self.store.insert_certificate(record)?;
        tracing::info!(
            "Registered certificate {} as {} (by {})",
            cert_id,
            id,
            session.username()
        );

        self.store
            .list_all()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| {
                CertError::storage(
                    "reading back registered certificate",
                    crate::error::StorageErrorKind::NotFound(id),
                )
            })
    }

    /// Take a record out of matching and lookup.
    pub fn revoke(&self, session: &Session, id: &str) -> Result<RegisteredCertificate> {
        self.set_status(session, id, CertificateStatus::Revoked)
    }

    /// Return a revoked record to the active set.
    pub fn reinstate(&self, session: &Session, id: &str) -> Result<RegisteredCertificate> {
        self.set_status(session, id, CertificateStatus::Active)
    }

    fn set_status(
        &self,
        session: &Session,
        id: &str,
        status: CertificateStatus,
    ) -> Result<RegisteredCertificate> {
        session.require(Permission::Revoke)?;
        let record = self.store.set_status(id, status)?;
        tracing::info!(
            "Certificate {} ({}) is now {} (by {})",
            record.certificate_id,
            record.id,
            status,
            session.username()
        );
        Ok(record)
    }

    /// Counts over the registry and its audit log.
    pub fn stats(&self) -> Result<RegistryStats> {
        RegistryStats::collect(self.store.as_ref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Turn OCR output into a record ready for insertion.
///
/// The certificate id is the manual id if given, else the extracted id, else
/// `CERT_<unix millis>`. Holder name and institution fall back to
/// [`UNKNOWN_FIELD`]; department and years fall back to empty. Years carry the
/// extracted start and end dates as read.
#[must_use]
pub fn build_new_certificate(
    extracted: &ExtractedFields,
    manual_cert_id: Option<&str>,
    image_ref: Option<String>,
    created_by: &str,
    now_millis: i64,
) -> NewCertificate {
    let certificate_id = non_empty(manual_cert_id)
        .or_else(|| non_empty(extracted.certificate_id.as_deref()))
        .map_or_else(|| format!("CERT_{now_millis}"), str::to_string);

    let or_unknown = |v: &Option<String>| {
        non_empty(v.as_deref()).unwrap_or(UNKNOWN_FIELD).to_string()
    };
    let or_empty = |v: &Option<String>| non_empty(v.as_deref()).unwrap_or_default().to_string();

    NewCertificate {
        certificate_id,
        holder_name: or_unknown(&extracted.holder_name),
        institution: or_unknown(&extracted.institution),
        department: or_empty(&extracted.department),
        start_year: or_empty(&extracted.start_date),
        end_year: or_empty(&extracted.end_date),
        image_ref,
        extracted_text: extracted.raw_text.clone().unwrap_or_default(),
        created_by: created_by.to_string(),
        status: CertificateStatus::Active,
    }
}
