//! Certificate verification.
//!
//! [`VerificationEngine`] runs one verification as a sequential unit:
//!
//! 1. OCR the uploaded image (skipped by [`VerificationEngine::verify_extracted`]).
//! 2. Fetch the active records from the store.
//! 3. Score every record and keep the best one.
//! 4. Classify the best score into a [`Verdict`] and build the payload.
//! 5. Hand the payload to the [`AuditLogger`].
//!
//! Any `Err` means no verdict was produced. OCR failures, storage read
//! failures and cancellation all surface this way, never as `no_match`.
//! Audit failures are logged and swallowed.
//!
//! [`VerificationEngine::lookup_by_id`] is the parallel direct-ID path: no OCR,
//! no scoring, and no audit entry.

mod cancel;
mod logger;
mod verdict;

pub use cancel::CancellationToken;
pub use logger::{AuditLogger, AuditOutcome};
pub use verdict::{
    EMPTY_REGISTRY_MESSAGE, ID_FOUND_MESSAGE, ID_LOOKUP_SCORE, ID_NOT_FOUND_MESSAGE,
    NOT_FOUND_MESSAGE, ORIGINAL_MESSAGE, ORIGINAL_THRESHOLD, SUSPICIOUS_MESSAGE,
    SUSPICIOUS_THRESHOLD, Verdict, classify, classify_lookup,
};

use crate::error::{CertError, ErrorContext, InputErrorKind, Result};
use crate::matching::{CertificateMatcher, FieldMatcher};
use crate::model::{ExtractedFields, ImageUpload, VerificationPayload};
use crate::ocr::OcrExtractor;
use crate::store::CertificateStore;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on the audit write.
pub const DEFAULT_AUDIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Orchestrates OCR, matching, classification and audit logging.
pub struct VerificationEngine {
    store: Arc<dyn CertificateStore>,
    extractor: Arc<dyn OcrExtractor>,
    matcher: Box<dyn CertificateMatcher>,
    logger: AuditLogger,
}

impl VerificationEngine {
    /// Engine with the standard field matcher and audit logging enabled.
    pub fn new(store: Arc<dyn CertificateStore>, extractor: Arc<dyn OcrExtractor>) -> Self {
        let logger = AuditLogger::new(Arc::clone(&store), DEFAULT_AUDIT_TIMEOUT);
        Self {
            store,
            extractor,
            matcher: Box::new(FieldMatcher::new()),
            logger,
        }
    }

    /// Replace the scoring strategy.
    #[must_use]
    pub fn with_matcher(mut self, matcher: Box<dyn CertificateMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Replace the audit logger.
    #[must_use]
    pub fn with_logger(mut self, logger: AuditLogger) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CertificateStore> {
        &self.store
    }

    /// Verify an uploaded certificate image.
    ///
    /// If `cancel` fires before OCR returns, nothing is scored or logged.
    pub fn verify_image(
        &self,
        image: &ImageUpload,
        cancel: &CancellationToken,
    ) -> Result<VerificationPayload> {
        cancel.check("before OCR")?;
        tracing::info!(
            "Verifying {} upload ({} bytes) with {}",
            image.media_type(),
            image.len(),
            self.extractor.name()
        );
        let extracted = self.extractor.extract(image)?;
        cancel.check("after OCR")?;
        self.verify_extracted(extracted)
    }

    /// Verify fields that were already extracted.
    pub fn verify_extracted(&self, extracted: ExtractedFields) -> Result<VerificationPayload> {
        let records = self
            .store
            .list_active()
            .context("fetching active certificates")?;

        if extracted.has_no_matchable_fields() {
            tracing::warn!("OCR returned no matchable fields; only raw text was extracted");
        }

        let result = self.matcher.find_best_match(&extracted, &records);
        tracing::debug!(
            "{} scored {} active records, best {}",
            self.matcher.name(),
            result.candidates_scored,
            result.best_score
        );
        if let Some(breakdown) = &result.breakdown {
            tracing::debug!("Best candidate {}", breakdown.summary());
            for line in breakdown.breakdown() {
                tracing::debug!("  {line}");
            }
        }

        let payload = classify(result, extracted);
        tracing::info!(
            "Verdict: {} (score {}{})",
            payload.status,
            payload.match_score,
            payload
                .matched_certificate
                .as_ref()
                .map(|c| format!(", matched {}", c.certificate_id))
                .unwrap_or_default()
        );

        self.logger.record(&payload);
        Ok(payload)
    }

    /// Case-insensitive exact lookup of a certificate id among active records.
    pub fn lookup_by_id(&self, cert_id: &str) -> Result<VerificationPayload> {
        let cert_id = cert_id.trim();
        if cert_id.is_empty() {
            return Err(CertError::input(
                "certificate id lookup",
                InputErrorKind::EmptyCertificateId,
            ));
        }
        let found = self
            .store
            .find_by_cert_id(cert_id, true)
            .with_context(|| format!("looking up certificate id {cert_id}"))?;
        tracing::info!(
            "Lookup of {}: {}",
            cert_id,
            if found.is_some() { "found" } else { "not found" }
        );
        Ok(classify_lookup(found))
    }
}
