//! Best-effort audit logging of verdicts.

use crate::model::{VerificationLogEntry, VerificationPayload};
use crate::store::CertificateStore;
use std::sync::{Arc, mpsc};
use std::time::Duration;

/// Outcome of one audit write, for callers and tests that care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    Written,
    Disabled,
    Failed(String),
    TimedOut,
}

/// Writes verification log entries without ever failing the verification.
///
/// The write runs on a helper thread and is abandoned after `timeout`; an
/// abandoned write may still land later. Failures are reported through
/// `tracing::warn!` and never retried.
#[derive(Clone)]
pub struct AuditLogger {
    store: Arc<dyn CertificateStore>,
    timeout: Duration,
    enabled: bool,
}

impl AuditLogger {
    pub fn new(store: Arc<dyn CertificateStore>, timeout: Duration) -> Self {
        Self {
            store,
            timeout,
            enabled: true,
        }
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Record the audit entry for `payload`.
    pub fn record(&self, payload: &VerificationPayload) -> AuditOutcome {
        if !self.enabled {
            return AuditOutcome::Disabled;
        }
        let entry = VerificationLogEntry::from_payload(payload);
        let store = Arc::clone(&self.store);
        let (tx, rx) = mpsc::channel();

        let spawned = std::thread::Builder::new()
            .name("certchain-audit".to_string())
            .spawn(move || {
                let result = store.insert_verification_log(entry);
                // The receiver is gone after a timeout.
                let _ = tx.send(result);
            });
        if let Err(e) = spawned {
            tracing::warn!("Could not start audit write: {e}");
            return AuditOutcome::Failed(e.to_string());
        }

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(())) => {
                tracing::debug!("Audit entry written ({})", payload.status);
                AuditOutcome::Written
            }
            Ok(Err(e)) => {
                tracing::warn!("Failed to write verification log: {e}");
                AuditOutcome::Failed(e.to_string())
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    "Verification log write timed out after {:?}",
                    self.timeout
                );
                AuditOutcome::TimedOut
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::warn!("Verification log writer stopped without a result");
                AuditOutcome::Failed("writer panicked".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CertError, Result, StorageErrorKind};
    use crate::model::{
        CertificateStatus, NewCertificate, PayloadStatus, RegisteredCertificate,
    };
    use crate::store::InMemoryStore;

    struct BrokenLogStore;

    impl CertificateStore for BrokenLogStore {
        fn list_active(&self) -> Result<Vec<RegisteredCertificate>> {
            Ok(Vec::new())
        }
        fn find_by_cert_id(&self, _: &str, _: bool) -> Result<Option<RegisteredCertificate>> {
            Ok(None)
        }
        fn insert_certificate(&self, _: NewCertificate) -> Result<String> {
            Ok(String::new())
        }
        fn insert_verification_log(&self, _: VerificationLogEntry) -> Result<()> {
            Err(CertError::storage(
                "audit",
                StorageErrorKind::WriteFailed("disk full".into()),
            ))
        }
        fn list_all(&self) -> Result<Vec<RegisteredCertificate>> {
            Ok(Vec::new())
        }
        fn set_status(&self, id: &str, _: CertificateStatus) -> Result<RegisteredCertificate> {
            Err(CertError::storage("status", StorageErrorKind::NotFound(id.into())))
        }
        fn list_verification_logs(&self) -> Result<Vec<VerificationLogEntry>> {
            Ok(Vec::new())
        }
        fn name(&self) -> &'static str {
            "broken"
        }
    }

    fn payload() -> VerificationPayload {
        VerificationPayload {
            is_original: false,
            status: PayloadStatus::NoMatch,
            match_score: 12,
            matched_certificate: None,
            message: String::new(),
            extracted_data: None,
            differences: None,
        }
    }

    #[test]
    fn test_writes_entry() {
        let store = Arc::new(InMemoryStore::new());
        let logger = AuditLogger::new(store.clone(), Duration::from_secs(5));
        assert_eq!(logger.record(&payload()), AuditOutcome::Written);
        let logs = store.list_verification_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].confidence_score, 12);
    }

    #[test]
    fn test_failure_is_reported_not_raised() {
        let logger = AuditLogger::new(Arc::new(BrokenLogStore), Duration::from_secs(5));
        assert!(matches!(logger.record(&payload()), AuditOutcome::Failed(_)));
    }

    #[test]
    fn test_disabled_logger_skips_write() {
        let store = Arc::new(InMemoryStore::new());
        let logger = AuditLogger::new(store.clone(), Duration::from_secs(5)).enabled(false);
        assert_eq!(logger.record(&payload()), AuditOutcome::Disabled);
        assert!(store.list_verification_logs().unwrap().is_empty());
    }
}
