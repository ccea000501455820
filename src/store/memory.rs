//! Process-local registry.

use super::{CertificateStore, RegistryData};
use crate::error::{CertError, Result, StorageErrorKind};
use crate::model::{
    CertificateStatus, NewCertificate, RegisteredCertificate, VerificationLogEntry,
};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Registry held in memory behind a `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<RegistryData>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`, in order.
    pub fn with_certificates(records: impl IntoIterator<Item = NewCertificate>) -> Self {
        let mut data = RegistryData::default();
        for record in records {
            data.insert(record);
        }
        Self {
            data: RwLock::new(data),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RegistryData>> {
        self.data.read().map_err(|_| {
            CertError::storage(
                "in-memory registry",
                StorageErrorKind::ReadFailed("lock poisoned".into()),
            )
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RegistryData>> {
        self.data.write().map_err(|_| {
            CertError::storage(
                "in-memory registry",
                StorageErrorKind::WriteFailed("lock poisoned".into()),
            )
        })
    }
}

impl CertificateStore for InMemoryStore {
    fn list_active(&self) -> Result<Vec<RegisteredCertificate>> {
        Ok(self.read()?.list_active())
    }

    fn find_by_cert_id(
        &self,
        cert_id: &str,
        case_insensitive: bool,
    ) -> Result<Option<RegisteredCertificate>> {
        Ok(self.read()?.find_by_cert_id(cert_id, case_insensitive))
    }

    fn insert_certificate(&self, record: NewCertificate) -> Result<String> {
        Ok(self.write()?.insert(record))
    }

    fn insert_verification_log(&self, entry: VerificationLogEntry) -> Result<()> {
        self.write()?.verification_logs.push(entry);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<RegisteredCertificate>> {
        Ok(self.read()?.certificates.clone())
    }

    fn set_status(&self, id: &str, status: CertificateStatus) -> Result<RegisteredCertificate> {
        self.write()?.set_status(id, status).ok_or_else(|| {
            CertError::storage("updating status", StorageErrorKind::NotFound(id.to_string()))
        })
    }

    fn list_verification_logs(&self) -> Result<Vec<VerificationLogEntry>> {
        Ok(self.read()?.verification_logs.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PayloadStatus;
    use chrono::Utc;

    #[test]
    fn test_insert_and_list_active() {
        let store = InMemoryStore::new();
        let id = store
            .insert_certificate(NewCertificate::new("CERT_1", "A", "B", "C"))
            .unwrap();
        store
            .insert_certificate(
                NewCertificate::new("CERT_2", "A", "B", "C").with_status(CertificateStatus::Revoked),
            )
            .unwrap();

        let active = store.list_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, id);
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_set_status_unknown_id() {
        let store = InMemoryStore::new();
        let err = store.set_status("rec_999999", CertificateStatus::Revoked).unwrap_err();
        assert!(matches!(
            err,
            CertError::Storage {
                source: StorageErrorKind::NotFound(_),
                ..
            }
        ));
    }

    #[test]
    fn test_revoked_records_leave_matching_set() {
        let store =
            InMemoryStore::with_certificates([NewCertificate::new("CERT_1", "A", "B", "C")]);
        store.set_status("rec_000001", CertificateStatus::Revoked).unwrap();
        assert!(store.list_active().unwrap().is_empty());
        assert!(store.find_by_cert_id("cert_1", true).unwrap().is_none());

        store.set_status("rec_000001", CertificateStatus::Active).unwrap();
        assert!(store.find_by_cert_id("cert_1", true).unwrap().is_some());
    }

    #[test]
    fn test_logs_keep_order() {
        let store = InMemoryStore::new();
        for score in [10, 50, 90] {
            store
                .insert_verification_log(VerificationLogEntry {
                    certificate_id: None,
                    result: PayloadStatus::NoMatch,
                    confidence_score: score,
                    extracted_data: None,
                    differences: Vec::new(),
                    created_at: Utc::now(),
                })
                .unwrap();
        }
        let scores: Vec<u32> = store
            .list_verification_logs()
            .unwrap()
            .iter()
            .map(|e| e.confidence_score)
            .collect();
        assert_eq!(scores, vec![10, 50, 90]);
    }
}
