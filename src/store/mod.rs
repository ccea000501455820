//! Storage collaborator.
//!
//! [`CertificateStore`] is the seam between the verification engine and
//! wherever registered certificates and audit entries live. Two backends ship
//! with the crate:
//!
//! - [`InMemoryStore`]: process-local, used by tests and `storage.backend: memory`.
//! - [`JsonFileStore`]: a single JSON document under the data directory.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::error::Result;
use crate::model::{
    CertificateStatus, NewCertificate, RegisteredCertificate, VerificationLogEntry,
};
use serde::{Deserialize, Serialize};

/// Trait for certificate registries.
///
/// All methods take `&self`; implementations synchronize internally so a
/// store can be shared behind an `Arc` between the engine and the audit
/// logger.
pub trait CertificateStore: Send + Sync {
    /// Active records in registration order.
    fn list_active(&self) -> Result<Vec<RegisteredCertificate>>;

    /// First active record whose `certificate_id` equals `cert_id`.
    ///
    /// With `case_insensitive`, comparison ignores ASCII and Unicode case but is
    /// otherwise exact: no prefix or wildcard matching.
    fn find_by_cert_id(
        &self,
        cert_id: &str,
        case_insensitive: bool,
    ) -> Result<Option<RegisteredCertificate>>;

    /// Insert a record and return its storage-assigned id.
    fn insert_certificate(&self, record: NewCertificate) -> Result<String>;

    /// Append an audit entry.
    fn insert_verification_log(&self, entry: VerificationLogEntry) -> Result<()>;

    /// Every record regardless of status, in registration order.
    fn list_all(&self) -> Result<Vec<RegisteredCertificate>>;

    /// Change the lifecycle status of a record and return the updated record.
    fn set_status(&self, id: &str, status: CertificateStatus) -> Result<RegisteredCertificate>;

    /// Audit entries, oldest first.
    fn list_verification_logs(&self) -> Result<Vec<VerificationLogEntry>>;

    /// Get the name of this backend.
    fn name(&self) -> &'static str;
}

/// Serialized form shared by both backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RegistryData {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub certificates: Vec<RegisteredCertificate>,
    #[serde(default)]
    pub verification_logs: Vec<VerificationLogEntry>,
}

impl RegistryData {
    pub(crate) fn list_active(&self) -> Vec<RegisteredCertificate> {
        self.certificates
            .iter()
            .filter(|c| c.is_active())
            .cloned()
            .collect()
    }

    pub(crate) fn find_by_cert_id(
        &self,
        cert_id: &str,
        case_insensitive: bool,
    ) -> Option<RegisteredCertificate> {
        let wanted = cert_id.trim();
        let wanted_lower = wanted.to_lowercase();
        self.certificates
            .iter()
            .filter(|c| c.is_active())
            .find(|c| {
                if case_insensitive {
                    c.certificate_id.to_lowercase() == wanted_lower
                } else {
                    c.certificate_id == wanted
                }
            })
            .cloned()
    }

    pub(crate) fn insert(&mut self, record: NewCertificate) -> String {
        self.next_id += 1;
        let id = format!("rec_{:06}", self.next_id);
        self.certificates
            .push(RegisteredCertificate::from_new(id.clone(), record));
        id
    }

    pub(crate) fn set_status(
        &mut self,
        id: &str,
        status: CertificateStatus,
    ) -> Option<RegisteredCertificate> {
        let record = self.certificates.iter_mut().find(|c| c.id == id)?;
        record.status = status;
        Some(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_data_ids_are_sequential() {
        let mut data = RegistryData::default();
        let a = data.insert(NewCertificate::new("A", "n", "i", "d"));
        let b = data.insert(NewCertificate::new("B", "n", "i", "d"));
        assert_eq!(a, "rec_000001");
        assert_eq!(b, "rec_000002");
    }

    #[test]
    fn test_find_skips_revoked_and_prefixes() {
        let mut data = RegistryData::default();
        data.insert(
            NewCertificate::new("cert_2024_001", "n", "i", "d")
                .with_status(CertificateStatus::Revoked),
        );
        let active = data.insert(NewCertificate::new("cert_2024_001", "n", "i", "d"));

        let found = data.find_by_cert_id("CERT_2024_001", true).unwrap();
        assert_eq!(found.id, active);
        assert!(data.find_by_cert_id("CERT_2024_001", false).is_none());
        assert!(data.find_by_cert_id("CERT_2024", true).is_none());
    }
}
