use crate::error::Result;
use crate::model::PayloadStatus;
use crate::store::CertificateStore;
use serde::Serialize;

/// Registry and audit-log counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total_certificates: usize,
    pub active_certificates: usize,
    pub revoked_certificates: usize,
    pub total_verifications: usize,
    pub original_verdicts: usize,
    pub fake_verdicts: usize,
    pub no_match_verdicts: usize,
}

impl RegistryStats {
    pub fn collect(store: &dyn CertificateStore) -> Result<Self> {
        let mut stats = Self::default();
        for record in store.list_all()? {
            stats.total_certificates += 1;
            if record.is_active() {
                stats.active_certificates += 1;
            } else {
                stats.revoked_certificates += 1;
            }
        }
        for entry in store.list_verification_logs()? {
            stats.total_verifications += 1;
            match entry.result {
                PayloadStatus::Original => stats.original_verdicts += 1,
                PayloadStatus::Fake => stats.fake_verdicts += 1,
                PayloadStatus::NoMatch => stats.no_match_verdicts += 1,
            }
        }
        Ok(stats)
    }
}
