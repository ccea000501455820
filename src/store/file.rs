//! Registry persisted as one JSON document.

use super::{CertificateStore, RegistryData};
use crate::error::{CertError, Result, StorageErrorKind};
use crate::model::{
    CertificateStatus, NewCertificate, RegisteredCertificate, VerificationLogEntry,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name of the registry document inside the data directory.
pub const REGISTRY_FILE_NAME: &str = "registry.json";

/// JSON-file registry.
///
/// Every operation reads the document, and mutations rewrite it through a
/// temporary file followed by a rename. A missing file is an empty registry.
/// The mutex serializes writers within one process only.
pub struct JsonFileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileStore {
    /// Open (without creating) the registry under `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::at_path(data_dir.as_ref().join(REGISTRY_FILE_NAME))
    }

    /// Use an explicit document path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Path of the registry document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<RegistryData> {
        if !self.path.exists() {
            return Ok(RegistryData::default());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| {
            CertError::storage(
                format!("reading {}", self.path.display()),
                StorageErrorKind::ReadFailed(e.to_string()),
            )
        })?;
        if text.trim().is_empty() {
            return Ok(RegistryData::default());
        }
        serde_json::from_str(&text).map_err(|e| {
            CertError::storage(
                format!("parsing {}", self.path.display()),
                StorageErrorKind::Corrupt(e.to_string()),
            )
        })
    }

    fn save(&self, data: &RegistryData) -> Result<()> {
        let write_failed = |e: &dyn std::fmt::Display| {
            CertError::storage(
                format!("writing {}", self.path.display()),
                StorageErrorKind::WriteFailed(e.to_string()),
            )
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| write_failed(&e))?;
        }
        let json = serde_json::to_string_pretty(data).map_err(|e| write_failed(&e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| write_failed(&e))?;
        fs::rename(&tmp, &self.path).map_err(|e| write_failed(&e))
    }

    /// Load, mutate and save under the writer lock.
    fn update<T>(&self, f: impl FnOnce(&mut RegistryData) -> Result<T>) -> Result<T> {
        let _lock = self.guard.lock().map_err(|_| {
            CertError::storage(
                format!("locking {}", self.path.display()),
                StorageErrorKind::WriteFailed("lock poisoned".into()),
            )
        })?;
        let mut data = self.load()?;
        let value = f(&mut data)?;
        self.save(&data)?;
        Ok(value)
    }
}

impl CertificateStore for JsonFileStore {
    fn list_active(&self) -> Result<Vec<RegisteredCertificate>> {
        Ok(self.load()?.list_active())
    }

    fn find_by_cert_id(
        &self,
        cert_id: &str,
        case_insensitive: bool,
    ) -> Result<Option<RegisteredCertificate>> {
        Ok(self.load()?.find_by_cert_id(cert_id, case_insensitive))
    }

    fn insert_certificate(&self, record: NewCertificate) -> Result<String> {
        self.update(|data| Ok(data.insert(record)))
    }

    fn insert_verification_log(&self, entry: VerificationLogEntry) -> Result<()> {
        self.update(|data| {
            data.verification_logs.push(entry);
            Ok(())
        })
    }

    fn list_all(&self) -> Result<Vec<RegisteredCertificate>> {
        Ok(self.load()?.certificates)
    }

    fn set_status(&self, id: &str, status: CertificateStatus) -> Result<RegisteredCertificate> {
        self.update(|data| {
            data.set_status(id, status).ok_or_else(|| {
                CertError::storage("updating status", StorageErrorKind::NotFound(id.to_string()))
            })
        })
    }

    fn list_verification_logs(&self) -> Result<Vec<VerificationLogEntry>> {
        Ok(self.load()?.verification_logs)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
