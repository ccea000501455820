//! Registry persistence and registration workflow tests.

use certchain::error::{AuthErrorKind, CertError, Result, StorageErrorKind};
use certchain::model::{
    CertificateStatus, ExtractedFields, ImageUpload, NewCertificate, PayloadStatus,
};
use certchain::ocr::{OcrExtractor, UnavailableExtractor};
use certchain::registry::Registrar;
use certchain::session::{Session, UserDirectory};
use certchain::store::{CertificateStore, JsonFileStore};
use certchain::verify::VerificationEngine;
use std::sync::Arc;
use tempfile::TempDir;

struct FixedExtractor(ExtractedFields);

impl OcrExtractor for FixedExtractor {
    fn extract(&self, _image: &ImageUpload) -> Result<ExtractedFields> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "Fixed"
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn admin() -> Session {
    UserDirectory::default().login("admin", "1234").unwrap()
}

fn uploader() -> Session {
    UserDirectory::default().login("akshyaa", "secret").unwrap()
}

fn scan() -> ImageUpload {
    ImageUpload::new("image/jpeg", b"\xff\xd8\xff certificate".to_vec(), 4096).unwrap()
}

fn extracted() -> ExtractedFields {
    let mut fields = ExtractedFields::default()
        .with_holder_name("Karthik Raja")
        .with_institution("PSG College of Technology")
        .with_certificate_id("PSG-2023-118")
        .with_department("Electronics");
    fields.start_date = Some("2019-07-01".to_string());
    fields.end_date = Some("2023-05-30".to_string());
    fields.raw_text = Some("PSG College of Technology ... Karthik Raja".to_string());
    fields
}

mod persistence {
    use super::*;

    #[test]
    fn records_survive_reopening() {
        let tmp = TempDir::new().unwrap();
        {
            let store = JsonFileStore::new(tmp.path());
            store
                .insert_certificate(NewCertificate::new("A-1", "Ann", "MIT", "CS"))
                .unwrap();
            store
                .insert_certificate(NewCertificate::new("A-2", "Bob", "MIT", "EE"))
                .unwrap();
        }

        let reopened = JsonFileStore::new(tmp.path());
        let all = reopened.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].certificate_id, "A-1");
        assert_eq!(all[1].id, "rec_000002");
    }

    #[test]
    fn ids_keep_counting_after_reopen() {
        let tmp = TempDir::new().unwrap();
        JsonFileStore::new(tmp.path())
            .insert_certificate(NewCertificate::new("A-1", "Ann", "MIT", "CS"))
            .unwrap();
        let id = JsonFileStore::new(tmp.path())
            .insert_certificate(NewCertificate::new("A-2", "Bob", "MIT", "EE"))
            .unwrap();
        assert_eq!(id, "rec_000002");
    }

    #[test]
    fn corrupt_registry_is_a_storage_error() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path());
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(
            store.list_active(),
            Err(CertError::Storage {
                source: StorageErrorKind::Corrupt(_),
                ..
            })
        ));
    }

    #[test]
    fn verification_against_corrupt_registry_fails() {
        let tmp = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::new(tmp.path()));
        std::fs::write(store.path(), "[]]").unwrap();
        let engine = VerificationEngine::new(store, Arc::new(UnavailableExtractor::default()));

        assert!(engine.verify_extracted(extracted()).is_err());
    }

    #[test]
    fn audit_entries_are_persisted() {
        let tmp = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::new(tmp.path()));
        store
            .insert_certificate(NewCertificate::new(
                "PSG-2023-118",
                "Karthik Raja",
                "PSG College of Technology",
                "Electronics",
            ))
            .unwrap();
        let engine = VerificationEngine::new(store, Arc::new(UnavailableExtractor::default()));
        engine.verify_extracted(extracted()).unwrap();

        let logs = JsonFileStore::new(tmp.path())
            .list_verification_logs()
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].result, PayloadStatus::Original);
        assert_eq!(logs[0].certificate_id.as_deref(), Some("rec_000001"));
    }
}

mod registration {
    use super::*;

    fn registrar(tmp: &TempDir) -> (Registrar, Arc<JsonFileStore>) {
        let store = Arc::new(JsonFileStore::new(tmp.path()));
        let registrar = Registrar::new(store.clone(), Arc::new(FixedExtractor(extracted())));
        (registrar, store)
    }

    #[test]
    fn admin_registers_from_image() {
        let tmp = TempDir::new().unwrap();
        let (registrar, store) = registrar(&tmp);

        let record = registrar.register_image(&admin(), &scan(), None).unwrap();

        assert_eq!(record.certificate_id, "PSG-2023-118");
        assert_eq!(record.holder_name, "Karthik Raja");
        assert_eq!(record.start_year, "2019-07-01");
        assert_eq!(record.end_year, "2023-05-30");
        assert_eq!(record.created_by, "admin");
        assert_eq!(record.status, CertificateStatus::Active);
        assert!(record.image_ref.as_deref().unwrap().starts_with("sha256:"));
        assert!(record.extracted_text.contains("Karthik Raja"));
        assert_eq!(store.list_active().unwrap().len(), 1);
    }

    #[test]
    fn manual_id_takes_precedence() {
        let tmp = TempDir::new().unwrap();
        let (registrar, _) = registrar(&tmp);

        let record = registrar
            .register_image(&admin(), &scan(), Some("  MANUAL-7 "))
            .unwrap();
        assert_eq!(record.certificate_id, "MANUAL-7");
    }

    #[test]
    fn uploader_cannot_register() {
        let tmp = TempDir::new().unwrap();
        let (registrar, store) = registrar(&tmp);

        let result = registrar.register_image(&uploader(), &scan(), None);

        assert!(matches!(
            result,
            Err(CertError::Auth {
                source: AuthErrorKind::Forbidden { .. },
                ..
            })
        ));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn revoke_and_reinstate_drive_lookup() {
        let tmp = TempDir::new().unwrap();
        let (registrar, store) = registrar(&tmp);
        let record = registrar.register_image(&admin(), &scan(), None).unwrap();
        let engine = VerificationEngine::new(store, Arc::new(UnavailableExtractor::default()));

        registrar.revoke(&admin(), &record.id).unwrap();
        assert_eq!(
            engine.lookup_by_id("psg-2023-118").unwrap().status,
            PayloadStatus::NoMatch
        );

        registrar.reinstate(&admin(), &record.id).unwrap();
        assert_eq!(
            engine.lookup_by_id("psg-2023-118").unwrap().status,
            PayloadStatus::Original
        );

        let stats = registrar.stats().unwrap();
        assert_eq!(stats.total_certificates, 1);
        assert_eq!(stats.active_certificates, 1);
        assert_eq!(stats.total_verifications, 0);
    }

    #[test]
    fn revoking_unknown_record_fails() {
        let tmp = TempDir::new().unwrap();
        let (registrar, _) = registrar(&tmp);
        assert!(matches!(
            registrar.revoke(&admin(), "rec_999999"),
            Err(CertError::Storage {
                source: StorageErrorKind::NotFound(_),
                ..
            })
        ));
    }
}
