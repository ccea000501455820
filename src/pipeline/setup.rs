//! Construction of the store, extractor and engines from configuration.

use super::PipelineError;
use crate::config::{AppConfig, OcrConfig, StorageBackend, StorageConfig};
use crate::ocr::{OcrExtractor, UnavailableExtractor};
use crate::registry::Registrar;
use crate::store::{CertificateStore, InMemoryStore, JsonFileStore};
use crate::verify::{AuditLogger, VerificationEngine};
use std::sync::Arc;

/// Open the configured registry store.
pub fn open_store(config: &StorageConfig) -> Arc<dyn CertificateStore> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::debug!("Using in-memory registry");
            Arc::new(InMemoryStore::new())
        }
        StorageBackend::Json => {
            let dir = config
                .data_dir
                .clone()
                .unwrap_or_else(super::dirs::data_dir);
            let store = JsonFileStore::new(&dir);
            tracing::debug!("Using registry file {}", store.path().display());
            Arc::new(store)
        }
    }
}

/// Build the OCR extractor.
///
/// Without an API key (or without the `ocr` feature) the returned extractor
/// fails every call, so image verification reports an error instead of a
/// not-found verdict.
pub fn build_extractor(config: &OcrConfig) -> Result<Arc<dyn OcrExtractor>, PipelineError> {
    if let Some(extractor) = remote_extractor(config)? {
        return Ok(extractor);
    }

    tracing::debug!("OCR not configured; set {} to enable it", config.api_key_env);
    Ok(Arc::new(UnavailableExtractor::new(config.api_key_env.clone())))
}

#[cfg(feature = "ocr")]
fn remote_extractor(config: &OcrConfig) -> Result<Option<Arc<dyn OcrExtractor>>, PipelineError> {
    use crate::ocr::{OcrClient, OcrClientConfig};

    let Some(api_key) = config.api_key() else {
        return Ok(None);
    };
    let client = OcrClient::new(OcrClientConfig {
        api_base: config.api_base.clone(),
        model: config.model.clone(),
        api_key: Some(api_key),
        api_key_env: config.api_key_env.clone(),
        timeout: config.timeout(),
    })
    .map_err(|source| PipelineError::SetupFailed {
        component: "OCR client",
        source,
    })?;
    tracing::debug!("Using OCR model {} at {}", config.model, config.api_base);
    Ok(Some(Arc::new(client)))
}

#[cfg(not(feature = "ocr"))]
#[allow(clippy::unnecessary_wraps)]
fn remote_extractor(_config: &OcrConfig) -> Result<Option<Arc<dyn OcrExtractor>>, PipelineError> {
    Ok(None)
}

/// Build the verification engine with the configured audit behavior.
pub fn build_engine(
    config: &AppConfig,
    store: Arc<dyn CertificateStore>,
) -> Result<VerificationEngine, PipelineError> {
    let extractor = build_extractor(&config.ocr)?;
    let logger = AuditLogger::new(Arc::clone(&store), config.verification.audit_timeout())
        .enabled(config.verification.log_verifications);
    Ok(VerificationEngine::new(store, extractor).with_logger(logger))
}

/// Build the registrar.
pub fn build_registrar(
    config: &AppConfig,
    store: Arc<dyn CertificateStore>,
) -> Result<Registrar, PipelineError> {
    let extractor = build_extractor(&config.ocr)?;
    Ok(Registrar::new(store, extractor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExtractedFields;
    use tempfile::TempDir;

    #[test]
    fn test_open_json_store_in_data_dir() {
        let tmp = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::Json,
            data_dir: Some(tmp.path().to_path_buf()),
        };
        let store = open_store(&config);
        assert_eq!(store.name(), "json");
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_engine_without_key_is_unavailable() {
        let config = AppConfig::builder()
            .storage_backend(StorageBackend::Memory)
            .build();
        let mut ocr = config.ocr.clone();
        ocr.api_key_env = "CERTCHAIN_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        let extractor = build_extractor(&ocr).unwrap();
        assert!(!extractor.is_available());

        let engine = build_engine(&config, open_store(&config.storage)).unwrap();
        let payload = engine.verify_extracted(ExtractedFields::default()).unwrap();
        assert_eq!(payload.match_score, 0);
    }
}
