//! Configuration types for certchain.

use super::defaults;
use crate::reports::ReportFormat;
use crate::session::{LoginPolicy, UserRecord, seed_users};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration, loaded from a YAML file and overridden
/// by CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// OCR gateway settings
    pub ocr: OcrConfig,
    /// Where certificates and audit entries are kept
    pub storage: StorageConfig,
    /// Upload limits and audit behaviour
    pub verification: VerificationConfig,
    /// Operators and login rules
    pub auth: AuthConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn ocr_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.config.ocr.api_base = api_base.into();
        self
    }

    pub fn ocr_model(mut self, model: impl Into<String>) -> Self {
        self.config.ocr.model = model.into();
        self
    }

    pub const fn storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage.backend = backend;
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.storage.data_dir = Some(dir.into());
        self
    }

    pub const fn max_upload_bytes(mut self, bytes: u64) -> Self {
        self.config.verification.max_upload_bytes = bytes;
        self
    }

    pub const fn log_verifications(mut self, enabled: bool) -> Self {
        self.config.verification.log_verifications = enabled;
        self
    }

    pub fn admin_password(mut self, password: impl Into<String>) -> Self {
        self.config.auth.admin_password = password.into();
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// OCR gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OcrConfig {
    /// Base URL of the OpenAI-compatible gateway
    pub api_base: String,
    /// Vision model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::DEFAULT_OCR_API_BASE.to_string(),
            model: defaults::DEFAULT_OCR_MODEL.to_string(),
            timeout_secs: defaults::DEFAULT_OCR_TIMEOUT_SECS,
            api_key_env: defaults::DEFAULT_OCR_API_KEY_ENV.to_string(),
        }
    }
}

impl OcrConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the API key from the configured environment variable.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local; nothing survives the process
    Memory,
    /// JSON document under `data_dir`
    #[default]
    Json,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Data directory (defaults to the platform data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Verification configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct VerificationConfig {
    /// Largest accepted upload in bytes
    pub max_upload_bytes: u64,
    /// Bound on the audit write in seconds
    pub audit_timeout_secs: u64,
    /// Write an audit entry for every image verification
    pub log_verifications: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: defaults::DEFAULT_MAX_UPLOAD_BYTES,
            audit_timeout_secs: defaults::DEFAULT_AUDIT_TIMEOUT_SECS,
            log_verifications: true,
        }
    }
}

impl VerificationConfig {
    #[must_use]
    pub const fn audit_timeout(&self) -> Duration {
        Duration::from_secs(self.audit_timeout_secs)
    }
}

/// Operator and login configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared password for admin accounts
    pub admin_password: String,
    /// Minimum password length for uploaders
    pub min_password_len: usize,
    /// Known operators
    pub users: Vec<UserRecord>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_password: defaults::DEFAULT_ADMIN_PASSWORD.to_string(),
            min_password_len: defaults::DEFAULT_MIN_PASSWORD_LEN,
            users: seed_users(),
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn login_policy(&self) -> LoginPolicy {
        LoginPolicy {
            admin_password: self.admin_password.clone(),
            min_password_len: self.min_password_len,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ocr.timeout(), Duration::from_secs(60));
        assert_eq!(config.ocr.api_key_env, "CERTCHAIN_OCR_API_KEY");
        assert_eq!(config.verification.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.verification.log_verifications);
        assert_eq!(config.auth.admin_password, "1234");
        assert_eq!(config.auth.users.len(), 6);
        assert_eq!(config.storage.backend, StorageBackend::Json);
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .storage_backend(StorageBackend::Memory)
            .output_format(ReportFormat::Json)
            .log_verifications(false)
            .build();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(!config.verification.log_verifications);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("verification:\n  audit_timeout_secs: 2\n").unwrap();
        assert_eq!(config.verification.audit_timeout_secs, 2);
        assert!(config.verification.log_verifications);
        assert_eq!(config.ocr, OcrConfig::default());
    }
}
