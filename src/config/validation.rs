//! Configuration validation for certchain.
//!
//! Provides validation traits and implementations for all configuration types.

use super::defaults::MAX_UPLOAD_CEILING_BYTES;
use super::types::*;
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.ocr.validate());
        errors.extend(self.verification.validate());
        errors.extend(self.auth.validate());
        errors
    }
}

impl Validatable for OcrConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let base = self.api_base.trim();
        if base.is_empty() {
            errors.push(ConfigError::new("ocr.api_base", "API base URL must not be empty"));
        } else if !(base.starts_with("http://") || base.starts_with("https://")) {
            errors.push(ConfigError::new(
                "ocr.api_base",
                format!("API base URL must start with http:// or https://, got '{base}'"),
            ));
        }
        if self.model.trim().is_empty() {
            errors.push(ConfigError::new("ocr.model", "Model name must not be empty"));
        }
        if self.timeout_secs == 0 {
            errors.push(ConfigError::new("ocr.timeout_secs", "Timeout must be greater than 0"));
        }
        if self.api_key_env.trim().is_empty() {
            errors.push(ConfigError::new(
                "ocr.api_key_env",
                "API key variable name must not be empty",
            ));
        }
        errors
    }
}

impl Validatable for VerificationConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_upload_bytes == 0 || self.max_upload_bytes > MAX_UPLOAD_CEILING_BYTES {
            errors.push(ConfigError::new(
                "verification.max_upload_bytes",
                format!(
                    "Upload limit must be between 1 and {MAX_UPLOAD_CEILING_BYTES} bytes, got {}",
                    self.max_upload_bytes
                ),
            ));
        }
        if self.audit_timeout_secs == 0 {
            errors.push(ConfigError::new(
                "verification.audit_timeout_secs",
                "Audit timeout must be greater than 0",
            ));
        }
        errors
    }
}

impl Validatable for AuthConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.min_password_len == 0 {
            errors.push(ConfigError::new(
                "auth.min_password_len",
                "Minimum password length must be at least 1",
            ));
        }
        if self.admin_password.chars().count() < self.min_password_len {
            errors.push(ConfigError::new(
                "auth.admin_password",
                format!(
                    "Admin password must be at least {} characters",
                    self.min_password_len
                ),
            ));
        }

        let mut seen = HashSet::new();
        for user in &self.users {
            let name = user.username.trim().to_lowercase();
            if name.is_empty() {
                errors.push(ConfigError::new("auth.users", "Username must not be empty"));
            } else if !seen.insert(name) {
                errors.push(ConfigError::new(
                    "auth.users",
                    format!("Duplicate username '{}'", user.username),
                ));
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Role, UserRecord};

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_invalid_ocr_config() {
        let config = OcrConfig {
            api_base: "ftp://example".to_string(),
            model: " ".to_string(),
            timeout_secs: 0,
            ..OcrConfig::default()
        };
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["ocr.api_base", "ocr.model", "ocr.timeout_secs"]);
    }

    #[test]
    fn test_upload_limit_bounds() {
        let mut config = VerificationConfig::default();
        config.max_upload_bytes = 0;
        assert!(!config.is_valid());
        config.max_upload_bytes = MAX_UPLOAD_CEILING_BYTES + 1;
        assert!(!config.is_valid());
        config.max_upload_bytes = MAX_UPLOAD_CEILING_BYTES;
        assert!(config.is_valid());
    }

    #[test]
    fn test_duplicate_users_case_insensitive() {
        let config = AuthConfig {
            users: vec![
                UserRecord::new("Admin", Role::Admin),
                UserRecord::new("admin", Role::Viewer),
            ],
            ..AuthConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Duplicate"));
    }

    #[test]
    fn test_short_admin_password() {
        let config = AuthConfig {
            admin_password: "12".to_string(),
            ..AuthConfig::default()
        };
        assert!(!config.is_valid());
    }
}
