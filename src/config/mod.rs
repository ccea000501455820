//! Configuration module for certchain.
//!
//! This module provides:
//! - Type-safe configuration structures with defaults
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - JSON schema generation for editor support
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use certchain::config::{AppConfig, StorageBackend};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .storage_backend(StorageBackend::Memory)
//!     .log_verifications(false)
//!     .build();
//!
//! // Load from file
//! use certchain::config::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.certchain.yaml` file in the working directory or `~/.config/certchain/`:
//!
//! ```yaml
//! storage:
//!   backend: json
//!   data_dir: /var/lib/certchain
//! verification:
//!   audit_timeout_secs: 5
//! ```

pub mod defaults;
pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, AuthConfig, OcrConfig, OutputConfig, StorageBackend,
    StorageConfig, VerificationConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config,
    generate_full_example_config, load_config_file, load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Documents every option that can be set in `.certchain.yaml`; usable by
/// editors for validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mentions_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["ocr", "storage", "verification", "auth", "output"] {
            assert!(schema.contains(section), "missing {section}");
        }
    }
}
