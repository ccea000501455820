//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".certchain.yaml",
    ".certchain.yml",
    "certchain.yaml",
    "certchain.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/certchain/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("certchain"))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Serialize the default configuration as an example file.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        "# certchain configuration\n\
         # Place this file at .certchain.yaml in the working directory or ~/.config/certchain/\n\n{}",
        serde_yaml::to_string(&AppConfig::default()).unwrap_or_default()
    )
}

/// A commented example with every option.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# certchain configuration file
# =============================
#
# Searched for at:
#   - .certchain.yaml in the working directory
#   - ~/.config/certchain/certchain.yaml
#   - ~/.certchain.yaml
#
# CLI flags always override file settings.

# OCR gateway (OpenAI-compatible chat completions with image input)
ocr:
  api_base: https://ai.gateway.lovable.dev
  model: google/gemini-2.5-flash
  timeout_secs: 60
  # Environment variable holding the bearer token
  api_key_env: CERTCHAIN_OCR_API_KEY

# Registry storage
storage:
  # memory or json
  backend: json
  # Defaults to the platform data directory
  # data_dir: /var/lib/certchain

# Verification
verification:
  # Largest accepted upload (bytes, at most 50 MiB)
  max_upload_bytes: 10485760
  # Bound on the audit log write (seconds)
  audit_timeout_secs: 5
  log_verifications: true

# Operators
auth:
  admin_password: '1234'
  min_password_len: 4
  users:
    - { username: admin, role: admin }
    - { username: dhivya, role: admin }
    - { username: irsath, role: admin }
    - { username: kathir, role: viewer }
    - { username: akshyaa, role: uploader }
    - { username: akshayaa, role: viewer }

# Output
output:
  # summary or json
  format: summary
  # file: verdict.json
  no_color: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
