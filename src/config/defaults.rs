//! Default values for configuration.

/// Default OCR gateway.
pub const DEFAULT_OCR_API_BASE: &str = "https://ai.gateway.lovable.dev";

/// Default vision model.
pub const DEFAULT_OCR_MODEL: &str = "google/gemini-2.5-flash";

/// Default OCR request timeout in seconds.
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 60;

/// Environment variable read for the OCR API key.
pub const DEFAULT_OCR_API_KEY_ENV: &str = "CERTCHAIN_OCR_API_KEY";

/// Default upload ceiling (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = crate::model::DEFAULT_MAX_UPLOAD_BYTES;

/// Hard ceiling accepted by validation (50 MiB).
pub const MAX_UPLOAD_CEILING_BYTES: u64 = 50 * 1024 * 1024;

/// Default bound on audit writes in seconds.
pub const DEFAULT_AUDIT_TIMEOUT_SECS: u64 = 5;

/// Default shared admin password.
pub const DEFAULT_ADMIN_PASSWORD: &str = "1234";

/// Default minimum password length.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 4;
