//! Unified error types for certchain.
//!
//! Every failure a verification entry point can report is an `Err` of
//! [`CertError`]. A legitimate "not found" verdict is never an error: it is an
//! `Ok` payload with status `no_match`. Keeping the two apart is what lets a
//! caller tell "this certificate is unknown" from "we could not check".

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for certchain operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CertError {
    /// Uploaded input rejected before any remote call
    #[error("Invalid input: {context}")]
    Input {
        context: String,
        #[source]
        source: InputErrorKind,
    },

    /// OCR collaborator failed to produce an extraction
    #[error("OCR extraction failed: {context}")]
    Ocr {
        context: String,
        #[source]
        source: OcrErrorKind,
    },

    /// Storage collaborator failed
    #[error("Storage operation failed: {context}")]
    Storage {
        context: String,
        #[source]
        source: StorageErrorKind,
    },

    /// Authentication or authorization failure
    #[error("Access denied: {context}")]
    Auth {
        context: String,
        #[source]
        source: AuthErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The surrounding request was aborted before a verdict was produced
    #[error("Verification cancelled: {0}")]
    Cancelled(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific input validation error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InputErrorKind {
    #[error("No image provided")]
    MissingImage,

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("Unsupported media type '{0}' (expected an image or PDF)")]
    UnsupportedMediaType(String),

    #[error("Malformed data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Certificate id must not be empty")]
    EmptyCertificateId,
}

/// Specific OCR error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OcrErrorKind {
    #[error("No image provided")]
    NoImage,

    #[error("OCR API key not configured (set {0})")]
    NotConfigured(String),

    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    #[error("OCR credits exhausted")]
    QuotaExhausted,

    #[error("Upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Upstream response contained no content")]
    EmptyResponse,

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("OCR request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),
}

/// Specific storage error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StorageErrorKind {
    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("No certificate with id {0}")]
    NotFound(String),
}

/// Specific authentication error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AuthErrorKind {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Role '{role}' may not {action}")]
    Forbidden { role: String, action: String },

    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("User '{0}' already exists")]
    DuplicateUser(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for certchain operations
pub type Result<T> = std::result::Result<T, CertError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl CertError {
    /// Create an input error with context
    pub fn input(context: impl Into<String>, source: InputErrorKind) -> Self {
        Self::Input {
            context: context.into(),
            source,
        }
    }

    /// Create an OCR error with context
    pub fn ocr(context: impl Into<String>, source: OcrErrorKind) -> Self {
        Self::Ocr {
            context: context.into(),
            source,
        }
    }

    /// Create a storage error with context
    pub fn storage(context: impl Into<String>, source: StorageErrorKind) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    /// Create an auth error with context
    pub fn auth(context: impl Into<String>, source: AuthErrorKind) -> Self {
        Self::Auth {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether retrying the same request later could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Ocr {
                source: OcrErrorKind::RateLimited
                    | OcrErrorKind::Timeout
                    | OcrErrorKind::Network(_),
                ..
            } | Self::Storage {
                source: StorageErrorKind::ReadFailed(_),
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for CertError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CertError {
    fn from(err: serde_json::Error) -> Self {
        Self::storage("JSON (de)serialization", StorageErrorKind::Corrupt(err.to_string()))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain, outermost first: `"outer: inner"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CertError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: CertError, new_ctx: &str) -> CertError {
    match err {
        CertError::Input {
            context: existing,
            source,
        } => CertError::Input {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CertError::Ocr {
            context: existing,
            source,
        } => CertError::Ocr {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CertError::Storage {
            context: existing,
            source,
        } => CertError::Storage {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CertError::Auth {
            context: existing,
            source,
        } => CertError::Auth {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CertError::Io {
            path,
            message,
            source,
        } => CertError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        CertError::Cancelled(msg) => CertError::Cancelled(chain_context(new_ctx, &msg)),
        CertError::Config(msg) => CertError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
