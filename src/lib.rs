//! **Registry and authenticity checks for academic certificates.**
//!
//! `certchain` keeps a registry of issued certificates and decides whether an
//! uploaded certificate image is one of them. An OCR collaborator reads the
//! image into structured fields, a weighted field matcher scores every active
//! record, and the best score is classified as original, suspicious or not
//! found. Every image-based verdict leaves an entry in an audit log.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`ExtractedFields`], [`RegisteredCertificate`], [`ImageUpload`]
//!   and the caller-facing [`VerificationPayload`].
//! - **[`matching`]**: normalization, character-overlap similarity and the
//!   per-field weight table behind [`FieldMatcher`].
//! - **[`verify`]**: the [`VerificationEngine`] (image and direct-ID entry
//!   points), verdict classification and the bounded audit logger.
//! - **[`ocr`]**: the [`OcrExtractor`] seam and its HTTP client (feature `ocr`).
//! - **[`store`]**: the [`CertificateStore`] seam with in-memory and JSON file backends.
//! - **[`registry`]** and **[`session`]**: admin-gated registration and revocation,
//!   operator logins.
//! - **[`config`]**, **[`reports`]**, **[`pipeline`]**, **[`cli`]**: the command-line tool.
//!
//! ## Verifying extracted fields
//!
//! ```
//! use std::sync::Arc;
//! use certchain::{
//!     ExtractedFields, InMemoryStore, NewCertificate, PayloadStatus, UnavailableExtractor,
//!     VerificationEngine,
//! };
//!
//! let store = Arc::new(InMemoryStore::with_certificates([NewCertificate::new(
//!     "CERT-2024-001",
//!     "Jane Doe",
//!     "MIT",
//!     "Computer Science",
//! )]));
//! let engine = VerificationEngine::new(store, Arc::new(UnavailableExtractor::default()));
//!
//! let extracted = ExtractedFields::default()
//!     .with_holder_name("Jane Doe")
//!     .with_institution("MIT")
//!     .with_certificate_id("CERT-2024-001")
//!     .with_department("Computer Science");
//! let payload = engine.verify_extracted(extracted)?;
//!
//! assert_eq!(payload.status, PayloadStatus::Original);
//! assert_eq!(payload.match_score, 100);
//! # Ok::<(), certchain::CertError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `ocr` (default): the reqwest-based [`OcrClient`].

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod model;
pub mod ocr;
pub mod pipeline;
pub mod registry;
pub mod reports;
pub mod session;
pub mod store;
pub mod verify;

pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{CertError, ErrorContext, Result};
pub use matching::{CertificateMatcher, FieldMatcher, MatchResult, normalize, similarity};
pub use model::{
    CertificateStatus, Confidence, ExtractedFields, ImageUpload, NewCertificate, PayloadStatus,
    RegisteredCertificate, VerificationLogEntry, VerificationPayload,
};
#[cfg(feature = "ocr")]
pub use ocr::{OcrClient, OcrClientConfig};
pub use ocr::{OcrExtractor, UnavailableExtractor};
pub use registry::{Registrar, RegistryStats};
pub use reports::{ReportFormat, ReportGenerator};
pub use session::{Permission, Role, Session, UserDirectory};
pub use store::{CertificateStore, InMemoryStore, JsonFileStore};
pub use verify::{AuditLogger, AuditOutcome, CancellationToken, Verdict, VerificationEngine};
