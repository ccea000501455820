//! Core data structures shared by the matching engine and its collaborators.
//!
//! - [`ExtractedFields`]: what the OCR collaborator read off an uploaded image.
//! - [`RegisteredCertificate`]: a record in the registry.
//! - [`ImageUpload`]: a validated image payload.
//! - [`VerificationPayload`] and [`VerificationLogEntry`]: what a verification
//!   returns to the caller and what it leaves behind in the audit log.

mod certificate;
mod extracted;
mod image;
mod verification;

pub use certificate::*;
pub use extracted::*;
pub use image::*;
pub use verification::*;
