//! OCR collaborator.
//!
//! Turns an uploaded certificate image into [`ExtractedFields`]. The production
//! implementation is [`OcrClient`], which sends the image to a vision model
//! behind an OpenAI-compatible chat-completions gateway (feature `ocr`).
//!
//! Parsing of the model's answer never fails: stray markdown fencing is
//! stripped and unstructured answers become a low-confidence raw-text record.
//! Transport and upstream failures, on the other hand, are always surfaced as
//! [`CertError::Ocr`](crate::error::CertError::Ocr) and never as an empty
//! extraction.

#[cfg(feature = "ocr")]
mod client;
mod parse;
pub mod response;

#[cfg(feature = "ocr")]
pub use client::{OcrClient, OcrClientConfig};
pub use parse::{parse_extracted_content, strip_code_fences};

use crate::error::{CertError, OcrErrorKind, Result};
use crate::model::{ExtractedFields, ImageUpload};

/// Trait for OCR extraction backends.
///
/// # Example
///
/// ```ignore
/// use certchain::ocr::{OcrExtractor, OcrClient, UnavailableExtractor};
///
/// let extractor: Box<dyn OcrExtractor> = match config.api_key {
///     Some(_) => Box::new(OcrClient::new(config)?),
///     None => Box::new(UnavailableExtractor::new("CERTCHAIN_OCR_API_KEY")),
/// };
/// let fields = extractor.extract(&upload)?;
/// ```
pub trait OcrExtractor: Send + Sync {
    /// Extract certificate fields from a validated image.
    fn extract(&self, image: &ImageUpload) -> Result<ExtractedFields>;

    /// Get the name of this extractor.
    fn name(&self) -> &'static str;

    /// Whether the backend is configured and can be called.
    fn is_available(&self) -> bool;
}

/// Extractor used when no OCR backend is configured.
///
/// Every call fails with [`OcrErrorKind::NotConfigured`], so a verification
/// without OCR reports an error instead of a not-found verdict.
#[derive(Debug, Clone, Default)]
pub struct UnavailableExtractor {
    key_env: String,
}

impl UnavailableExtractor {
    pub fn new(key_env: impl Into<String>) -> Self {
        Self {
            key_env: key_env.into(),
        }
    }
}

impl OcrExtractor for UnavailableExtractor {
    fn extract(&self, _image: &ImageUpload) -> Result<ExtractedFields> {
        Err(CertError::ocr(
            "OCR request",
            OcrErrorKind::NotConfigured(self.key_env.clone()),
        ))
    }

    fn name(&self) -> &'static str {
        "Unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_extractor_errors() {
        let extractor = UnavailableExtractor::new("MY_KEY");
        assert!(!extractor.is_available());
        let image = ImageUpload::new("image/png", vec![1], 16).unwrap();
        match extractor.extract(&image) {
            Err(CertError::Ocr {
                source: OcrErrorKind::NotConfigured(key),
                ..
            }) => assert_eq!(key, "MY_KEY"),
            other => panic!("expected NotConfigured, got {other:?}"),
        }
    }
}
