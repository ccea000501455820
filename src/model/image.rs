//! Uploaded certificate images.
//!
//! Validation happens here, before any remote call: only images and PDFs are
//! accepted and the payload must not exceed the configured limit.

use crate::error::{CertError, InputErrorKind, Result};
use base64::Engine;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Default upload ceiling (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A validated image payload ready for OCR.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    media_type: String,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// Validate raw bytes with a declared media type.
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>, max_bytes: u64) -> Result<Self> {
        let media_type = media_type.into().trim().to_lowercase();
        if bytes.is_empty() {
            return Err(CertError::input("image payload", InputErrorKind::MissingImage));
        }
        if !is_supported_media_type(&media_type) {
            return Err(CertError::input(
                "image payload",
                InputErrorKind::UnsupportedMediaType(media_type),
            ));
        }
        let size = bytes.len() as u64;
        if size > max_bytes {
            return Err(CertError::input(
                "image payload",
                InputErrorKind::TooLarge {
                    size,
                    limit: max_bytes,
                },
            ));
        }
        Ok(Self { media_type, bytes })
    }

    /// Read and validate an image file, inferring the media type from its extension.
    ///
    /// The size check uses file metadata so oversized files are never read.
    pub fn from_path(path: &Path, max_bytes: u64) -> Result<Self> {
        let media_type = media_type_for_path(path).ok_or_else(|| {
            CertError::input(
                format!("{}", path.display()),
                InputErrorKind::UnsupportedMediaType(
                    path.extension()
                        .map(|e| e.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                ),
            )
        })?;

        let metadata = std::fs::metadata(path).map_err(|e| CertError::io(path, e))?;
        if metadata.len() > max_bytes {
            return Err(CertError::input(
                format!("{}", path.display()),
                InputErrorKind::TooLarge {
                    size: metadata.len(),
                    limit: max_bytes,
                },
            ));
        }

        let bytes = std::fs::read(path).map_err(|e| CertError::io(path, e))?;
        Self::new(media_type, bytes, max_bytes)
    }

    /// Decode and validate a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str, max_bytes: u64) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(CertError::input("data URL", InputErrorKind::MissingImage));
        }
        let rest = url.strip_prefix("data:").ok_or_else(|| {
            CertError::input("data URL", InputErrorKind::InvalidDataUrl("missing data: prefix".into()))
        })?;
        let (header, payload) = rest.split_once(',').ok_or_else(|| {
            CertError::input("data URL", InputErrorKind::InvalidDataUrl("missing ',' separator".into()))
        })?;
        let media_type = header.strip_suffix(";base64").ok_or_else(|| {
            CertError::input(
                "data URL",
                InputErrorKind::InvalidDataUrl("only base64 payloads are supported".into()),
            )
        })?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| {
                CertError::input("data URL", InputErrorKind::InvalidDataUrl(e.to_string()))
            })?;
        Self::new(media_type, bytes, max_bytes)
    }

    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encode as a data URL for the OCR collaborator.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Content-addressed reference: `sha256:<hex>`.
    #[must_use]
    pub fn content_ref(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        format!("sha256:{:x}", hasher.finalize())
    }
}

/// `image/*` or `application/pdf`.
#[must_use]
pub fn is_supported_media_type(media_type: &str) -> bool {
    media_type
        .strip_prefix("image/")
        .is_some_and(|sub| !sub.is_empty())
        || media_type == "application/pdf"
}

/// Infer a media type from a file extension.
#[must_use]
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    Some(match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rejects_wrong_media_type() {
        let err = ImageUpload::new("text/plain", vec![1, 2, 3], DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert!(matches!(
            err,
            CertError::Input {
                source: InputErrorKind::UnsupportedMediaType(_),
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_oversized_payload() {
        let err = ImageUpload::new("image/png", vec![0; 11], 10).unwrap_err();
        assert!(matches!(
            err,
            CertError::Input {
                source: InputErrorKind::TooLarge { size: 11, limit: 10 },
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_payload() {
        let err = ImageUpload::new("image/png", Vec::new(), 10).unwrap_err();
        assert!(matches!(
            err,
            CertError::Input {
                source: InputErrorKind::MissingImage,
                ..
            }
        ));
    }

    #[test]
    fn test_accepts_pdf_and_images() {
        assert!(is_supported_media_type("application/pdf"));
        assert!(is_supported_media_type("image/jpeg"));
        assert!(!is_supported_media_type("image/"));
        assert!(!is_supported_media_type("application/zip"));
    }

    #[test]
    fn test_data_url_round_trip_preserves_bytes() {
        let upload = ImageUpload::new("image/png", vec![137, 80, 78, 71], 1024).unwrap();
        let url = upload.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        let decoded = ImageUpload::from_data_url(&url, 1024).unwrap();
        assert_eq!(decoded, upload);
    }

    #[test]
    fn test_malformed_data_url() {
        assert!(ImageUpload::from_data_url("image/png;base64,AAAA", 1024).is_err());
        assert!(ImageUpload::from_data_url("data:image/png,AAAA", 1024).is_err());
        assert!(ImageUpload::from_data_url("data:image/png;base64,@@@", 1024).is_err());
    }

    #[test]
    fn test_from_path_checks_extension_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cert.PNG");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[1, 2, 3, 4]).unwrap();

        let upload = ImageUpload::from_path(&path, 1024).unwrap();
        assert_eq!(upload.media_type(), "image/png");
        assert_eq!(upload.len(), 4);

        assert!(ImageUpload::from_path(&path, 2).is_err());

        let txt = dir.path().join("cert.txt");
        std::fs::write(&txt, b"hello").unwrap();
        assert!(ImageUpload::from_path(&txt, 1024).is_err());
    }

    #[test]
    fn test_content_ref_is_stable() {
        let a = ImageUpload::new("image/png", vec![1, 2, 3], 10).unwrap();
        let b = ImageUpload::new("image/jpeg", vec![1, 2, 3], 10).unwrap();
        assert_eq!(a.content_ref(), b.content_ref());
        assert!(a.content_ref().starts_with("sha256:"));
        assert_eq!(a.content_ref().len(), "sha256:".len() + 64);
    }
}
