//! HTTP client for the vision OCR gateway.

use super::OcrExtractor;
use super::parse::parse_extracted_content;
use super::response::{ChatContent, ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl};
use crate::config::defaults;
use crate::error::{CertError, OcrErrorKind, Result};
use crate::model::{ExtractedFields, ImageUpload};
use reqwest::blocking::Client;
use std::time::Duration;

/// Instructions sent with every image.
const SYSTEM_PROMPT: &str = "You are an expert OCR system specialized in extracting information \
from academic certificates, degrees, and educational documents.

Extract ALL text and structured information from the certificate image. Return a JSON object \
with these fields:
{
  \"raw_text\": \"Complete extracted text from the document\",
  \"certificate_id\": \"Certificate ID/number if visible\",
  \"holder_name\": \"Name of the certificate holder\",
  \"institution\": \"Name of the college/university\",
  \"department\": \"Department or field of study\",
  \"degree_type\": \"Type of degree (e.g., Bachelor, Master, PhD)\",
  \"start_date\": \"Start date if visible (YYYY-MM-DD format)\",
  \"end_date\": \"End date or graduation date if visible (YYYY-MM-DD format)\",
  \"issue_date\": \"Date of issue if visible\",
  \"grade\": \"Grade or GPA if visible\",
  \"additional_info\": \"Any other relevant information\",
  \"confidence\": \"high/medium/low based on image quality and text clarity\"
}

If a field is not visible or cannot be determined, use null for that field.
IMPORTANT: Return ONLY valid JSON, no markdown formatting or additional text.";

const USER_PROMPT: &str =
    "Extract all information from this certificate image and return it as structured JSON.";

/// OCR client configuration.
#[derive(Debug, Clone)]
pub struct OcrClientConfig {
    /// Base URL of the gateway
    pub api_base: String,
    /// Vision model name
    pub model: String,
    /// Bearer token; `None` means OCR is not configured
    pub api_key: Option<String>,
    /// Name of the environment variable the key came from, for error messages
    pub api_key_env: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for OcrClientConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::DEFAULT_OCR_API_BASE.to_string(),
            model: defaults::DEFAULT_OCR_MODEL.to_string(),
            api_key: None,
            api_key_env: defaults::DEFAULT_OCR_API_KEY_ENV.to_string(),
            timeout: Duration::from_secs(defaults::DEFAULT_OCR_TIMEOUT_SECS),
        }
    }
}

impl OcrClientConfig {
    /// Fill `api_key` from the configured environment variable.
    #[must_use]
    pub fn with_key_from_env(mut self) -> Self {
        self.api_key = std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        self
    }
}

/// HTTP client for the OCR gateway.
pub struct OcrClient {
    client: Client,
    config: OcrClientConfig,
}

/// Map transport failures, keeping timeouts distinguishable.
fn transport_error(context: &str, err: &reqwest::Error) -> CertError {
    if err.is_timeout() {
        CertError::ocr(context, OcrErrorKind::Timeout)
    } else {
        CertError::ocr(context, OcrErrorKind::Network(err.to_string()))
    }
}

impl OcrClient {
    /// Create a new OCR client.
    pub fn new(config: OcrClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| transport_error("Failed to create HTTP client", &e))?;

        Ok(Self { client, config })
    }

    /// Build the chat request for one image.
    fn build_request(&self, image: &ImageUpload) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: ChatContent::Text(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: ChatContent::Parts(vec![
                        ContentPart::Text {
                            text: USER_PROMPT.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image.to_data_url(),
                            },
                        },
                    ]),
                },
            ],
        }
    }

    /// Send one request and return the raw model content.
    fn request_content(&self, api_key: &str, image: &ImageUpload) -> Result<String> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        let request = self.build_request(image);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|e| transport_error("sending OCR request", &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!("OCR gateway error: {} {}", status.as_u16(), body);
            return Err(status_error(status.as_u16(), body));
        }

        let chat: ChatResponse = response.json().map_err(|e| {
            if e.is_timeout() {
                CertError::ocr("reading OCR response", OcrErrorKind::Timeout)
            } else {
                CertError::ocr(
                    "parsing OCR response",
                    OcrErrorKind::MalformedResponse(e.to_string()),
                )
            }
        })?;

        chat.first_content()
            .map(str::to_string)
            .ok_or_else(|| CertError::ocr("reading OCR response", OcrErrorKind::EmptyResponse))
    }
}

/// Map a non-success gateway status to an OCR failure reason.
pub(crate) fn status_error(status: u16, body: String) -> CertError {
    let kind = match status {
        429 => OcrErrorKind::RateLimited,
        402 => OcrErrorKind::QuotaExhausted,
        _ => OcrErrorKind::Upstream { status, body },
    };
    CertError::ocr("OCR gateway", kind)
}

impl OcrExtractor for OcrClient {
    fn extract(&self, image: &ImageUpload) -> Result<ExtractedFields> {
        if image.is_empty() {
            return Err(CertError::ocr("OCR request", OcrErrorKind::NoImage));
        }
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            CertError::ocr(
                "OCR request",
                OcrErrorKind::NotConfigured(self.config.api_key_env.clone()),
            )
        })?;

        tracing::info!("Processing OCR request ({} bytes, {})", image.len(), image.media_type());
        let content = self.request_content(api_key, image)?;
        tracing::info!("OCR extraction completed");
        Ok(parse_extracted_content(&content))
    }

    fn name(&self) -> &'static str {
        "OcrGateway"
    }

    fn is_available(&self) -> bool {
        self.config.api_key.is_some()
    }
}
