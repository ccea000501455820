//! Fields extracted from a certificate image by the OCR collaborator.

use serde::{Deserialize, Deserializer, Serialize};

/// Confidence the OCR collaborator reports for an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl Confidence {
    /// Parse a confidence tag leniently; anything unrecognised is `Unknown`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::String(s)) => Self::from_tag(&s),
            _ => Self::Unknown,
        })
    }
}

/// Structured record produced by one OCR extraction.
///
/// Every field is optional. Values are kept exactly as extracted; comparison
/// code normalizes its own copies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub holder_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub degree_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub certificate_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub issue_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub additional_info: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub confidence: Confidence,
}

impl ExtractedFields {
    /// The record used when structured parsing of OCR output fails.
    #[must_use]
    pub fn raw_only(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: Some(raw_text.into()),
            confidence: Confidence::Low,
            ..Self::default()
        }
    }

    /// Builder-style setter used heavily by tests and the registry.
    #[must_use]
    pub fn with_holder_name(mut self, value: impl Into<String>) -> Self {
        self.holder_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_institution(mut self, value: impl Into<String>) -> Self {
        self.institution = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_certificate_id(mut self, value: impl Into<String>) -> Self {
        self.certificate_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_department(mut self, value: impl Into<String>) -> Self {
        self.department = Some(value.into());
        self
    }

    /// True when none of the four matchable fields carries a value.
    #[must_use]
    pub fn has_no_matchable_fields(&self) -> bool {
        [
            &self.holder_name,
            &self.institution,
            &self.certificate_id,
            &self.department,
        ]
        .iter()
        .all(|f| f.as_deref().is_none_or(str::is_empty))
    }
}

/// Accept strings, numbers and booleans; treat null and structured values as absent.
///
/// Vision models occasionally return a GPA as `8.2` instead of `"8.2"`.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
