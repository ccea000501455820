//! Parsing of the model's textual answer into [`ExtractedFields`].

use crate::model::ExtractedFields;

/// Strip stray markdown fencing around a serialized object.
///
/// Handles a leading ```` ```json ```` or ```` ``` ```` and a trailing
/// ```` ``` ````, after trimming.
#[must_use]
pub fn strip_code_fences(content: &str) -> &str {
    let mut clean = content.trim();
    if let Some(rest) = clean.strip_prefix("```json") {
        clean = rest;
    } else if let Some(rest) = clean.strip_prefix("```") {
        clean = rest;
    }
    if let Some(rest) = clean.strip_suffix("```") {
        clean = rest;
    }
    clean.trim()
}

/// Parse model output into fields, never failing.
///
/// When the content is not a JSON object of fields, the whole content becomes
/// `raw_text` of a low-confidence record.
#[must_use]
pub fn parse_extracted_content(content: &str) -> ExtractedFields {
    match serde_json::from_str::<ExtractedFields>(strip_code_fences(content)) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::debug!("OCR content is not structured JSON, keeping raw text: {e}");
            ExtractedFields::raw_only(content)
        }
    }
}
