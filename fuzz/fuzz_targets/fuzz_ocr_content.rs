#![no_main]
use libfuzzer_sys::fuzz_target;
use certchain::ocr::parse_extracted_content;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz parsing of the OCR model's answer.
///
/// Parsing never fails: anything that is not a JSON object must come back
/// as a raw-text record.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_extracted_content(s);

        // Also try inside a markdown fence, the way chat models often answer
        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let fenced = format!("```json\n{{\"holder_name\": {s}}}\n```");
            let _ = parse_extracted_content(&fenced);
        }
    }
});
