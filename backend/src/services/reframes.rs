//! Post-processing of generated reframe text.

use serde_json::Value;

use crate::api::ReframeResult;

/// Failure to read model output as a reframe object.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ReframeParseError {
    pub message: String,
    /// Model text after fence removal.
    pub raw_output: String,
}

/// Remove Markdown code-fence markers the model may wrap its JSON in.
///
/// Text that does not start with a fence is returned unchanged.
pub fn strip_code_fences(text: &str) -> String {
    if text.trim_start().starts_with("```") {
        text.replace("```json", "").replace("```", "").trim().to_string()
    } else {
        text.to_string()
    }
}

/// Parse model output into reframes keyed by distortion name.
///
/// Per-category values are not inspected.
pub fn parse_reframes(text: &str) -> Result<ReframeResult, ReframeParseError> {
    let cleaned = strip_code_fences(text);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ReframeParseError {
            message: format!("expected a JSON object, got {}", json_kind(&other)),
            raw_output: cleaned,
        }),
        Err(e) => Err(ReframeParseError {
            message: e.to_string(),
            raw_output: cleaned,
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "reframes_tests.rs"]
mod reframes_tests;
