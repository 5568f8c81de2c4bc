// ABOUTME: Recovers a JSON value from free-form model output.
// ABOUTME: Falls back to the outermost brace span when direct parsing fails.

use serde_json::Value;

use crate::error::LlmError;

/// Parse model output as JSON, tolerating surrounding prose.
///
/// The trimmed text is parsed directly first. On failure, the span from the
/// first `{` to the last `}` is reparsed; models sometimes wrap the object in
/// formatting despite instructions. A recovered span is only guaranteed to
/// parse, not to be the object the model intended. Without a usable span the
/// original parse error propagates.
pub(crate) fn parse_json_text(text: &str) -> Result<Value, LlmError> {
    let trimmed = text.trim();
    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(err) => match (trimmed.find('{'), trimmed.rfind('}')) {
            (Some(start), Some(end)) if start < end => {
                Ok(serde_json::from_str(&trimmed[start..=end])?)
            }
            _ => Err(err.into()),
        },
    }
}
