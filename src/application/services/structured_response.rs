use serde_json::{Value, json};

/// Field that carries the model's text when it could not be read as JSON.
pub const RAW_FALLBACK_FIELD: &str = "raw";

/// Interprets a completion that was asked to be JSON. Markdown code fences are
/// stripped first; text that still does not parse is returned as
/// `{"raw": text}`.
pub fn parse_structured_response(operation: &str, text: &str) -> Value {
    let candidate = strip_code_fence(text);
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(operation, error = %e, "model output is not JSON, keeping raw text");
            json!({ RAW_FALLBACK_FIELD: text })
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
