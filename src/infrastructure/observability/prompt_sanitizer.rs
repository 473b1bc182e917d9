const MAX_VISIBLE_CHARS: usize = 100;
const REDACTED: &str = "[REDACTED]";

const SECRET_MARKERS: [&str; 6] = [
    "Bearer ",
    "x-goog-api-key: ",
    "api_key=",
    "key=",
    "password=",
    "token=",
];

/// Shortens prompt text for log lines and masks anything that looks like a
/// credential.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{head}... ({total_chars} chars total)")
    } else {
        trimmed.to_string()
    };

    redact_secrets(&visible)
}

fn redact_secrets(text: &str) -> String {
    let mut result = text.to_string();
    for marker in SECRET_MARKERS {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(marker) {
            let value_start = search_from + found + marker.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            let value = &result[value_start..value_end];
            search_from = if value.is_empty() || value == REDACTED {
                value_end
            } else {
                result.replace_range(value_start..value_end, REDACTED);
                value_start + REDACTED.len()
            };
        }
    }
    result
}
