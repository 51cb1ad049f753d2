//! Small string utilities shared across layers.

/// Truncate a string to at most `max_chars` characters, appending an
/// ellipsis when truncation occurred. Always respects char boundaries;
/// the returned string never exceeds `max_chars` characters total.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return s.chars().take(max_chars).collect();
    }
    let truncated: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", truncated)
}

/// Replace every occurrence of the given secrets with a placeholder.
///
/// Used to sanitize provider error messages before they are shown to
/// the user, so API keys never leak into notifications or logs.
pub fn redact_secrets(text: &str, secrets: &[&str]) -> String {
    let mut out = text.to_string();
    for secret in secrets {
        if secret.is_empty() {
            continue;
        }
        out = out.replace(secret, "[redacted]");
    }
    out
}
