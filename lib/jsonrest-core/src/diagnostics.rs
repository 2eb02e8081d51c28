//! Diagnostics for request attempts.
//!
//! Nothing in this module can fail: formatting falls back to raw text, and a
//! [`DiagnosticSink`] returns nothing.

use serde_json::Value;

use crate::Method;

/// Placeholder logged when a request has no body.
pub const NO_INPUT: &str = "<none>";

/// Placeholder logged when a response body is empty or not text.
pub const NO_OUTPUT: &str = "<empty>";

/// Receives one message per request attempt.
///
/// Closures taking `&str` are sinks too.
pub trait DiagnosticSink: Send + Sync {
    /// Record a message.
    fn log(&self, message: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message);
    }
}

/// Render a body for humans.
///
/// - `null` gives `None`
/// - a JSON string literal is returned unchanged
/// - a JSON object or array is re-indented (object keys come out sorted)
/// - anything else is returned as text, or `None` if it is not UTF-8
///
/// # Example
///
/// ```
/// use jsonrest_core::pretty_print;
///
/// assert_eq!(pretty_print(b"null"), None);
/// assert_eq!(pretty_print(br#""hello""#).as_deref(), Some(r#""hello""#));
/// assert_eq!(pretty_print(b"[1]").as_deref(), Some("[\n  1\n]"));
/// assert_eq!(pretty_print(b"plain text").as_deref(), Some("plain text"));
/// ```
#[must_use]
pub fn pretty_print(bytes: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(bytes).ok()?;

    if text == "null" {
        return None;
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Some(text.to_string());
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => serde_json::to_string_pretty(&value)
            .ok()
            .or_else(|| Some(text.to_string())),
        _ => Some(text.to_string()),
    }
}

/// Build the message logged for one attempt.
///
/// Empty bodies are logged as placeholders.
#[must_use]
pub fn describe_attempt(
    method: Method,
    url: &str,
    input: Option<&[u8]>,
    output: Option<&[u8]>,
) -> String {
    let input = render(input).unwrap_or_else(|| NO_INPUT.to_string());
    let output = render(output).unwrap_or_else(|| NO_OUTPUT.to_string());

    format!("{method} {url}\ninput: {input}\noutput: {output}")
}

fn render(body: Option<&[u8]>) -> Option<String> {
    body.filter(|bytes| !bytes.is_empty()).and_then(pretty_print)
}
