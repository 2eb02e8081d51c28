//! Query string encoding.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped inside a query key or value.
///
/// Everything outside printable ASCII, plus the query delimiters (`&`, `=`,
/// `#`) and the characters that are never valid in a URL query.
const QUERY_COMPONENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Encode query parameters into a `?`-prefixed query string.
///
/// Returns an empty string for an empty mapping. Keys come out in the
/// mapping's order, so equal input always yields equal output.
///
/// A literal `+` survives the standard pass (it is a legal query character)
/// but many servers decode it as a space, so it is rewritten to `%2b`.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use jsonrest_core::encode_query;
///
/// let mut params = BTreeMap::new();
/// params.insert("q".to_string(), "1+1 = 2".to_string());
///
/// assert_eq!(encode_query(&params), "?q=1%2b1%20%3D%202");
/// assert_eq!(encode_query(&BTreeMap::new()), "");
/// ```
#[must_use]
pub fn encode_query(params: &BTreeMap<String, String>) -> String {
    if params.is_empty() {
        return String::new();
    }

    let pairs = params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>();

    format!("?{}", pairs.join("&"))
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_COMPONENT_ENCODE_SET)
        .to_string()
        .replace('+', "%2b")
}
