//! HTTP response handling.
//!
//! - [`Response`] - what an [`HttpClient`](crate::HttpClient) returns: status,
//!   raw headers and the fully collected body.
//! - [`Success`] - a 2xx response with headers flattened to one value per name.
//!
//! # Example
//!
//! ```ignore
//! let user: User = success.json()?;
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use http::HeaderMap;

use crate::DecodeFailure;

/// Returns `true` for a status in `[200, 300)`.
#[must_use]
pub const fn is_success_status(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Flatten response headers to a single value per name.
///
/// Names are the lowercase names produced by `http`. When a name repeats the
/// last value wins. Values that are not visible ASCII are skipped, so they
/// neither override an earlier value nor get stored. Empty values are kept.
#[must_use]
pub fn flatten_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut flat = HashMap::with_capacity(headers.keys_len());
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            flat.insert(name.as_str().to_string(), value.to_string());
        }
    }
    flat
}

// ============================================================================
// Transport Response
// ============================================================================

/// HTTP response with status, headers, and body, as received.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers, repeated names included.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        is_success_status(self.status)
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }
}

// ============================================================================
// Success
// ============================================================================

/// A 2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Success {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Success {
    /// Creates a new success.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers, one value per lowercase name.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, Bytes) {
        (self.status, self.headers, self.body)
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, DecodeFailure> {
        crate::from_json(&self.body)
    }

    /// Get the body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }
}

impl From<Response> for Success {
    fn from(response: Response) -> Self {
        let (status, headers, body) = response.into_parts();
        Self::new(status, flatten_headers(&headers), body)
    }
}
