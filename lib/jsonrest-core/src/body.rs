//! Body serialization utilities.

use bytes::Bytes;

use crate::DecodeFailure;

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Plain text content type (`text/plain; charset=utf-8`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::PlainText => "text/plain; charset=utf-8",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request payload.
///
/// JSON payloads are encoded once, when the [`Body`] is created, so an
/// encoding failure surfaces before any request is built.
///
/// # Example
///
/// ```
/// use jsonrest_core::{Body, ContentType};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let body = Body::json(&User { name: "Alice".to_string() }).expect("serialize");
/// assert_eq!(body.as_bytes(), Some(&br#"{"name":"Alice"}"#[..]));
/// assert_eq!(body.content_type(), Some(ContentType::Json));
///
/// assert!(Body::Empty.as_bytes().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// Already encoded JSON.
    Json(Bytes),
    /// Raw text, sent as UTF-8.
    Text(String),
    /// Raw bytes, sent as is.
    Raw(Bytes),
}

impl Body {
    /// Encode a value as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        to_json(value).map(Self::Json)
    }

    /// A raw text body.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// A raw bytes body.
    #[must_use]
    pub fn raw(bytes: impl Into<Bytes>) -> Self {
        Self::Raw(bytes.into())
    }

    /// Content type sent when the request does not set one.
    #[must_use]
    pub const fn content_type(&self) -> Option<ContentType> {
        match self {
            Self::Empty => None,
            Self::Json(_) => Some(ContentType::Json),
            Self::Text(_) => Some(ContentType::PlainText),
            Self::Raw(_) => Some(ContentType::OctetStream),
        }
    }

    /// Borrow the encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Empty => None,
            Self::Json(bytes) | Self::Raw(bytes) => Some(bytes.as_ref()),
            Self::Text(text) => Some(text.as_bytes()),
        }
    }

    /// Consume into the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Self::Empty => None,
            Self::Json(bytes) | Self::Raw(bytes) => Some(bytes),
            Self::Text(text) => Some(Bytes::from(text)),
        }
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use jsonrest_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes, serde_json::Error> {
    serde_json::to_vec(value).map(Bytes::from)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the failure carries the exact path to the
/// field that failed to deserialize. Trailing characters after the value are
/// rejected.
///
/// # Errors
///
/// Returns a [`DecodeFailure`] if the bytes are not JSON or do not match `T`.
///
/// # Example
///
/// ```
/// use jsonrest_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let bytes = br#"{"name":"Alice"}"#;
/// let user: User = from_json(bytes).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeFailure> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        DecodeFailure::new(
            e.path().to_string(),
            e.inner().to_string(),
            e.inner().classify(),
        )
    })?;
    deserializer
        .end()
        .map_err(|e| DecodeFailure::new(".", e.to_string(), e.classify()))?;
    Ok(value)
}
