//! Error types for jsonrest.

use derive_more::{Display, Error, From};
use serde::{Deserialize, Deserializer};
use serde_json::error::Category;

// ============================================================================
// Error payload marker
// ============================================================================

/// Error payload for APIs whose error bodies carry nothing worth decoding.
///
/// Accepts any JSON value (and an empty body) and discards it, so a non-2xx
/// response with a JSON body resolves to [`Error::Api`]. A body that is not
/// JSON at all still resolves to [`Error::ApiUndecodable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoContent;

impl<'de> Deserialize<'de> for NoContent {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde::de::IgnoredAny::deserialize(deserializer).map(|_| Self)
    }
}

// ============================================================================
// Transport Error
// ============================================================================

/// Failure raised by an [`HttpClient`](crate::HttpClient) before a complete
/// response was received.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TransportError {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    Timeout,

    /// The request could not be turned into a valid HTTP request.
    #[display("invalid request: {_0}")]
    InvalidRequest(#[error(not(source))] String),

    /// The response body could not be read.
    #[display("body error: {_0}")]
    Body(#[error(not(source))] String),
}

impl TransportError {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a body error.
    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        Self::Body(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

// ============================================================================
// Decode Failure
// ============================================================================

/// A JSON body that could not be decoded into the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("JSON deserialization error at '{path}': {message}")]
pub struct DecodeFailure {
    path: String,
    message: String,
    #[error(not(source))]
    category: Category,
}

impl DecodeFailure {
    /// Creates a decode failure.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>, category: Category) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            category,
        }
    }

    /// JSON path to the failing value (e.g., `user.address.city`), `.` for
    /// the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoder message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `serde_json` category of the failure.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns `true` if the body did not match the expected shape: invalid
    /// JSON, truncated JSON, or valid JSON of the wrong type.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self.category,
            Category::Syntax | Category::Data | Category::Eof
        )
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Error returned by every request operation.
///
/// `E` is the payload decoded from non-2xx response bodies.
#[derive(Debug, Display, From)]
pub enum Error<E = NoContent> {
    /// The request body could not be encoded.
    #[display("JSON serialization error: {_0}")]
    #[from]
    Serialization(serde_json::Error),

    /// The request failed without an API answer: transport failures (no
    /// status) or an error body that could not be read.
    #[display("request failed: {source}")]
    #[from(skip)]
    General {
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Underlying failure.
        source: TransportError,
    },

    /// Non-2xx status with a body decoded as `E`.
    #[display("API error {status}")]
    #[from(skip)]
    Api {
        /// HTTP status code.
        status: u16,
        /// Decoded error payload.
        error: E,
    },

    /// Non-2xx status whose body does not match `E`.
    #[display("API error {status} with undecodable body: {failure}")]
    #[from(skip)]
    ApiUndecodable {
        /// HTTP status code.
        status: u16,
        /// Why the body did not decode.
        failure: DecodeFailure,
    },

    /// 2xx status whose body does not match the expected output type.
    #[display("{_0}")]
    #[from(skip)]
    Deserialization(DecodeFailure),
}

impl<E: std::fmt::Debug> std::error::Error for Error<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            Self::General { source, .. } => Some(source),
            Self::ApiUndecodable { failure, .. } | Self::Deserialization(failure) => Some(failure),
            Self::Api { .. } => None,
        }
    }
}

/// Result type alias using [`crate::Error`].
pub type Result<T, E = NoContent> = std::result::Result<T, Error<E>>;

impl<E> Error<E> {
    /// Create a transport error (no status code).
    #[must_use]
    pub const fn transport(source: TransportError) -> Self {
        Self::General {
            status: None,
            source,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::General { status, .. } => *status,
            Self::Api { status, .. } | Self::ApiUndecodable { status, .. } => Some(*status),
            Self::Serialization(_) | Self::Deserialization(_) => None,
        }
    }

    /// Returns `true` if the request timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::General {
                source: TransportError::Timeout,
                ..
            }
        )
    }

    /// Returns `true` if the failure happened before any status was known.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::General { status: None, .. })
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns the decoded API error payload, if any.
    #[must_use]
    pub const fn api_error(&self) -> Option<&E> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns the decode failure of an error body or a success body.
    #[must_use]
    pub const fn decode_failure(&self) -> Option<&DecodeFailure> {
        match self {
            Self::ApiUndecodable { failure, .. } | Self::Deserialization(failure) => Some(failure),
            _ => None,
        }
    }
}
