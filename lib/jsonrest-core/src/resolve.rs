//! Response resolution.
//!
//! [`resolve`] executes a request and classifies what came back into exactly
//! one [`Outcome`]:
//!
//! | transport result              | error body decodes as `E` | outcome                  |
//! |-------------------------------|---------------------------|--------------------------|
//! | failure                       | -                         | `GeneralError` (no status) |
//! | status in `[200, 300)`        | -                         | `Success`                |
//! | any other status              | yes                       | `ApiError`               |
//! | any other status              | no, shape mismatch        | `ApiErrorUndecodable`    |
//! | any other status              | no, other failure         | `GeneralError` (status)  |

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{
    DecodeFailure, Error, HttpClient, NoContent, Request, Response, Success, TransportError,
    from_json,
};

/// Resolved result of one request attempt.
#[derive(Debug)]
pub enum Outcome<E = NoContent> {
    /// 2xx response.
    Success(Success),

    /// Non-2xx response whose body decoded as `E`.
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Decoded error payload.
        error: E,
    },

    /// Non-2xx response whose body does not match `E`.
    ApiErrorUndecodable {
        /// HTTP status code.
        status: u16,
        /// Why the body did not decode.
        failure: DecodeFailure,
    },

    /// No usable answer.
    GeneralError {
        /// HTTP status code, `None` when the transport failed.
        status: Option<u16>,
        /// Underlying failure.
        source: TransportError,
    },
}

impl<E: DeserializeOwned> Outcome<E> {
    /// Classify what an [`HttpClient`] returned.
    ///
    /// A transport failure, timeout included, becomes
    /// [`Outcome::GeneralError`] without status; a response goes through
    /// [`classify`].
    #[must_use]
    pub fn from_transport(result: Result<Response, TransportError>) -> Self {
        match result {
            Ok(response) => classify(response),
            Err(source) => Self::GeneralError {
                status: None,
                source,
            },
        }
    }
}

impl<E> Outcome<E> {
    /// HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Success(success) => Some(success.status()),
            Self::ApiError { status, .. } | Self::ApiErrorUndecodable { status, .. } => {
                Some(*status)
            }
            Self::GeneralError { status, .. } => *status,
        }
    }

    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Project into a `Result`, keeping every error variant as is.
    ///
    /// # Errors
    ///
    /// Returns the matching [`Error`] variant for every non-success outcome.
    pub fn into_result(self) -> Result<Success, Error<E>> {
        match self {
            Self::Success(success) => Ok(success),
            Self::ApiError { status, error } => Err(Error::Api { status, error }),
            Self::ApiErrorUndecodable { status, failure } => {
                Err(Error::ApiUndecodable { status, failure })
            }
            Self::GeneralError { status, source } => Err(Error::General { status, source }),
        }
    }
}

/// Classify a received response.
///
/// A 2xx response becomes a [`Success`]. Any other status has its body
/// decoded as `E`; an empty (or whitespace-only) body is decoded as JSON
/// `null`, so `Option<_>` and [`NoContent`] payloads accept it.
#[must_use]
pub fn classify<E: DeserializeOwned>(response: Response) -> Outcome<E> {
    if response.is_success() {
        return Outcome::Success(Success::from(response));
    }

    let status = response.status();
    match decode_error_body(response.body()) {
        Ok(error) => Outcome::ApiError { status, error },
        Err(failure) => undecodable(status, failure),
    }
}

/// Execute `request` with `client` and classify the result.
///
/// See [`Outcome::from_transport`].
pub async fn resolve<C, E>(client: &C, request: Request, timeout: Duration) -> Outcome<E>
where
    C: HttpClient,
    E: DeserializeOwned,
{
    Outcome::from_transport(client.execute(request, timeout).await)
}

/// Outcome of a non-2xx response whose body did not decode.
///
/// Shape mismatches keep the failure; anything else (an I/O category) means
/// the body could not be read.
fn undecodable<E>(status: u16, failure: DecodeFailure) -> Outcome<E> {
    if failure.is_structural() {
        Outcome::ApiErrorUndecodable { status, failure }
    } else {
        Outcome::GeneralError {
            status: Some(status),
            source: TransportError::body(failure.to_string()),
        }
    }
}

fn decode_error_body<E: DeserializeOwned>(body: &[u8]) -> Result<E, DecodeFailure> {
    if body.iter().all(u8::is_ascii_whitespace) {
        from_json(b"null")
    } else {
        from_json(body)
    }
}
