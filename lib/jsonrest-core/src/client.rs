//! HTTP client trait.
//!
//! [`HttpClient`] is the only contract the resolution pipeline needs from the
//! underlying HTTP engine. Implement it to plug in another engine, or to
//! script responses in tests.

use std::future::Future;
use std::time::Duration;

use crate::{Request, Response, TransportError};

/// Core HTTP client trait.
///
/// Implementations must be safe to call concurrently and must fully collect
/// the response body before returning.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use jsonrest_core::{HttpClient, Request, Response, TransportError};
///
/// /// Answers every request with `204 No Content`.
/// struct NoContentClient;
///
/// impl HttpClient for NoContentClient {
///     async fn execute(
///         &self,
///         _request: Request,
///         _timeout: Duration,
///     ) -> Result<Response, TransportError> {
///         Ok(Response::new(204, http::HeaderMap::new(), ""))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// `timeout` bounds the whole exchange, body collection included.
    ///
    /// # Errors
    ///
    /// Returns an error if no complete response was received:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn execute(
        &self,
        request: Request,
        timeout: Duration,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

impl<C: HttpClient> HttpClient for &C {
    fn execute(
        &self,
        request: Request,
        timeout: Duration,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        (**self).execute(request, timeout)
    }
}

impl<C: HttpClient> HttpClient for std::sync::Arc<C> {
    fn execute(
        &self,
        request: Request,
        timeout: Duration,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        (**self).execute(request, timeout)
    }
}
