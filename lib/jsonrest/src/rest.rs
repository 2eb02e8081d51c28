//! Typed façade over an [`HttpClient`].
//!
//! [`RestClient`] composes request building, execution, response resolution
//! and the final JSON encode/decode of caller types. Every operation takes
//! the error payload type `E` as a type parameter.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{
    Body, Config, DiagnosticSink, Error, HttpClient, HyperClient, Outcome, Success, build_request,
    describe_attempt, header,
};

/// A [`DiagnosticSink`] forwarding messages to `tracing` at debug level.
///
/// Messages use the `jsonrest::diagnostics` target, so they can be enabled
/// on their own, e.g. with `RUST_LOG=jsonrest::diagnostics=debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, message: &str) {
        tracing::debug!(target: "jsonrest::diagnostics", "{message}");
    }
}

/// JSON REST client.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use jsonrest::{BaseUrl, Config, Method, NoContent, RestClient};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct NewCheese { name: String }
///
/// #[derive(Deserialize)]
/// struct Cheese { id: u64, name: String }
///
/// # async fn run() -> jsonrest::Result<()> {
/// let client = RestClient::default().with_tracing();
/// let config = Config::new(Method::Post, Arc::new(BaseUrl::new("https://example.com/")), "/cheese")
///     .with_param("age", "5");
///
/// let cheese: Cheese = client
///     .fetch_json::<_, _, NoContent>(&config, &NewCheese { name: "brie".into() })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RestClient<C = HyperClient> {
    client: C,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl<C: std::fmt::Debug> std::fmt::Debug for RestClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("client", &self.client)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Default for RestClient<HyperClient> {
    fn default() -> Self {
        Self::new(HyperClient::new())
    }
}

impl<C: HttpClient> RestClient<C> {
    /// Create a client over `client`, without diagnostics.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self { client, sink: None }
    }

    /// Report every attempt to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Report every attempt through `tracing`.
    #[must_use]
    pub fn with_tracing(self) -> Self {
        self.with_sink(TracingSink)
    }

    /// The underlying transport.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Execute one request and classify the result.
    ///
    /// The body's default content type is added when `config` has no
    /// `Content-Type` header.
    pub async fn attempt<E: DeserializeOwned>(&self, config: &Config, body: Body) -> Outcome<E> {
        let content_type = body.content_type();
        let (mut request, timeout) = build_request(config, body.into_bytes());
        if let Some(content_type) = content_type {
            request = request.header_or_default(header::CONTENT_TYPE.as_str(), content_type.as_str());
        }

        let described = self
            .sink
            .as_ref()
            .map(|_| (request.method(), request.url().to_string(), request.body().cloned()));

        let result = self.client.execute(request, timeout).await;

        if let (Some(sink), Some((method, url, input))) = (&self.sink, described) {
            let output = result.as_ref().ok().map(|response| response.body().as_ref());
            sink.log(&describe_attempt(method, &url, input.as_deref(), output));
        }

        Outcome::from_transport(result)
    }

    /// Execute one request and return the raw success.
    ///
    /// # Errors
    ///
    /// Returns the [`Error`] matching any non-success outcome.
    pub async fn execute<E: DeserializeOwned>(
        &self,
        config: &Config,
        body: Body,
    ) -> Result<Success, Error<E>> {
        self.attempt(config, body).await.into_result()
    }

    /// Execute one request, discarding the success body.
    ///
    /// # Errors
    ///
    /// Returns the [`Error`] matching any non-success outcome.
    pub async fn send<E: DeserializeOwned>(
        &self,
        config: &Config,
        body: Body,
    ) -> Result<(), Error<E>> {
        self.execute(config, body).await.map(|_| ())
    }

    /// Execute one request and decode the success body as `T`.
    ///
    /// # Errors
    ///
    /// Returns the [`Error`] matching any non-success outcome, or
    /// [`Error::Deserialization`] when the success body does not match `T`.
    pub async fn fetch<T, E>(&self, config: &Config, body: Body) -> Result<T, Error<E>>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        let success = self.execute(config, body).await?;
        success.json().map_err(Error::Deserialization)
    }

    /// Encode `input` as JSON and [`send`](Self::send) it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] without contacting the server when
    /// `input` cannot be encoded, otherwise as [`send`](Self::send).
    pub async fn send_json<B, E>(&self, config: &Config, input: &B) -> Result<(), Error<E>>
    where
        B: Serialize + ?Sized,
        E: DeserializeOwned,
    {
        let body = Body::json(input)?;
        self.send(config, body).await
    }

    /// Encode `input` as JSON and [`fetch`](Self::fetch) the answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] without contacting the server when
    /// `input` cannot be encoded, otherwise as [`fetch`](Self::fetch).
    pub async fn fetch_json<B, T, E>(&self, config: &Config, input: &B) -> Result<T, Error<E>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        let body = Body::json(input)?;
        self.fetch(config, body).await
    }
}
