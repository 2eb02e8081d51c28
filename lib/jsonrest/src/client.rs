//! HTTP client implementation using hyper-util.

use std::time::{Duration, Instant};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tracing::{Instrument, Level, debug, span, warn};

use crate::{
    HttpClient, Request, Response, TransportError,
    config::{ClientConfig, ClientConfigBuilder},
    connector::https_connector,
};

/// HTTP client using hyper-util with connection pooling and TLS.
///
/// Cloning is cheap: clones share the connection pool.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use jsonrest::HyperClient;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(10))
///     .pool_idle_per_host(8)
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a new client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let connector = https_connector(config.connect_timeout);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a hyper request from a jsonrest request.
    fn build_hyper_request(request: Request) -> Result<http::Request<Full<Bytes>>, TransportError> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());

        // `header` appends, so repeated names are all sent
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = body.map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|e| TransportError::invalid_request(e.to_string()))
    }

    async fn exchange(
        &self,
        hyper_request: http::Request<Full<Bytes>>,
    ) -> Result<Response, TransportError> {
        let response = self
            .inner
            .request(hyper_request)
            .await
            .map_err(map_hyper_error)?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| TransportError::body(e.to_string()))?
            .to_bytes();

        Ok(Response::new(parts.status.as_u16(), parts.headers, body))
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for HyperClient {
    async fn execute(&self, request: Request, timeout: Duration) -> Result<Response, TransportError> {
        let method = request.method();
        let url = request.url().to_string();
        let timeout = self.config.effective_timeout(timeout);

        let span = span!(Level::DEBUG, "http_request", %method, %url);

        async move {
            let start = Instant::now();
            debug!(timeout_ms = millis(timeout), "sending request");

            let result = match Self::build_hyper_request(request) {
                Ok(hyper_request) => tokio::time::timeout(timeout, self.exchange(hyper_request))
                    .await
                    .unwrap_or(Err(TransportError::Timeout)),
                Err(err) => Err(err),
            };
            let elapsed_ms = millis(start.elapsed());

            match &result {
                Ok(response) => debug!(status = response.status(), elapsed_ms, "response received"),
                Err(err) => warn!(error = %err, elapsed_ms, "request failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

// Saturating conversion to u64 (truncates after ~584 million years)
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[allow(clippy::needless_pass_by_value)]
fn map_hyper_error(err: hyper_util::client::legacy::Error) -> TransportError {
    let msg = error_chain(&err);
    let lower = msg.to_ascii_lowercase();

    if lower.contains("ssl") || lower.contains("tls") || lower.contains("certificate") {
        return TransportError::tls(msg);
    }

    TransportError::connection(msg)
}

/// Join an error and its sources into one message.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

/// Builder for [`HyperClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use jsonrest::HyperClient;
///
/// let client = HyperClient::builder()
///     .connect_timeout(Duration::from_secs(2))
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
}

impl HyperClientBuilder {
    /// Cap every exchange at `timeout`.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        HyperClient::with_config(self.config.build())
    }
}
