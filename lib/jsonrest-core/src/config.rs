//! Per-request configuration.
//!
//! A [`Config`] describes exactly one request: the [`Method`], the
//! [`Backend`] that provides the base URL, the path, the query parameters,
//! the headers and the timeout.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use jsonrest_core::{BaseUrl, Config, Method};
//!
//! let config = Config::new(Method::Get, Arc::new(BaseUrl::new("https://api.example.com")), "/users")
//!     .with_param("page", "1")
//!     .with_header("Accept", "application/json")
//!     .with_timeout(Duration::from_secs(5));
//!
//! assert_eq!(config.path(), "/users");
//! assert_eq!(config.timeout(), Duration::from_secs(5));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::Method;

/// Timeout applied when a [`Config`] does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Provides the base URL of a logical API.
pub trait Backend: Send + Sync {
    /// Base URL every request path is joined to.
    fn base_url(&self) -> &str;
}

/// A plain base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new base URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Get the URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Backend for BaseUrl {
    fn base_url(&self) -> &str {
        &self.0
    }
}

impl Backend for String {
    fn base_url(&self) -> &str {
        self
    }
}

impl Backend for &'static str {
    fn base_url(&self) -> &str {
        self
    }
}

/// Description of one request.
///
/// Built once per call site with the `with_*` methods, then only read.
#[derive(Clone)]
pub struct Config {
    method: Method,
    backend: Arc<dyn Backend>,
    path: String,
    url_parameters: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("method", &self.method)
            .field("base_url", &self.backend.base_url())
            .field("path", &self.path)
            .field("url_parameters", &self.url_parameters)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Creates a configuration with no parameters, no headers and the
    /// [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn new(method: Method, backend: Arc<dyn Backend>, path: impl Into<String>) -> Self {
        Self {
            method,
            backend,
            path: path.into(),
            url_parameters: BTreeMap::new(),
            headers: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets a query parameter, replacing any previous value for `name`.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_parameters.insert(name.into(), value.into());
        self
    }

    /// Sets multiple query parameters.
    #[must_use]
    pub fn with_params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.url_parameters.extend(params);
        self
    }

    /// Sets a header, replacing any previous value for the exact same `name`.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Backend providing the base URL.
    #[must_use]
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Request path, joined to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters.
    #[must_use]
    pub const fn url_parameters(&self) -> &BTreeMap<String, String> {
        &self.url_parameters
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns `true` if a header with this name is set (case-insensitive).
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|key| key.eq_ignore_ascii_case(name))
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
