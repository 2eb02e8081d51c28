//! HTTP request building.
//!
//! [`build_request`] turns a [`Config`] and an optional raw body into a
//! [`Request`], the descriptor handed to an [`HttpClient`](crate::HttpClient).
//! [`Request::builder`] is available for callers that already have a URL.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use jsonrest_core::{BaseUrl, Config, Method, build_request};
//!
//! let config = Config::new(Method::Post, Arc::new(BaseUrl::new("https://example.com/")), "/cheese")
//!     .with_param("age", "5");
//!
//! let (request, _timeout) = build_request(&config, None);
//! assert_eq!(request.url(), "https://example.com/cheese?age=5");
//! ```

use std::time::Duration;

use bytes::Bytes;

use crate::{Config, Method, encode_query};

/// An HTTP request with method, URL, headers, and optional body.
///
/// Headers keep insertion order and may repeat: every entry is sent.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL, exactly as assembled.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers, in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All header values by name (case-insensitive).
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Adds a header only if no header with that name is present.
    #[must_use]
    pub fn header_or_default(mut self, name: &str, value: &str) -> Self {
        if self.header(name).is_none() {
            self.headers.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, String, Vec<(String, String)>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header. An existing header with the same name is kept.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    ///
    /// A body gets a `Content-Length` header matching its byte count, replacing
    /// any `Content-Length` set by the caller.
    #[must_use]
    pub fn build(mut self) -> Request {
        if let Some(body) = &self.body {
            self.headers
                .retain(|(key, _)| !key.eq_ignore_ascii_case("content-length"));
            self.headers
                .push(("Content-Length".to_string(), body.len().to_string()));
        }

        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

/// Build the request described by `config`.
///
/// The URL is the backend base URL joined to the path, followed by the
/// encoded query parameters. At the join point a trailing `/` on the base and
/// a leading `/` on the path collapse into one, and a missing separator is
/// added; nothing else in the URL is touched.
///
/// Returns the request and the timeout to execute it with.
#[must_use]
pub fn build_request(config: &Config, body: Option<Bytes>) -> (Request, Duration) {
    let url = format!(
        "{}{}",
        join_url(config.backend().base_url(), config.path()),
        encode_query(config.url_parameters())
    );

    let mut builder = Request::builder(config.method(), url).headers(
        config
            .headers()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone())),
    );
    if let Some(body) = body {
        builder = builder.body(body);
    }

    (builder.build(), config.timeout())
}

fn join_url(base: &str, path: &str) -> String {
    if base.is_empty() || path.is_empty() {
        return format!("{base}{path}");
    }

    match (base.strip_suffix('/'), path.starts_with('/')) {
        (Some(trimmed), true) => format!("{trimmed}{path}"),
        (None, false) => format!("{base}/{path}"),
        _ => format!("{base}{path}"),
    }
}
