//! Small helper for calling JSON REST APIs.
//!
//! Describe a request with a [`Config`], pick a [`Body`], and let
//! [`RestClient`] build, send and resolve it. Non-2xx answers are decoded
//! into the error payload type of your choice.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use jsonrest::{BaseUrl, Body, Config, Error, Method, RestClient};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct ApiMessage {
//!     message: String,
//! }
//!
//! # async fn run() -> Result<(), Error<ApiMessage>> {
//! let api = Arc::new(BaseUrl::new("https://api.example.com"));
//! let client = RestClient::default().with_tracing();
//!
//! let config = Config::new(Method::Get, api, "/users/42");
//! match client.fetch::<User, ApiMessage>(&config, Body::Empty).await {
//!     Ok(user) => println!("{}", user.name),
//!     Err(Error::Api { status, error }) => println!("{status}: {}", error.message),
//!     Err(err) => return Err(err),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod connector;
pub mod prelude;
mod rest;

// Re-export client types
pub use client::{HyperClient, HyperClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use rest::{RestClient, TracingSink};

// Re-export core types
pub use jsonrest_core::{
    Backend, BaseUrl, Body, Config, ContentType, DEFAULT_TIMEOUT, DecodeFailure, DiagnosticSink,
    Error, HttpClient, Method, NO_INPUT, NO_OUTPUT, NoContent, Outcome, Request, RequestBuilder,
    Response, Result, Success, TransportError, build_request, classify, describe_attempt,
    encode_query, flatten_headers, from_json, is_success_status, pretty_print, resolve, to_json,
};

// Re-export http types for status codes and headers
pub use jsonrest_core::{StatusCode, header};
