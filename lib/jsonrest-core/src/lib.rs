//! Core types and resolution pipeline for jsonrest.
//!
//! This crate is transport-agnostic. It provides:
//! - [`Config`] and [`Backend`] - the description of one request
//! - [`encode_query`] - query string encoding
//! - [`build_request`], [`Request`] and [`RequestBuilder`] - outgoing requests
//! - [`HttpClient`] - the contract an HTTP engine implements
//! - [`resolve`] and [`Outcome`] - execution and classification of responses
//! - [`Error`] and [`Result`] - error handling
//! - [`describe_attempt`] and [`DiagnosticSink`] - per-attempt diagnostics
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)
//!
//! The hyper-based transport and the typed façade live in the `jsonrest`
//! crate.

mod body;
mod client;
mod config;
mod diagnostics;
mod error;
mod method;
pub mod prelude;
mod query;
mod request;
mod resolve;
mod response;

pub use body::{Body, ContentType, from_json, to_json};
pub use client::HttpClient;
pub use config::{Backend, BaseUrl, Config, DEFAULT_TIMEOUT};
pub use diagnostics::{DiagnosticSink, NO_INPUT, NO_OUTPUT, describe_attempt, pretty_print};
pub use error::{DecodeFailure, Error, NoContent, Result, TransportError};
pub use method::Method;
pub use query::encode_query;
pub use request::{Request, RequestBuilder, build_request};
pub use resolve::{Outcome, classify, resolve};
pub use response::{Response, Success, flatten_headers, is_success_status};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
