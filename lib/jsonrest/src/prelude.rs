//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use jsonrest::prelude::*;
//! ```

pub use crate::{
    BaseUrl, Body, ClientConfig, Config, DiagnosticSink, Error, HttpClient, HyperClient, Method,
    NoContent, Result, RestClient, StatusCode, Success, TracingSink, header,
};
pub use serde::{Deserialize, Serialize};
