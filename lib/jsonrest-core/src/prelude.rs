//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use jsonrest_core::prelude::*;
//! ```

pub use crate::{
    Backend, BaseUrl, Body, Config, DiagnosticSink, Error, HttpClient, Method, NoContent, Outcome,
    Request, Response, Result, Success, TransportError, from_json, to_json,
};
