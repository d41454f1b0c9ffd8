//! HTTP transport: single-attempt dispatch on top of `reqwest`.
//!
//! This layer knows nothing about retries or budgets; it assembles one
//! request (query string, multipart form, correlation headers), sends it
//! once, and hands the raw status and body back to the retry loop in
//! `client::core`.

pub mod http;

pub use http::{HttpTransport, TransportError};
