//! HTTP transport module
//!
//! The pagination core only needs one capability: issue a GET with headers
//! and query parameters and hand back the status and body. That capability
//! is the [`Transport`] trait. [`HttpClient`] is the reqwest-backed
//! implementation.
//!
//! # Features
//!
//! - **Timeouts**: Per-client default, overridable per request
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Status Mapping**: Non-2xx responses surface as `Error::HttpStatus`

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{RequestConfig, Transport, TransportResponse};
