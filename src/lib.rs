// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # mailgun-events
//!
//! Fetch every event in a time range from the Mailgun Events API.
//!
//! The API returns at most 300 events per response together with a `next`
//! URL. This crate follows those URLs and hands back the whole result set
//! as one ordered `Vec`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chrono::{TimeZone, Utc};
//! use mailgun_events::{EventsClient, QueryParameters, Region, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = EventsClient::from_api_key("key-...")?;
//!
//!     let params = QueryParameters::between(
//!         Utc.with_ymd_and_hms(2021, 6, 12, 0, 0, 0).unwrap(),
//!         Utc.with_ymd_and_hms(2021, 6, 12, 23, 59, 0).unwrap(),
//!     )
//!     .filter("event", "delivered");
//!
//!     let events = client.get(Region::Eu, "mg.example.com", params).await?;
//!     for event in &events {
//!         println!("{}", event["recipient"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  EventsClient::get(region, domain, params) → Vec<Record> │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//! ┌───────────┬───────────────┴──────────┬───────────────────┐
//! │   Query   │        Pagination        │     Transport     │
//! ├───────────┼──────────────────────────┼───────────────────┤
//! │ begin/end │ Paginator (stop rules)   │ HttpClient        │
//! │ limit=300 │ PageFetcher (1 request)  │ Timeout           │
//! │ filters   │ FetchState               │ Rate Limit        │
//! └───────────┴──────────────────────────┴───────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Basic authentication
pub mod auth;

/// HTTP transport with timeouts and rate limiting
pub mod http;

/// Query parameters and validation
pub mod query;

/// Page fetching and aggregation
pub mod pagination;

/// Events API client
pub mod client;

/// Caller-side retry
pub mod retry;

/// Configuration file support
pub mod config;

/// Writing fetched events
pub mod output;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::Credentials;
pub use client::EventsClient;
pub use error::{Error, Result};
pub use query::{QueryParameters, QuerySpec};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
