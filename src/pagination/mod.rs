//! Pagination module
//!
//! Fetches an events result set page by page and stitches it together.
//!
//! # Overview
//!
//! - [`PageFetcher`] performs one authenticated request and decodes it into
//!   a [`Page`] (items plus the continuation URL).
//! - [`Paginator`] drives the fetcher, owns the [`FetchState`] for the
//!   duration of one call and decides when to stop:
//!   - after the first page, stop if it held fewer than `limit` items;
//!   - after any later page, stop only if it was empty.

mod fetcher;
mod paginator;
mod types;

pub use fetcher::PageFetcher;
pub use paginator::Paginator;
pub use types::{FetchState, NextPage, Page};
