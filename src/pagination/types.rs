//! Pagination types
//!
//! Defines the decoded page, the per-call fetch state and the
//! continue/stop decision.

use crate::error::{Error, Result};
use crate::types::Record;
use serde::Deserialize;

/// One decoded response: a batch of events and the URL of the next batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Events on this page, in API order
    pub items: Vec<Record>,
    /// Continuation URL returned by the API
    pub next_url: Option<String>,
}

#[derive(Deserialize)]
struct EventsResponse {
    items: Vec<Record>,
    paging: Paging,
}

#[derive(Deserialize)]
struct Paging {
    next: String,
}

impl Page {
    /// Create a page
    pub fn new(items: Vec<Record>, next_url: Option<String>) -> Self {
        Self { items, next_url }
    }

    /// Decode a response body
    ///
    /// The body must be a JSON object with an `items` array of objects and
    /// a `paging.next` string. Extra fields are ignored.
    pub fn from_body(body: &str) -> Result<Self> {
        let response: EventsResponse = serde_json::from_str(body)
            .map_err(|e| Error::malformed(format!("Failed to decode events page: {e}")))?;

        Ok(Self {
            items: response.items,
            next_url: Some(response.paging.next),
        })
    }

    /// Number of events on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page carries no events
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Decision after processing a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch this URL next
    Continue {
        /// Continuation URL
        url: String,
    },
    /// The result set is complete
    Done,
}

impl NextPage {
    /// Create a continuation
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue { url: url.into() }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// State of one in-progress collection
///
/// Owned by a single `collect_all` call and consumed when it returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    /// Events gathered so far, in fetch order
    pub accumulated: Vec<Record>,
    /// Continuation URL from the most recent page
    pub cursor_url: Option<String>,
    /// Pages processed so far
    pub page_count: usize,
}

impl FetchState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page and remember its continuation URL
    pub fn absorb(&mut self, page: Page) {
        self.page_count += 1;
        self.accumulated.extend(page.items);
        self.cursor_url = page.next_url;
    }

    /// Total events gathered
    pub fn total_items(&self) -> usize {
        self.accumulated.len()
    }

    /// Give up the state, keeping only the events
    pub fn into_records(self) -> Vec<Record> {
        self.accumulated
    }
}
