//! Drives the page fetcher until a result set is complete

use super::fetcher::PageFetcher;
use super::types::{FetchState, NextPage, Page};
use crate::auth::Credentials;
use crate::error::Result;
use crate::http::Transport;
use crate::query::QuerySpec;
use crate::types::{Endpoints, Record, PAGE_LIMIT};
use std::sync::Arc;
use tracing::{debug, info};

/// Collects every event matching a query, in fetch order
///
/// Pages are fetched one after the other since each URL comes from the
/// previous response. A `Paginator` holds no per-call state and can serve
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct Paginator {
    fetcher: PageFetcher,
    endpoints: Endpoints,
}

impl Paginator {
    /// Create a paginator using the default regional endpoints
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_endpoints(transport, Endpoints::default())
    }

    /// Create a paginator with custom endpoints
    pub fn with_endpoints(transport: Arc<dyn Transport>, endpoints: Endpoints) -> Self {
        Self {
            fetcher: PageFetcher::new(transport),
            endpoints,
        }
    }

    /// The transport shared with the page fetcher
    pub fn transport(&self) -> Arc<dyn Transport> {
        self.fetcher.transport()
    }

    /// Endpoints used to resolve the first-page URL
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetch all pages for `spec` and return their items concatenated
    ///
    /// Arguments are validated before any request goes out. Any error
    /// aborts the whole call and nothing gathered so far is returned.
    pub async fn collect_all(
        &self,
        spec: &QuerySpec,
        credentials: &Credentials,
    ) -> Result<Vec<Record>> {
        let query = spec.parameters.to_query()?;
        let first_url = self.endpoints.events_url(spec.region, &spec.resource_id)?;

        let mut state = FetchState::new();
        let mut next = NextPage::with_url(first_url);

        while let NextPage::Continue { url } = next {
            let page = self.fetcher.fetch(&url, &query, credentials).await?;
            debug!(
                "Page {}: fetched {} events",
                state.page_count + 1,
                page.len()
            );
            next = self.process_page(page, &mut state);
        }

        info!(
            "Collected {} events for {} in {} pages",
            state.total_items(),
            spec.resource_id,
            state.page_count
        );

        Ok(state.into_records())
    }

    /// Absorb a page and decide whether to keep going
    ///
    /// The first page ends the run when it is short (fewer than `limit`
    /// items). Later pages end it only when empty, so a short continuation
    /// page is always followed by one more request.
    pub fn process_page(&self, page: Page, state: &mut FetchState) -> NextPage {
        let count = page.len();
        state.absorb(page);

        let finished = if state.page_count == 1 {
            count < PAGE_LIMIT
        } else {
            count == 0
        };

        if finished {
            return NextPage::Done;
        }

        match &state.cursor_url {
            Some(url) => NextPage::with_url(url.clone()),
            None => NextPage::Done,
        }
    }
}
