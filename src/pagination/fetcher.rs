//! Single-request page fetcher

use super::types::Page;
use crate::auth::Credentials;
use crate::error::Result;
use crate::http::{RequestConfig, Transport};
use std::sync::Arc;

/// Performs exactly one round trip and decodes the result
///
/// No retries and no logging: failures go straight back to the caller.
#[derive(Clone)]
pub struct PageFetcher {
    transport: Arc<dyn Transport>,
}

impl PageFetcher {
    /// Create a fetcher over a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// The transport requests go through
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Fetch and decode the page at `url`
    ///
    /// `url` is either the first-page endpoint or a continuation URL from a
    /// previous page. The query is sent as given in both cases.
    pub async fn fetch(
        &self,
        url: &str,
        query: &[(String, String)],
        credentials: &Credentials,
    ) -> Result<Page> {
        let request = RequestConfig::new()
            .header("Authorization", credentials.authorization_header())
            .queries(query.iter().cloned());

        let response = self.transport.get(url, request).await?.error_for_status()?;

        Page::from_body(&response.body)
    }
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher").finish_non_exhaustive()
    }
}
