//! Events API client
//!
//! [`EventsClient`] is the entry point: it pairs a transport with an API key
//! and exposes `get`, which returns every event for a domain and time range.

use crate::auth::Credentials;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, Transport};
use crate::pagination::Paginator;
use crate::query::{QueryParameters, QuerySpec};
use crate::types::{Endpoints, Record, Region};
use std::sync::Arc;

/// Client for the Mailgun Events API
///
/// The transport is injected so that callers decide on timeouts, rate
/// limits and test doubles. The client keeps no state between calls, so
/// one instance can serve concurrent `get` calls.
///
/// # Example
///
/// ```rust,ignore
/// let client = EventsClient::from_api_key("key-...")?;
/// let params = QueryParameters::between(begin, end).filter("event", "delivered");
/// let events = client.get(Region::Eu, "mg.example.com", params).await?;
/// ```
#[derive(Debug, Clone)]
pub struct EventsClient {
    paginator: Paginator,
    credentials: Credentials,
}

impl EventsClient {
    /// Create a client over an existing transport
    pub fn new(transport: Arc<dyn Transport>, credentials: Credentials) -> Self {
        Self {
            paginator: Paginator::new(transport),
            credentials,
        }
    }

    /// Create a client with a default [`HttpClient`]
    pub fn from_api_key(api_key: impl Into<String>) -> Result<Self> {
        let transport = HttpClient::with_config(HttpClientConfig::default())?;
        Ok(Self::new(Arc::new(transport), Credentials::new(api_key)))
    }

    /// Use custom regional endpoints
    #[must_use]
    pub fn with_endpoints(self, endpoints: Endpoints) -> Self {
        let transport = self.paginator.transport();
        Self {
            paginator: Paginator::with_endpoints(transport, endpoints),
            credentials: self.credentials,
        }
    }

    /// Credentials sent with every request
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Endpoints used for the first request of each query
    pub fn endpoints(&self) -> &Endpoints {
        self.paginator.endpoints()
    }

    /// Fetch every event for `resource_id` matching `parameters`
    pub async fn get(
        &self,
        region: Region,
        resource_id: &str,
        parameters: QueryParameters,
    ) -> Result<Vec<Record>> {
        let spec = QuerySpec::new(region, resource_id, parameters);
        self.collect_all(&spec).await
    }

    /// Fetch every event described by `spec`
    pub async fn collect_all(&self, spec: &QuerySpec) -> Result<Vec<Record>> {
        self.paginator.collect_all(spec, &self.credentials).await
    }
}
