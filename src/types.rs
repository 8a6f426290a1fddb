//! Common types used throughout mailgun-events
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// A single event log entry. Its fields are not interpreted.
pub type Record = serde_json::Map<String, JsonValue>;

/// Ordered query parameters, sent in this order
pub type QueryPairs = Vec<(String, String)>;

// ============================================================================
// Constants
// ============================================================================

/// Number of events requested per page
pub const PAGE_LIMIT: usize = 300;

/// Username sent with every Basic auth header
pub const API_USERNAME: &str = "api";

/// Base URL for the EU region
pub const EU_BASE_URL: &str = "https://api.eu.mailgun.net";

/// Base URL for the US region
pub const US_BASE_URL: &str = "https://api.mailgun.net";

// ============================================================================
// Region
// ============================================================================

/// API region
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Eu,
    Us,
}

impl Region {
    /// Lowercase name as used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eu => "eu",
            Region::Us => "us",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eu" => Ok(Region::Eu),
            "us" => Ok(Region::Us),
            other => Err(Error::invalid_argument(format!(
                "Unknown region '{other}' (expected 'eu' or 'us')"
            ))),
        }
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// Base URLs per region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base URL for [`Region::Eu`]
    pub eu: String,
    /// Base URL for [`Region::Us`]
    pub us: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            eu: EU_BASE_URL.to_string(),
            us: US_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point both regions at the same base URL
    pub fn single(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            eu: base_url.clone(),
            us: base_url,
        }
    }

    /// Base URL for a region
    pub fn base_url(&self, region: Region) -> &str {
        match region {
            Region::Eu => &self.eu,
            Region::Us => &self.us,
        }
    }

    /// First-page URL: `{base}/v3/{resource_id}/events`
    ///
    /// The resource id is encoded as a single path segment.
    pub fn events_url(&self, region: Region, resource_id: &str) -> Result<String> {
        if resource_id.trim().is_empty() {
            return Err(Error::invalid_argument("Resource id must not be empty"));
        }

        let mut url = Url::parse(self.base_url(region))?;
        url.path_segments_mut()
            .map_err(|()| {
                Error::invalid_argument(format!(
                    "Base URL '{}' cannot carry a path",
                    self.base_url(region)
                ))
            })?
            .pop_if_empty()
            .extend(["v3", resource_id, "events"]);

        Ok(url.to_string())
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff between caller-side retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
