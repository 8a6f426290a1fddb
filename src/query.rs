//! Query description and parameter building
//!
//! A [`QuerySpec`] names the region, the resource (sending domain) and the
//! time window plus filters. [`QueryParameters::to_query`] validates it and
//! produces the query string sent with every page request.

use crate::error::{Error, Result};
use crate::types::{QueryPairs, Region, PAGE_LIMIT};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::collections::BTreeMap;

/// Query keys set by the client itself. Filters may not use them.
pub const RESERVED_KEYS: [&str; 3] = ["begin", "end", "limit"];

/// Time window and filters for an events query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    /// Start of the window
    pub begin: Option<DateTime<Utc>>,
    /// End of the window
    pub end: Option<DateTime<Utc>>,
    /// Filter fields, e.g. `event=delivered`
    pub filter: Option<BTreeMap<String, String>>,
}

impl QueryParameters {
    /// Create empty parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters for a time window
    pub fn between<Tz: TimeZone>(begin: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self::new().begin(begin).end(end)
    }

    /// Set the start of the window
    #[must_use]
    pub fn begin<Tz: TimeZone>(mut self, begin: DateTime<Tz>) -> Self {
        self.begin = Some(begin.with_timezone(&Utc));
        self
    }

    /// Set the end of the window
    #[must_use]
    pub fn end<Tz: TimeZone>(mut self, end: DateTime<Tz>) -> Self {
        self.end = Some(end.with_timezone(&Utc));
        self
    }

    /// Add a filter field
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the filter map
    #[must_use]
    pub fn with_filter(mut self, filter: BTreeMap<String, String>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Validate and build the ordered query parameters
    ///
    /// `begin`, `end` (Unix seconds) and `limit` come first, followed by the
    /// filter fields in key order. `begin <= end` is left to the API.
    pub fn to_query(&self) -> Result<QueryPairs> {
        let begin = self
            .begin
            .ok_or_else(|| Error::invalid_argument("Missing begin timestamp"))?;
        let end = self
            .end
            .ok_or_else(|| Error::invalid_argument("Missing end timestamp"))?;

        let mut query = vec![
            ("begin".to_string(), begin.timestamp().to_string()),
            ("end".to_string(), end.timestamp().to_string()),
            ("limit".to_string(), PAGE_LIMIT.to_string()),
        ];

        if let Some(filter) = &self.filter {
            for (key, value) in filter {
                if RESERVED_KEYS.contains(&key.as_str()) {
                    return Err(Error::invalid_argument(format!(
                        "Filter key '{key}' is reserved"
                    )));
                }
                query.push((key.clone(), value.clone()));
            }
        }

        Ok(query)
    }
}

/// Everything needed to fetch one result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// API region
    pub region: Region,
    /// Resource the events belong to (the sending domain)
    pub resource_id: String,
    /// Time window and filters
    pub parameters: QueryParameters,
}

impl QuerySpec {
    /// Create a query spec
    pub fn new(region: Region, resource_id: impl Into<String>, parameters: QueryParameters) -> Self {
        Self {
            region,
            resource_id: resource_id.into(),
            parameters,
        }
    }
}

/// Parse a timestamp given on the command line or in a config file
///
/// Accepted forms:
/// - Unix seconds (`1623456000`)
/// - RFC 3339 (`2021-06-12T00:00:00+02:00`)
/// - `YYYY-MM-DD HH:MM[:SS]` and `YYYY-MM-DD`, read as UTC
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(secs) = input.parse::<i64>() {
        return Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| Error::invalid_argument(format!("Timestamp out of range: {input}")));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(naive) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }

    Err(Error::invalid_argument(format!(
        "Unrecognised timestamp '{input}'"
    )))
}

/// Parse `key=value` pairs into a filter map
///
/// The value may itself contain `=`. Later duplicates win.
pub fn parse_filter<I, S>(pairs: I) -> Result<BTreeMap<String, String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut filter = BTreeMap::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::invalid_argument(format!("Filter '{pair}' is not key=value")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::invalid_argument(format!(
                "Filter '{pair}' has an empty key"
            )));
        }
        filter.insert(key.to_string(), value.trim().to_string());
    }
    Ok(filter)
}
