//! API credentials and the Basic `Authorization` header

use crate::types::API_USERNAME;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;

/// API key used for Basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Create credentials from an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Username sent with every request
    pub fn username(&self) -> &str {
        API_USERNAME
    }

    /// The raw API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Value of the `Authorization` header: `Basic base64("api:<key>")`
    pub fn authorization_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", API_USERNAME, self.api_key));
        format!("Basic {token}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &API_USERNAME)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
