//! Authentication module
//!
//! The Events API uses HTTP Basic authentication with the fixed username
//! `api` and the account's API key as the password.

mod credentials;

pub use credentials::Credentials;
