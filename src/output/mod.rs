//! Output module
//!
//! Writes fetched events to a file or stdout.
//!
//! # Overview
//!
//! - JSON Lines: one event object per line
//! - Pretty: a single indented JSON array
//! - Field projection: one value per line, taken from a dotted path
//!   such as `recipient` or `delivery-status.code`

mod writer;

pub use writer::{extract_field, OutputFormat, RecordWriter};
