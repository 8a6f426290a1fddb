//! Scripted transport and page builders shared by unit tests

use crate::error::{Error, Result};
use crate::http::{RequestConfig, Transport, TransportResponse};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A request seen by [`ScriptedTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub config: RequestConfig,
}

/// Replays queued responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with a JSON body
    pub fn push_json(&self, body: Value) {
        self.push(Ok(TransportResponse::new(200, body.to_string())));
    }

    /// Queue a raw result
    pub fn push(&self, response: Result<TransportResponse>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str, request: RequestConfig) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            config: request,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::http_status(599, "no scripted response left")))
    }
}

/// Body of an events page with `count` items numbered from `start`
pub fn page_body(start: usize, count: usize, next: &str) -> Value {
    let items: Vec<Value> = (start..start + count)
        .map(|n| json!({ "id": format!("evt-{n}"), "event": "delivered" }))
        .collect();
    json!({
        "items": items,
        "paging": { "next": next, "previous": "https://example.invalid/prev" }
    })
}

/// Ids of a record list, for compact assertions
pub fn ids(records: &[crate::types::Record]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.get("id").and_then(Value::as_str).map(String::from))
        .collect()
}
