//! Contracts for loading a workflow graph from an external service.

#[cfg(feature = "http-client")]
mod http;

#[cfg(feature = "http-client")]
pub use http::HttpGraphClient;

use crate::error::{FetchBody, FetchError};
use crate::graph::Graph;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Anything that can produce the graph document of a workflow.
#[allow(async_fn_in_trait)]
pub trait GraphSource {
    async fn fetch(&self, tenant_id: &str, workflow_id: &str) -> Result<Graph, FetchError>;
}

/// `{base}/api/v1/{tenant}/actions/blueprints/{workflow}/graph`, with both ids
/// percent-encoded. A missing trailing slash on `base_url` is tolerated.
pub fn graph_url(base_url: &str, tenant_id: &str, workflow_id: &str) -> String {
    format!(
        "{}/api/v1/{}/actions/blueprints/{}/graph",
        base_url.trim_end_matches('/'),
        urlencoding::encode(tenant_id),
        urlencoding::encode(workflow_id)
    )
}

/// Interprets a response body: empty is `None`, JSON is parsed, anything else
/// is kept as raw text.
pub fn decode_body(text: &str) -> Option<FetchBody> {
    if text.is_empty() {
        return None;
    }
    match serde_json::from_str(text) {
        Ok(value) => Some(FetchBody::Json(value)),
        Err(_) => Some(FetchBody::Text(text.to_string())),
    }
}

/// Turns a completed response into a graph or a typed failure.
pub fn graph_from_response(url: &str, status: u16, text: &str) -> Result<Graph, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Http {
            url: url.to_string(),
            status,
            body: decode_body(text),
        });
    }
    serde_json::from_str(text).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}
