use super::{DEFAULT_BASE_URL, GraphSource, graph_from_response, graph_url};
use crate::error::FetchError;
use crate::graph::Graph;
use tracing::debug;

/// Fetches blueprint graphs over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGraphClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGraphClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpGraphClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl GraphSource for HttpGraphClient {
    async fn fetch(&self, tenant_id: &str, workflow_id: &str) -> Result<Graph, FetchError> {
        let url = graph_url(&self.base_url, tenant_id, workflow_id);
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.clone(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::ACCEPT,
                "application/json, application/problem+json",
            )
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport)?;

        debug!(%url, status, bytes = text.len(), "fetched blueprint graph");
        graph_from_response(&url, status, &text)
    }
}
