//! Outbound HTTP seam shared by all fetch adapters
//!
//! Adapters talk to a [`Transport`] rather than to `reqwest` directly, which
//! keeps them free of connection state and lets tests substitute canned
//! responses.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

use crate::DashboardError;
use crate::error::FetchError;

/// A single GET request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl GetRequest {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn query<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Looks up a query parameter by name
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Performs GET requests and decodes the body as JSON
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, request: &GetRequest) -> Result<Value, FetchError>;
}

/// `reqwest` backed transport.
///
/// Idle pooling is disabled so every call gets its own connection which is
/// released with the response.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, DashboardError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(level = "debug", skip(self, request), fields(url = %request.url))]
    async fn get_json(&self, request: &GetRequest) -> Result<Value, FetchError> {
        let start = Instant::now();

        let mut builder = self.client.get(&request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            warn!("Network error after {:.3}s: {}", start.elapsed().as_secs_f64(), e);
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
