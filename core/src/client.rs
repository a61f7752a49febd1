use crate::config::DashboardConfig;
use crate::context::ContextSummary;
use crate::dataset::{Dataset, ModuleKind};
use crate::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Validated `/api/data` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQuery {
    pub suburb: String,
    pub modules: Vec<ModuleKind>,
    pub property_type: String,
}

impl DataQuery {
    /// Fails fast, before any network traffic, on a blank suburb or empty module set
    pub fn new(suburb: &str, modules: &[ModuleKind], property_type: &str) -> Result<Self> {
        let suburb = suburb.trim();
        if suburb.is_empty() {
            return Err(DashboardError::Validation(
                "Please enter a suburb name".to_string(),
            ));
        }
        if modules.is_empty() {
            return Err(DashboardError::Validation(
                "Please select at least one data module".to_string(),
            ));
        }

        let mut unique: Vec<ModuleKind> = Vec::with_capacity(modules.len());
        for kind in modules {
            if !unique.contains(kind) {
                unique.push(*kind);
            }
        }

        Ok(Self {
            suburb: suburb.to_string(),
            modules: unique,
            property_type: property_type.to_string(),
        })
    }

    /// Module names joined with `,`
    pub fn endpoints(&self) -> String {
        self.modules
            .iter()
            .map(ModuleKind::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("suburb", self.suburb.clone()),
            ("endpoints", self.endpoints()),
            ("property_type", self.property_type.clone()),
        ]
    }
}

/// `/api/chat` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: ContextSummary,
}

/// `/api/chat` success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// The two backend calls the dashboard depends on
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    /// Fetch the dataset for a suburb and module selection
    async fn fetch_dataset(&self, query: &DataQuery) -> Result<Dataset>;

    /// Ask the assistant a question grounded in `request.context`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;
}

/// reqwest-backed implementation talking to the dashboard HTTP API
#[derive(Clone)]
pub struct HttpBackend {
    pub(crate) http: Client,
    pub(crate) cfg: DashboardConfig,
}

impl HttpBackend {
    pub fn new(cfg: DashboardConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .user_agent(&cfg.user_agent)
            .build()
            .map_err(|e| DashboardError::Fetch {
                status: None,
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { http, cfg })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(DashboardConfig::default())
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.cfg
    }
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn fetch_dataset(&self, query: &DataQuery) -> Result<Dataset> {
        let url = self.cfg.endpoint("/api/data");
        debug!(
            target: "dashboard_client",
            url = %url,
            suburb = %query.suburb,
            endpoints = %query.endpoints(),
            "GET dataset"
        );

        let resp = self
            .http
            .get(&url)
            .query(&query.query_pairs())
            .send()
            .await
            .map_err(|e| {
                warn!(target: "dashboard_client", error = %e, "Dataset request failed");
                DashboardError::Fetch {
                    status: None,
                    message: format!("Dataset request failed: {e}"),
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(target: "dashboard_client", %status, "Dataset request returned error");
            return Err(DashboardError::Fetch {
                status: Some(status.as_u16()),
                message: format!("HTTP error! status: {}", status.as_u16()),
            });
        }

        let body = resp.text().await.map_err(|e| DashboardError::Fetch {
            status: None,
            message: format!("Failed to read dataset body: {e}"),
        })?;
        Dataset::from_json(&body)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.cfg.endpoint("/api/chat");
        debug!(target: "dashboard_client", url = %url, "POST chat message");

        let resp = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| DashboardError::Chat(format!("Chat HTTP error: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            error!(target: "dashboard_client", %status, body = %text, "Chat endpoint error");
            return Err(DashboardError::Chat(format!(
                "Chat error: status={} body={}",
                status, text
            )));
        }

        let val: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| DashboardError::Chat(format!("Failed to parse chat JSON: {e}")))?;
        let response = val
            .get("response")
            .and_then(|r| r.as_str())
            .ok_or_else(|| DashboardError::Chat("Missing `response` in chat reply".into()))?;
        Ok(ChatReply {
            response: response.to_string(),
        })
    }
}
