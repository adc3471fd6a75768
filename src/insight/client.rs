use std::sync::Arc;

use reqwest::blocking::Client;

use crate::config::InsightConfig;
use crate::error::InsightError;

use super::request::{InsightRequest, InsightSummary};

/// Something that turns a dataset request into a written summary.
pub trait InsightService: Send + Sync {
    fn summarize(&self, request: &InsightRequest) -> Result<InsightSummary, InsightError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Posts the request as JSON and expects `{ "summary": ... }` back.
pub struct HttpInsightService {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpInsightService {
    pub fn new(config: &InsightConfig) -> Result<Self, InsightError> {
        let endpoint = config.endpoint.clone().ok_or(InsightError::NotConfigured)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }
}

impl InsightService for HttpInsightService {
    fn summarize(&self, request: &InsightRequest) -> Result<InsightSummary, InsightError> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let summary: InsightSummary = response.json()?;
        Ok(summary)
    }
}

/// Stand-in used when no endpoint is configured; every call fails.
pub struct UnconfiguredService;

impl InsightService for UnconfiguredService {
    fn summarize(&self, _request: &InsightRequest) -> Result<InsightSummary, InsightError> {
        Err(InsightError::NotConfigured)
    }
}

/// Pick the service for a configuration, logging why insights are off.
pub fn service_from_config(config: &InsightConfig) -> Arc<dyn InsightService> {
    match HttpInsightService::new(config) {
        Ok(service) => {
            log::info!("Insight service at {}", service.endpoint);
            Arc::new(service)
        }
        Err(InsightError::NotConfigured) => {
            log::warn!("GVA_INSIGHTS_URL is not set; insight generation is disabled");
            Arc::new(UnconfiguredService)
        }
        Err(e) => {
            log::error!("Failed to build insight client: {e}");
            Arc::new(UnconfiguredService)
        }
    }
}
