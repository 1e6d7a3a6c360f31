//! HTTP client for the remote cost-estimation agent

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

use super::{check_status, AgentService};
use crate::config::RemoteConfig;
use crate::error::{Error, Result};

/// Remote agent service over HTTP
pub struct HttpAgentService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpAgentService {
    /// Create a client for the configured agent service
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.agent_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl AgentService for HttpAgentService {
    async fn estimate(&self, payload: &Value) -> Result<Value> {
        let response = self
            .authorize(self.client.post(format!("{}/api/estimate", self.base_url)))
            .json(payload)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}
