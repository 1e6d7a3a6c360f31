//! Application state for the proxy server

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::error::Result;
use crate::proxy::{AgentProxy, DocumentProxy};
use crate::remote::{HttpAgentService, HttpDocumentService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration (read-only after construction)
    config: ProxyConfig,
    /// Document-lifecycle proxy
    documents: DocumentProxy,
    /// Cost-estimation proxy
    agent: AgentProxy,
}

impl AppState {
    /// Create new application state from configuration.
    ///
    /// The credential is resolved here and injected into both proxies;
    /// nothing reads the environment after this point.
    pub fn new(config: ProxyConfig) -> Result<Self> {
        if config.remote.api_key.is_none() {
            tracing::warn!(
                "No remote API key configured; all proxied operations will fail until one is set"
            );
        }

        let document_service = Arc::new(HttpDocumentService::new(&config.remote)?);
        let documents = DocumentProxy::new(document_service, config.remote.api_key.clone());

        let agent_service = Arc::new(HttpAgentService::new(&config.remote)?);
        let agent = AgentProxy::new(agent_service, config.remote.api_key.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                documents,
                agent,
            }),
        })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    pub fn documents(&self) -> &DocumentProxy {
        &self.inner.documents
    }

    pub fn agent(&self) -> &AgentProxy {
        &self.inner.agent
    }
}
