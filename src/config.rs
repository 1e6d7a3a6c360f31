//! Configuration for the proxy

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main proxy configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote service configuration
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes (default: 100MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Remote document and agent service configuration
///
/// One credential covers both services; when it is absent every proxied
/// operation fails with a configuration error before any outbound call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the remote document (knowledge base) service
    pub document_url: String,
    /// Base URL of the remote cost-estimation agent service
    pub agent_url: String,
    /// Access credential, resolved once at startup
    #[serde(default)]
    pub api_key: Option<String>,
    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            document_url: "http://localhost:9380".to_string(),
            agent_url: "http://localhost:9381".to_string(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

impl ProxyConfig {
    /// Load configuration from the environment.
    ///
    /// `RAG_PROXY_CONFIG` names an optional TOML file; `RAG_SERVICE_API_KEY`
    /// overrides the credential. Both are read exactly once here, so the
    /// proxies receive the credential at construction instead of consulting
    /// the environment per request.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("RAG_PROXY_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(key) = std::env::var("RAG_SERVICE_API_KEY") {
            if !key.is_empty() {
                config.remote.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&text)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }
}
