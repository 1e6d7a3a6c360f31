//! Cost-estimation proxy: opaque pass-through to the remote agent

use serde_json::Value;
use std::sync::Arc;

use super::require_credential;
use crate::error::{Error, Result};
use crate::remote::AgentService;
use crate::types::response::EstimateResponse;
use crate::types::timestamp;

/// Proxy forwarding problem statements to the remote agent service.
///
/// Beyond a presence check on the prompt, the payload and the estimate are
/// treated as opaque values.
pub struct AgentProxy {
    service: Arc<dyn AgentService>,
    api_key: Option<String>,
}

impl AgentProxy {
    pub fn new(service: Arc<dyn AgentService>, api_key: Option<String>) -> Self {
        Self { service, api_key }
    }

    /// Forward the payload verbatim and return the remote's estimate
    pub async fn estimate(&self, payload: Value) -> Result<EstimateResponse> {
        require_credential(self.api_key.as_deref())?;

        let has_prompt = payload
            .get("prompt")
            .and_then(Value::as_str)
            .is_some_and(|p| !p.trim().is_empty());
        if !has_prompt {
            return Err(Error::Validation(
                "Missing required field: prompt".to_string(),
            ));
        }

        let raw = self.service.estimate(&payload).await?;

        Ok(EstimateResponse {
            success: true,
            estimate: decode_nested(raw),
            timestamp: timestamp(),
        })
    }
}

/// Some agent backends return the estimate as a JSON-encoded string; decode
/// one level when that happens, otherwise pass the value through untouched
fn decode_nested(value: Value) -> Value {
    match value {
        Value::String(s) => serde_json::from_str(&s).unwrap_or(Value::String(s)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeAgent {
        response: Value,
        payloads: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl AgentService for FakeAgent {
        async fn estimate(&self, payload: &Value) -> Result<Value> {
            self.payloads.lock().unwrap().push(payload.clone());
            Ok(self.response.clone())
        }
    }

    fn proxy_with(response: Value) -> (AgentProxy, Arc<FakeAgent>) {
        let service = Arc::new(FakeAgent {
            response,
            payloads: Mutex::new(Vec::new()),
        });
        let proxy = AgentProxy::new(service.clone(), Some("test-key".to_string()));
        (proxy, service)
    }

    #[tokio::test]
    async fn forwards_payload_verbatim() {
        let (proxy, service) = proxy_with(json!({"setup_cost": 100}));
        let payload = json!({"prompt": "estimate a chatbot", "monthly_queries": 5000});

        let response = proxy.estimate(payload.clone()).await.unwrap();
        assert!(response.success);
        assert_eq!(response.estimate, json!({"setup_cost": 100}));
        assert_eq!(service.payloads.lock().unwrap()[0], payload);
    }

    #[tokio::test]
    async fn decodes_string_encoded_estimate() {
        let (proxy, _) = proxy_with(json!("{\"monthly\": 42}"));

        let response = proxy
            .estimate(json!({"prompt": "estimate"}))
            .await
            .unwrap();
        assert_eq!(response.estimate, json!({"monthly": 42}));
    }

    #[tokio::test]
    async fn keeps_plain_string_estimate_as_is() {
        let (proxy, _) = proxy_with(json!("not json at all"));

        let response = proxy
            .estimate(json!({"prompt": "estimate"}))
            .await
            .unwrap();
        assert_eq!(response.estimate, json!("not json at all"));
    }

    #[tokio::test]
    async fn rejects_missing_or_blank_prompt() {
        let (proxy, service) = proxy_with(json!({}));

        for payload in [json!({}), json!({"prompt": ""}), json!({"prompt": "   "})] {
            let result = proxy.estimate(payload).await;
            assert!(matches!(result, Err(Error::Validation(_))));
        }
        assert!(service.payloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_credential_blocks_estimation() {
        let service = Arc::new(FakeAgent {
            response: json!({}),
            payloads: Mutex::new(Vec::new()),
        });
        let proxy = AgentProxy::new(service.clone(), None);

        let result = proxy.estimate(json!({"prompt": "estimate"})).await;
        assert!(matches!(result, Err(Error::Config(_))));
        assert!(service.payloads.lock().unwrap().is_empty());
    }
}
