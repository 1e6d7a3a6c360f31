//! HTTP client for the remote document service

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

use super::{check_status, DocumentService, ParseRequest};
use crate::config::RemoteConfig;
use crate::error::{Error, Result};

/// Remote document service over HTTP
pub struct HttpDocumentService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpDocumentService {
    /// Create a client for the configured document service
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.document_url.trim_end_matches('/').to_string(),
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
impl DocumentService for HttpDocumentService {
    async fn list_documents(&self, rag_id: &str) -> Result<Vec<String>> {
        let response = self
            .authorize(
                self.client
                    .get(format!("{}/api/documents", self.base_url))
                    .query(&[("ragId", rag_id)]),
            )
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn parse_file(&self, request: ParseRequest) -> Result<Value> {
        let part = reqwest::multipart::Part::bytes(request.data.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(&request.content_type)
            .map_err(|e| Error::Validation(format!("Invalid content type: {}", e)))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("parser", request.parser);

        if let Some(params) = request.chunk_params {
            form = form
                .text("chunk_size", params.chunk_size.to_string())
                .text("chunk_overlap", params.chunk_overlap.to_string());
        }

        tracing::debug!(
            "Parsing '{}' with {} ({} bytes)",
            request.file_name,
            request.parser,
            request.data.len()
        );

        let response = self
            .authorize(self.client.post(format!("{}/api/parse", self.base_url)))
            .multipart(form)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn train(&self, rag_id: &str, chunks: &[Value]) -> Result<()> {
        // The chunk list goes out exactly as the parse step returned it
        let response = self
            .authorize(
                self.client
                    .post(format!("{}/api/train/{}", self.base_url, rag_id)),
            )
            .json(chunks)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    async fn delete_documents(&self, rag_id: &str, paths: &[String]) -> Result<()> {
        let body = serde_json::json!({
            "ragId": rag_id,
            "documents": paths,
        });

        let response = self
            .authorize(self.client.delete(format!("{}/api/documents", self.base_url)))
            .json(&body)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}
