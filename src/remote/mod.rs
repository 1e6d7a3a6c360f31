//! Clients for the two remote services
//!
//! Trait seams let the proxies run against fakes in tests; the HTTP
//! implementations are the only ones used at runtime.

pub mod agent;
pub mod documents;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::document::ChunkParams;

pub use agent::HttpAgentService;
pub use documents::HttpDocumentService;

/// A file submitted to the remote parse endpoint
#[derive(Debug, Clone)]
pub struct ParseRequest {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
    /// Fixed parser name for the file's type
    pub parser: &'static str,
    /// Present for PDF only
    pub chunk_params: Option<ChunkParams>,
}

/// Remote document (knowledge base) service
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// List raw storage paths for a knowledge base.
    ///
    /// A remote 404 surfaces as `Error::Remote { status: 404, .. }`; the
    /// proxy normalizes it to an empty listing.
    async fn list_documents(&self, rag_id: &str) -> Result<Vec<String>>;

    /// Submit a file for parsing; returns the remote response body verbatim
    async fn parse_file(&self, request: ParseRequest) -> Result<Value>;

    /// Ingest parsed chunks into a knowledge base's retrieval index
    async fn train(&self, rag_id: &str, chunks: &[Value]) -> Result<()>;

    /// Delete documents by prefixed storage path, in one call
    async fn delete_documents(&self, rag_id: &str, paths: &[String]) -> Result<()>;
}

/// Remote cost-estimation agent service
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Forward a problem statement plus usage parameters; returns the remote
    /// response body verbatim
    async fn estimate(&self, payload: &Value) -> Result<Value>;
}

/// Map a non-success remote response to `Error::Remote`, preserving the
/// remote's status code and error text
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    let message = if message.is_empty() {
        status.to_string()
    } else {
        message
    };
    Err(Error::Remote {
        status: status.as_u16(),
        message,
    })
}
