//! Document lifecycle endpoints

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::proxy::UploadRequest;
use crate::server::state::AppState;
use crate::types::response::{DeleteResponse, ListDocumentsResponse, UploadResponse};

/// Query parameters for listing documents.
///
/// `ragId` defaults to empty so a missing parameter reaches the proxy's
/// validation and comes back in the shared error shape.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default, rename = "ragId")]
    pub rag_id: String,
}

/// Request body for deleting documents
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    #[serde(default)]
    pub rag_id: String,
    #[serde(default)]
    pub documents: Vec<String>,
}

/// GET /api/rag - List documents in a knowledge base
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListDocumentsResponse>> {
    state.documents().list(&params.rag_id).await.map(Json)
}

/// POST /api/rag - Upload a document, parse it remotely, train the knowledge base
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut rag_id = String::new();
    let mut upload: Option<UploadRequest> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        Error::Validation(format!("Failed to read multipart field: {}", e))
    })? {
        match field.name().unwrap_or("") {
            "ragId" => {
                rag_id = field.text().await.map_err(|e| {
                    Error::Validation(format!("Failed to read ragId: {}", e))
                })?;
            }
            "file" => {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| Error::Validation("Uploaded file has no filename".to_string()))?;
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                let data = field.bytes().await.map_err(|e| {
                    Error::Validation(format!("Failed to read file: {}", e))
                })?;

                tracing::info!("Received upload: {} ({} bytes)", file_name, data.len());

                upload = Some(UploadRequest {
                    file_name,
                    content_type,
                    data,
                });
            }
            other => {
                tracing::debug!("Ignoring unexpected multipart field '{}'", other);
            }
        }
    }

    let upload = upload.ok_or_else(|| Error::Validation("Missing required field: file".to_string()))?;

    state
        .documents()
        .upload_and_train(&rag_id, upload)
        .await
        .map(Json)
}

/// DELETE /api/rag - Delete documents from a knowledge base
pub async fn delete_documents(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>> {
    state
        .documents()
        .delete(&request.rag_id, &request.documents)
        .await
        .map(Json)
}
