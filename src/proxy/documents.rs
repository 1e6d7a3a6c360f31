//! Document-lifecycle proxy: list, upload-and-train, delete
//!
//! Every operation is a thin mediation over the remote document service:
//! validate input, issue one or two sequential remote calls, reshape the
//! response. Nothing is persisted locally.

use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;

use super::{require_credential, validate_rag_id};
use crate::error::{Error, Result};
use crate::remote::{DocumentService, ParseRequest};
use crate::types::document::{with_storage_prefix, DocumentEntry, FileKind};
use crate::types::response::{DeleteResponse, ListDocumentsResponse, UploadResponse};
use crate::types::timestamp;

/// An uploaded file as received from the dashboard
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    /// Declared MIME type; must be one of the three supported values
    pub content_type: String,
    pub data: Bytes,
}

/// Phases of the linear parse-then-train sequence.
///
/// Modeling the sequence explicitly keeps the two remote calls and their
/// failure modes separate; compensation for a failed train (deleting the
/// orphaned parse output) can be added at `FailedAtTrain` without
/// restructuring the flow.
#[derive(Debug)]
pub enum IngestPhase {
    Parsing,
    Training { chunks: Vec<Value> },
    Done { chunk_count: usize },
    FailedAtParse { error: Error },
    FailedAtTrain { chunk_count: usize, error: Error },
}

/// Proxy for all document operations against the remote service
pub struct DocumentProxy {
    service: Arc<dyn DocumentService>,
    api_key: Option<String>,
}

impl DocumentProxy {
    /// Create a proxy; the credential is injected here, never read from the
    /// environment at call time
    pub fn new(service: Arc<dyn DocumentService>, api_key: Option<String>) -> Self {
        Self { service, api_key }
    }

    /// List the documents in a knowledge base.
    ///
    /// A remote 404 means the knowledge base has no documents yet and is
    /// reported as an empty, successful listing.
    pub async fn list(&self, rag_id: &str) -> Result<ListDocumentsResponse> {
        require_credential(self.api_key.as_deref())?;
        validate_rag_id(rag_id)?;

        let paths = match self.service.list_documents(rag_id).await {
            Ok(paths) => paths,
            Err(Error::Remote { status: 404, .. }) => Vec::new(),
            Err(e) => return Err(e),
        };

        let documents: Vec<DocumentEntry> = paths
            .iter()
            .map(|path| DocumentEntry::from_storage_path(path))
            .collect();

        tracing::debug!("Listed {} document(s) for '{}'", documents.len(), rag_id);

        Ok(ListDocumentsResponse {
            success: true,
            documents,
            rag_id: rag_id.to_string(),
            timestamp: timestamp(),
        })
    }

    /// Parse an uploaded file remotely, then train the knowledge base on the
    /// parsed chunks. Two sequential remote calls, no rollback: a train
    /// failure leaves the parse output discarded.
    pub async fn upload_and_train(
        &self,
        rag_id: &str,
        upload: UploadRequest,
    ) -> Result<UploadResponse> {
        require_credential(self.api_key.as_deref())?;
        validate_rag_id(rag_id)?;

        let kind = FileKind::from_mime(&upload.content_type).ok_or_else(|| {
            Error::Validation(format!(
                "Unsupported file type: '{}'. Supported: PDF, DOCX, plain text",
                upload.content_type
            ))
        })?;

        let file_name = upload.file_name.clone();
        match self.run_ingest(rag_id, upload, kind).await {
            IngestPhase::Done { chunk_count } => {
                tracing::info!(
                    "Trained '{}' on '{}': {} chunk(s)",
                    rag_id,
                    file_name,
                    chunk_count
                );
                Ok(UploadResponse {
                    success: true,
                    message: format!("Document processed and trained ({} chunks)", chunk_count),
                    file_name,
                    file_type: kind,
                    document_count: chunk_count,
                    rag_id: rag_id.to_string(),
                    timestamp: timestamp(),
                })
            }
            IngestPhase::FailedAtParse { error } => {
                tracing::error!("Parse failed for '{}': {}", file_name, error);
                Err(error)
            }
            IngestPhase::FailedAtTrain { chunk_count, error } => {
                // No compensating delete; the parsed chunks are discarded
                tracing::error!(
                    "Train failed for '{}' after parsing {} chunk(s), parse output discarded: {}",
                    file_name,
                    chunk_count,
                    error
                );
                Err(error)
            }
            phase @ (IngestPhase::Parsing | IngestPhase::Training { .. }) => Err(Error::Internal(
                format!("Ingest stopped in non-terminal phase: {:?}", phase),
            )),
        }
    }

    /// Drive the ingest sequence to a terminal phase
    async fn run_ingest(&self, rag_id: &str, upload: UploadRequest, kind: FileKind) -> IngestPhase {
        let mut phase = IngestPhase::Parsing;
        loop {
            phase = match phase {
                IngestPhase::Parsing => match self.parse(&upload, kind).await {
                    Ok(chunks) => IngestPhase::Training { chunks },
                    Err(error) => IngestPhase::FailedAtParse { error },
                },
                IngestPhase::Training { chunks } => {
                    let chunk_count = chunks.len();
                    match self.service.train(rag_id, &chunks).await {
                        Ok(()) => IngestPhase::Done { chunk_count },
                        Err(error) => IngestPhase::FailedAtTrain { chunk_count, error },
                    }
                }
                terminal => return terminal,
            };
        }
    }

    /// Submit the file to the remote parse endpoint and extract the chunk
    /// list from its response
    async fn parse(&self, upload: &UploadRequest, kind: FileKind) -> Result<Vec<Value>> {
        let request = ParseRequest {
            file_name: upload.file_name.clone(),
            content_type: upload.content_type.clone(),
            data: upload.data.clone(),
            parser: kind.parser(),
            chunk_params: kind.chunk_params(),
        };

        let body = self.service.parse_file(request).await?;

        match body.get("documents").and_then(Value::as_array) {
            Some(chunks) => Ok(chunks.clone()),
            None => Err(Error::Processing(
                "Parse response did not contain a document list".to_string(),
            )),
        }
    }

    /// Delete documents from a knowledge base in one remote call.
    ///
    /// Names are normalized to carry exactly one `storage/` prefix. The
    /// reported count is the request list length; the remote does not
    /// confirm how many it actually removed.
    pub async fn delete(&self, rag_id: &str, documents: &[String]) -> Result<DeleteResponse> {
        require_credential(self.api_key.as_deref())?;
        validate_rag_id(rag_id)?;

        if documents.is_empty() {
            return Err(Error::Validation(
                "No documents specified for deletion".to_string(),
            ));
        }

        let paths: Vec<String> = documents
            .iter()
            .map(|name| with_storage_prefix(name))
            .collect();

        self.service.delete_documents(rag_id, &paths).await?;

        tracing::info!("Deleted {} document(s) from '{}'", documents.len(), rag_id);

        Ok(DeleteResponse {
            success: true,
            message: format!("Deleted {} document(s)", documents.len()),
            deleted_count: documents.len(),
            rag_id: rag_id.to_string(),
            timestamp: timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Fake remote service recording every call it receives
    #[derive(Default)]
    struct FakeService {
        /// Paths returned by list; a status here makes list fail instead
        list_paths: Vec<String>,
        list_error_status: Option<u16>,
        /// Body returned by parse
        parse_response: Option<Value>,
        /// When set, train fails with this remote status
        train_error_status: Option<u16>,
        calls: Mutex<Vec<String>>,
        parse_requests: Mutex<Vec<(String, &'static str, Option<crate::types::ChunkParams>)>>,
        train_bodies: Mutex<Vec<Vec<Value>>>,
        delete_paths: Mutex<Vec<Vec<String>>>,
    }

    impl FakeService {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentService for FakeService {
        async fn list_documents(&self, _rag_id: &str) -> Result<Vec<String>> {
            self.calls.lock().unwrap().push("list".to_string());
            match self.list_error_status {
                Some(status) => Err(Error::remote(status, "remote list failed")),
                None => Ok(self.list_paths.clone()),
            }
        }

        async fn parse_file(&self, request: ParseRequest) -> Result<Value> {
            self.calls.lock().unwrap().push("parse".to_string());
            self.parse_requests.lock().unwrap().push((
                request.file_name,
                request.parser,
                request.chunk_params,
            ));
            match &self.parse_response {
                Some(body) => Ok(body.clone()),
                None => Err(Error::remote(500, "remote parse failed")),
            }
        }

        async fn train(&self, _rag_id: &str, chunks: &[Value]) -> Result<()> {
            self.calls.lock().unwrap().push("train".to_string());
            self.train_bodies.lock().unwrap().push(chunks.to_vec());
            match self.train_error_status {
                Some(status) => Err(Error::remote(status, "remote train failed")),
                None => Ok(()),
            }
        }

        async fn delete_documents(&self, _rag_id: &str, paths: &[String]) -> Result<()> {
            self.calls.lock().unwrap().push("delete".to_string());
            self.delete_paths.lock().unwrap().push(paths.to_vec());
            Ok(())
        }
    }

    fn proxy_with(service: FakeService) -> (DocumentProxy, Arc<FakeService>) {
        let service = Arc::new(service);
        let proxy = DocumentProxy::new(service.clone(), Some("test-key".to_string()));
        (proxy, service)
    }

    fn upload(file_name: &str, content_type: &str) -> UploadRequest {
        UploadRequest {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            data: Bytes::from_static(b"file bytes"),
        }
    }

    #[tokio::test]
    async fn list_transforms_storage_paths() {
        let (proxy, _) = proxy_with(FakeService {
            list_paths: vec!["storage/report.pdf".to_string(), "notes.txt".to_string()],
            ..Default::default()
        });

        let response = proxy.list("kb1").await.unwrap();
        assert!(response.success);
        assert_eq!(response.rag_id, "kb1");
        assert_eq!(response.documents.len(), 2);
        assert_eq!(response.documents[0].file_name, "report.pdf");
        assert_eq!(response.documents[0].file_type, FileKind::Pdf);
        assert_eq!(response.documents[1].file_name, "notes.txt");
        assert_eq!(response.documents[1].file_type, FileKind::Txt);
    }

    #[tokio::test]
    async fn list_treats_remote_404_as_empty() {
        let (proxy, _) = proxy_with(FakeService {
            list_error_status: Some(404),
            ..Default::default()
        });

        let response = proxy.list("kb1").await.unwrap();
        assert!(response.success);
        assert!(response.documents.is_empty());
    }

    #[tokio::test]
    async fn list_forwards_other_remote_failures() {
        let (proxy, _) = proxy_with(FakeService {
            list_error_status: Some(503),
            ..Default::default()
        });

        match proxy.list("kb1").await {
            Err(Error::Remote { status: 503, .. }) => {}
            other => panic!("expected forwarded 503, got {:?}", other.map(|r| r.success)),
        }
    }

    #[tokio::test]
    async fn list_rejects_empty_rag_id() {
        let (proxy, service) = proxy_with(FakeService::default());
        assert!(matches!(proxy.list("").await, Err(Error::Validation(_))));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_credential_blocks_every_operation() {
        let service = Arc::new(FakeService {
            parse_response: Some(json!({"documents": ["chunk1"]})),
            ..Default::default()
        });
        let proxy = DocumentProxy::new(service.clone(), None);

        assert!(matches!(proxy.list("kb1").await, Err(Error::Config(_))));
        assert!(matches!(
            proxy
                .upload_and_train("kb1", upload("notes.txt", "text/plain"))
                .await,
            Err(Error::Config(_))
        ));
        assert!(matches!(
            proxy.delete("kb1", &["a.pdf".to_string()]).await,
            Err(Error::Config(_))
        ));

        // No remote call was ever attempted
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn upload_selects_parser_and_chunk_params_by_mime() {
        let (proxy, service) = proxy_with(FakeService {
            parse_response: Some(json!({"documents": ["c1"]})),
            ..Default::default()
        });

        proxy
            .upload_and_train("kb1", upload("report.pdf", "application/pdf"))
            .await
            .unwrap();
        proxy
            .upload_and_train("kb1", upload("notes.txt", "text/plain"))
            .await
            .unwrap();

        let requests = service.parse_requests.lock().unwrap();
        assert_eq!(requests[0].1, "pdf_parser");
        let params = requests[0].2.unwrap();
        assert_eq!((params.chunk_size, params.chunk_overlap), (1000, 100));
        assert_eq!(requests[1].1, "text_parser");
        assert!(requests[1].2.is_none());
    }

    #[tokio::test]
    async fn upload_forwards_parsed_chunks_to_train_unmodified() {
        let (proxy, service) = proxy_with(FakeService {
            parse_response: Some(json!({"documents": ["chunk1", "chunk2"]})),
            ..Default::default()
        });

        let response = proxy
            .upload_and_train("kb1", upload("notes.txt", "text/plain"))
            .await
            .unwrap();

        assert_eq!(response.document_count, 2);
        assert_eq!(response.file_name, "notes.txt");
        assert_eq!(response.file_type, FileKind::Txt);

        let bodies = service.train_bodies.lock().unwrap();
        assert_eq!(bodies[0], vec![json!("chunk1"), json!("chunk2")]);
        assert_eq!(service.calls(), vec!["parse", "train"]);
    }

    #[tokio::test]
    async fn upload_rejects_unsupported_mime() {
        let (proxy, service) = proxy_with(FakeService::default());

        let result = proxy
            .upload_and_train("kb1", upload("image.png", "image/png"))
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn parse_response_without_document_list_is_processing_error() {
        for body in [json!({"status": "ok"}), json!({"documents": "not-a-list"})] {
            let (proxy, _) = proxy_with(FakeService {
                parse_response: Some(body),
                ..Default::default()
            });
            let result = proxy
                .upload_and_train("kb1", upload("notes.txt", "text/plain"))
                .await;
            assert!(matches!(result, Err(Error::Processing(_))));
        }
    }

    #[tokio::test]
    async fn train_failure_surfaces_as_train_phase_error() {
        let (proxy, service) = proxy_with(FakeService {
            parse_response: Some(json!({"documents": ["c1", "c2"]})),
            train_error_status: Some(500),
            ..Default::default()
        });

        let result = proxy
            .upload_and_train("kb1", upload("notes.txt", "text/plain"))
            .await;

        match result {
            Err(Error::Remote { status: 500, message }) => {
                assert!(message.contains("train"));
            }
            other => panic!("expected train failure, got {:?}", other.map(|r| r.success)),
        }
        // Parse ran first and its output was handed to train
        assert_eq!(service.calls(), vec!["parse", "train"]);
    }

    #[tokio::test]
    async fn delete_normalizes_names_to_one_storage_prefix() {
        let (proxy, service) = proxy_with(FakeService::default());

        let response = proxy
            .delete(
                "kb1",
                &["a.pdf".to_string(), "storage/b.docx".to_string()],
            )
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.deleted_count, 2);

        let paths = service.delete_paths.lock().unwrap();
        assert_eq!(paths[0], vec!["storage/a.pdf", "storage/b.docx"]);
    }

    #[tokio::test]
    async fn delete_single_document_counts_one() {
        let (proxy, service) = proxy_with(FakeService::default());

        let response = proxy.delete("kb1", &["a.pdf".to_string()]).await.unwrap();
        assert_eq!(response.deleted_count, 1);

        let paths = service.delete_paths.lock().unwrap();
        assert_eq!(paths[0], vec!["storage/a.pdf"]);
    }

    #[tokio::test]
    async fn delete_rejects_empty_document_list() {
        let (proxy, service) = proxy_with(FakeService::default());
        let result = proxy.delete("kb1", &[]).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(service.calls().is_empty());
    }
}
