//! Success response bodies returned to the dashboard

use serde::Serialize;

use super::document::{DocumentEntry, FileKind};

/// Response for GET /api/rag
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    pub success: bool,
    pub documents: Vec<DocumentEntry>,
    pub rag_id: String,
    pub timestamp: String,
}

/// Response for POST /api/rag (upload and train)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub file_name: String,
    pub file_type: FileKind,
    /// Number of chunks the remote parse step produced
    pub document_count: usize,
    pub rag_id: String,
    pub timestamp: String,
}

/// Response for DELETE /api/rag
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    /// Taken from the request list length; the remote does not report one
    pub deleted_count: usize,
    pub rag_id: String,
    pub timestamp: String,
}

/// Response for POST /api/agent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub success: bool,
    /// Opaque estimate from the remote agent, passed through unvalidated
    pub estimate: serde_json::Value,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::DocumentStatus;

    #[test]
    fn list_response_uses_camel_case_fields() {
        let response = ListDocumentsResponse {
            success: true,
            documents: vec![DocumentEntry {
                file_name: "report.pdf".to_string(),
                file_type: FileKind::Pdf,
                status: DocumentStatus::Active,
            }],
            rag_id: "kb1".to_string(),
            timestamp: "2026-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ragId"], "kb1");
        assert_eq!(json["documents"][0]["fileName"], "report.pdf");
        assert_eq!(json["documents"][0]["fileType"], "pdf");
        assert_eq!(json["documents"][0]["status"], "active");
    }

    #[test]
    fn upload_response_uses_camel_case_fields() {
        let response = UploadResponse {
            success: true,
            message: "ok".to_string(),
            file_name: "notes.txt".to_string(),
            file_type: FileKind::Txt,
            document_count: 2,
            rag_id: "kb1".to_string(),
            timestamp: "2026-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["documentCount"], 2);
        assert_eq!(json["fileType"], "txt");
    }
}
