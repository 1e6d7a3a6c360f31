//! Wire types shared between routes, proxies, and remote clients

pub mod document;
pub mod response;

pub use document::{ChunkParams, DocumentEntry, DocumentStatus, FileKind};
pub use response::{DeleteResponse, EstimateResponse, ListDocumentsResponse, UploadResponse};

/// Current time as an RFC 3339 timestamp, stamped on every success response
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
