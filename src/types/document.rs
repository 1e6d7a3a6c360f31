//! Document identity and file-type mapping

use serde::{Deserialize, Serialize};

/// Prefix the remote service uses for stored document paths
pub const STORAGE_PREFIX: &str = "storage/";

/// Chunking parameters for PDF parsing (the only type that takes any)
pub const PDF_CHUNK_SIZE: u32 = 1000;
/// Overlap between PDF chunks
pub const PDF_CHUNK_OVERLAP: u32 = 100;

/// File type, derived from the declared MIME type on upload and from the
/// file extension when listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Docx,
    Txt,
}

/// Chunking parameters forwarded to the remote parse endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkParams {
    pub chunk_size: u32,
    pub chunk_overlap: u32,
}

impl FileKind {
    /// Map a declared MIME type to a file kind.
    ///
    /// Exactly three types are supported; anything else is rejected at
    /// validation time.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "text/plain" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Derive a file kind from a path's extension; anything that is not
    /// `.pdf` or `.docx` is reported as plain text
    pub fn from_path(path: &str) -> Self {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
        match ext.as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            _ => Self::Txt,
        }
    }

    /// Fixed remote parser name for this kind
    pub fn parser(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf_parser",
            Self::Docx => "docx_parser",
            Self::Txt => "text_parser",
        }
    }

    /// Chunking parameters for the remote parse call; only PDF takes any
    pub fn chunk_params(&self) -> Option<ChunkParams> {
        match self {
            Self::Pdf => Some(ChunkParams {
                chunk_size: PDF_CHUNK_SIZE,
                chunk_overlap: PDF_CHUNK_OVERLAP,
            }),
            _ => None,
        }
    }
}

/// Lifecycle status reported for listed documents.
///
/// The remote service does not expose per-document status, so every listed
/// item is reported as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Active,
}

/// A document as reported to the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntry {
    /// Storage path with the `storage/` prefix stripped
    pub file_name: String,
    /// Type derived from the file extension
    pub file_type: FileKind,
    /// Always `active` for listed items
    pub status: DocumentStatus,
}

impl DocumentEntry {
    /// Build an entry from a raw storage path returned by the remote listing
    pub fn from_storage_path(path: &str) -> Self {
        let file_name = path.strip_prefix(STORAGE_PREFIX).unwrap_or(path);
        Self {
            file_name: file_name.to_string(),
            file_type: FileKind::from_path(file_name),
            status: DocumentStatus::Active,
        }
    }
}

/// Normalize a file name to carry exactly one `storage/` prefix, as the
/// remote delete endpoint expects
pub fn with_storage_prefix(name: &str) -> String {
    if name.starts_with(STORAGE_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", STORAGE_PREFIX, name)
    }
}
