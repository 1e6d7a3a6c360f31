//! Proxy logic mediating between the dashboard and the remote services

pub mod agent;
pub mod documents;

pub use agent::AgentProxy;
pub use documents::{DocumentProxy, IngestPhase, UploadRequest};

use crate::error::{Error, Result};

/// The credential check runs before validation and before any remote call;
/// its absence fails every operation the same way.
pub(crate) fn require_credential(api_key: Option<&str>) -> Result<()> {
    match api_key {
        Some(key) if !key.is_empty() => Ok(()),
        _ => Err(Error::Config(
            "Remote service API key is not configured".to_string(),
        )),
    }
}

pub(crate) fn validate_rag_id(rag_id: &str) -> Result<()> {
    if rag_id.trim().is_empty() {
        return Err(Error::Validation(
            "Missing required field: ragId".to_string(),
        ));
    }
    Ok(())
}
