//! rag-proxy: HTTP gateway in front of a remote RAG knowledge-base service
//! and a remote cost-estimation agent.
//!
//! The proxy keeps the remote access credential server-side, validates and
//! reshapes request/response bodies, and forwards everything else verbatim.
//! No documents or estimates are persisted locally; the remote services are
//! the sole source of truth.

pub mod config;
pub mod error;
pub mod proxy;
pub mod remote;
pub mod server;
pub mod types;

pub use config::ProxyConfig;
pub use error::{Error, Result};
pub use types::document::{DocumentEntry, FileKind};
