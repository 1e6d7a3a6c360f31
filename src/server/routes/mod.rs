//! API routes for the proxy server

pub mod agent;
pub mod rag;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Document lifecycle - larger body limit for multipart uploads
        .route(
            "/rag",
            get(rag::list_documents)
                .post(rag::upload_document)
                .delete(rag::delete_documents)
                .layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Cost estimation
        .route("/agent", post(agent::estimate_cost))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "rag-proxy",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Proxy for a remote RAG document service and cost-estimation agent",
        "endpoints": {
            "GET /api/rag?ragId=<id>": "List documents in a knowledge base",
            "POST /api/rag": "Upload a document, parse and train (multipart: file, ragId)",
            "DELETE /api/rag": "Delete documents ({ragId, documents})",
            "POST /api/agent": "Request a cost estimate ({prompt, ...})"
        }
    }))
}
