//! Main HTTP gateway server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use vatlens_extraction::InvoiceExtractor;

use crate::{invoice_api, upload_ui};

/// Application state shared across routes.
///
/// The extractor is the only shared state and is immutable after startup;
/// requests never coordinate with each other.
#[derive(Clone)]
pub struct GatewayState {
    pub extractor: Arc<InvoiceExtractor>,
}

/// Build the axum router with all gateway routes.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/multiple-invoice", post(invoice_api::process_invoice))
        .route("/api/health", get(health))
        .merge(upload_ui::ui_router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "vatlens",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Start the gateway HTTP server.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
