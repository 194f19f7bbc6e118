//! Main HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use formscan_core::ExtractionService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::handlers;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Application state shared across routes.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<ExtractionService>,
}

impl ApiState {
    pub fn new(service: ExtractionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    pub max_upload_bytes: usize,
    pub cors: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
            cors: true,
        }
    }
}

pub fn build_router(state: ApiState, options: ServerOptions) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::analyze_sample).post(handlers::analyze_upload))
        .route("/porLinha", post(handlers::analyze_lines))
        .route("/filtro/:filtro", post(handlers::analyze_field))
        .route("/api/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(
            options.max_upload_bytes + MULTIPART_OVERHEAD,
        ));

    if options.cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Serve until Ctrl-C.
#[instrument(skip(state, options))]
pub async fn start_server(addr: SocketAddr, state: ApiState, options: ServerOptions) -> Result<()> {
    let app = build_router(state, options);

    let listener = TcpListener::bind(&addr).await?;
    info!("FormScan HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("FormScan HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
