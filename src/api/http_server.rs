// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::detect::detect_handler;
use super::handlers::health_handler;
use super::ocr::ocr_handler;
use crate::classifier::Classifier;
use crate::vision::{CollaboratorManager, ImagePreprocessor, MAX_IMAGE_SIZE};

/// Room for multipart boundaries and headers on top of the image itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared, read-only state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub service_name: Arc<str>,
    pub classifier: Arc<dyn Classifier>,
    pub preprocessor: ImagePreprocessor,
    pub collaborators: Arc<CollaboratorManager>,
}

impl AppState {
    pub fn new(
        service_name: &str,
        classifier: Arc<dyn Classifier>,
        collaborators: Arc<CollaboratorManager>,
    ) -> Self {
        Self {
            service_name: Arc::from(service_name),
            classifier,
            preprocessor: ImagePreprocessor::default(),
            collaborators,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/detect", post(detect_handler))
        .route("/ocr", post(ocr_handler))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
