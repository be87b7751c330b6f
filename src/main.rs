// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::{env, net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use handwriting_service::{
    api::{start_server, AppState},
    classifier::build_classifier,
    cli::Cli,
    config::ServiceConfig,
    version,
    vision::CollaboratorManager,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ServiceConfig::load(&cli).context("invalid configuration")?;

    tracing::info!("🚀 Starting {}", version::get_version_string());
    tracing::info!("📦 BUILD VERSION: {}", version::VERSION);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address '{}'", config.listen_addr))?;

    let collaborators = Arc::new(CollaboratorManager::new(config.collaborator_config()).await);
    for info in collaborators.list_collaborators() {
        tracing::info!(
            "Collaborator {} ({}): {}",
            info.name,
            info.kind,
            if info.available { "configured" } else { "not configured" }
        );
    }

    let classifier = build_classifier(
        config.strategy,
        config.effective_threshold(),
        &collaborators,
    )?;
    tracing::info!(
        "✅ Classification strategy: {} (service: {})",
        classifier.kind().name(),
        config.service_name
    );

    let state = AppState::new(&config.service_name, classifier, collaborators);
    start_server(addr, state).await
}
