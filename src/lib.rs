// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod version;
pub mod vision;

pub use api::{build_router, start_server, AppState};
pub use classifier::{
    build_classifier, ClassificationResult, Classifier, ClassifierKind, ClassifyError, Label,
};
pub use config::{ConfigError, ServiceConfig};
