// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::path::PathBuf;

use clap::Parser;

use crate::classifier::ClassifierKind;
use crate::vision::OcrBackend;

/// Handwriting detection and transcription service
///
/// Every flag can also be set through its environment variable; flags override
/// values from the `--config` file.
#[derive(Parser, Debug, Default)]
#[command(name = "handwriting-service")]
#[command(version)]
#[command(about = "HTTP service that detects and transcribes handwriting", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, env = "HANDWRITING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on (e.g., 0.0.0.0:8000)
    #[arg(long, env = "HANDWRITING_LISTEN_ADDR")]
    pub listen_addr: Option<String>,

    /// Name reported by /health
    #[arg(long, env = "HANDWRITING_SERVICE_NAME")]
    pub service_name: Option<String>,

    /// Classification strategy used by /detect
    #[arg(long, value_enum, env = "HANDWRITING_STRATEGY")]
    pub strategy: Option<ClassifierKind>,

    /// OCR backend behind the OCR endpoint (selects the default threshold)
    #[arg(long, value_enum, env = "HANDWRITING_OCR_BACKEND")]
    pub ocr_backend: Option<OcrBackend>,

    /// Override the backend's average-confidence threshold
    #[arg(long, env = "HANDWRITING_OCR_THRESHOLD")]
    pub ocr_threshold: Option<f64>,

    /// Base URL of the OCR sidecar
    #[arg(long, env = "HANDWRITING_OCR_ENDPOINT")]
    pub ocr_endpoint: Option<String>,

    /// Base URL of the transcription sidecar
    #[arg(long, env = "HANDWRITING_TRANSCRIPTION_ENDPOINT")]
    pub transcription_endpoint: Option<String>,

    /// Model name sent to the transcription sidecar
    #[arg(long, env = "HANDWRITING_TRANSCRIPTION_MODEL")]
    pub transcription_model: Option<String>,

    /// Allow only one in-flight call per collaborator (true/false)
    #[arg(long, env = "HANDWRITING_SERIALIZE_COLLABORATORS")]
    pub serialize_collaborators: Option<bool>,

    /// Timeout for collaborator HTTP calls, in seconds
    #[arg(long, env = "HANDWRITING_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}
