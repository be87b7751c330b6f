// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Collaborator manager: builds the OCR engine and transcription model handles
//! once at startup and hands out shared read-only references

use std::sync::Arc;
use std::time::Duration;

use crate::vision::ocr::{HttpOcrEngine, OcrBackend, OcrEngine};
use crate::vision::serialized::Serialized;
use crate::vision::transcription::{TranscriptionClient, TranscriptionModel};

/// Configuration for connecting to collaborators
#[derive(Debug, Clone)]
pub struct CollaboratorConfig {
    /// Base URL of the OCR sidecar (optional)
    pub ocr_endpoint: Option<String>,
    /// Which OCR backend the sidecar runs
    pub ocr_backend: OcrBackend,
    /// Base URL of the transcription sidecar (optional)
    pub transcription_endpoint: Option<String>,
    /// Model name sent to the transcription sidecar
    pub transcription_model: String,
    /// Allow only one in-flight call per collaborator
    pub serialize: bool,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            ocr_endpoint: None,
            ocr_backend: OcrBackend::default(),
            transcription_endpoint: None,
            transcription_model: "microsoft/trocr-base-handwritten".to_string(),
            serialize: true,
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Information about a configured collaborator
#[derive(Debug, Clone)]
pub struct CollaboratorInfo {
    /// Collaborator name
    pub name: String,
    /// Collaborator type (ocr, transcription)
    pub kind: String,
    /// Whether it was configured at startup
    pub available: bool,
}

/// Process-wide collaborator handles
///
/// Built once before the server starts and never mutated afterwards; there is
/// nothing to tear down. Missing or broken collaborators are logged and left
/// unset so the endpoints that need them answer 503.
pub struct CollaboratorManager {
    ocr_engine: Option<Arc<dyn OcrEngine>>,
    ocr_backend: OcrBackend,
    transcription_model: Option<Arc<dyn TranscriptionModel>>,
}

impl CollaboratorManager {
    /// Create a new CollaboratorManager with the given configuration
    pub async fn new(config: CollaboratorConfig) -> Self {
        let ocr_engine: Option<Arc<dyn OcrEngine>> = match config.ocr_endpoint {
            Some(ref endpoint) => {
                match HttpOcrEngine::new(endpoint, config.ocr_backend, config.request_timeout) {
                    Ok(engine) => {
                        if engine.health_check().await {
                            tracing::info!(
                                "✅ OCR engine ({}) reachable at {}",
                                engine.backend().name(),
                                engine.endpoint()
                            );
                        } else {
                            tracing::warn!(
                                "⚠️ OCR engine ({}) at {} is not answering yet",
                                engine.backend().name(),
                                engine.endpoint()
                            );
                        }
                        let engine: Arc<dyn OcrEngine> = if config.serialize {
                            Arc::new(Serialized::new(engine))
                        } else {
                            Arc::new(engine)
                        };
                        Some(engine)
                    }
                    Err(e) => {
                        tracing::warn!("⚠️ Failed to configure OCR engine at {}: {}", endpoint, e);
                        None
                    }
                }
            }
            None => None,
        };

        let transcription_model: Option<Arc<dyn TranscriptionModel>> =
            match config.transcription_endpoint {
                Some(ref endpoint) => match TranscriptionClient::new(
                    endpoint,
                    &config.transcription_model,
                    config.request_timeout,
                ) {
                    Ok(client) => {
                        if client.health_check().await {
                            tracing::info!("✅ Transcription model reachable at {}", endpoint);
                        } else {
                            tracing::warn!(
                                "⚠️ Transcription model at {} is not answering yet",
                                endpoint
                            );
                        }
                        let model: Arc<dyn TranscriptionModel> = if config.serialize {
                            Arc::new(Serialized::new(client))
                        } else {
                            Arc::new(client)
                        };
                        Some(model)
                    }
                    Err(e) => {
                        tracing::warn!(
                            "⚠️ Failed to configure transcription model at {}: {}",
                            endpoint,
                            e
                        );
                        None
                    }
                },
                None => None,
            };

        Self {
            ocr_engine,
            ocr_backend: config.ocr_backend,
            transcription_model,
        }
    }

    /// Assemble a manager from already-built handles
    pub fn from_parts(
        ocr_engine: Option<Arc<dyn OcrEngine>>,
        transcription_model: Option<Arc<dyn TranscriptionModel>>,
    ) -> Self {
        Self {
            ocr_engine,
            ocr_backend: OcrBackend::default(),
            transcription_model,
        }
    }

    /// A manager with no collaborators
    pub fn empty() -> Self {
        Self::from_parts(None, None)
    }

    /// Get the OCR engine if configured
    pub fn get_ocr_engine(&self) -> Option<Arc<dyn OcrEngine>> {
        self.ocr_engine.clone()
    }

    /// Get the transcription model if configured
    pub fn get_transcription_model(&self) -> Option<Arc<dyn TranscriptionModel>> {
        self.transcription_model.clone()
    }

    pub fn has_ocr(&self) -> bool {
        self.ocr_engine.is_some()
    }

    pub fn has_transcription(&self) -> bool {
        self.transcription_model.is_some()
    }

    /// List all collaborators and whether they are configured
    pub fn list_collaborators(&self) -> Vec<CollaboratorInfo> {
        vec![
            CollaboratorInfo {
                name: self.ocr_backend.name().to_string(),
                kind: "ocr".to_string(),
                available: self.has_ocr(),
            },
            CollaboratorInfo {
                name: "transcription".to_string(),
                kind: "transcription".to_string(),
                available: self.has_transcription(),
            },
        ]
    }
}
