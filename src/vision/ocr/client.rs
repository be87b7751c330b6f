// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for an OCR sidecar (EasyOCR / PaddleOCR server)

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;
use reqwest::Client;
use tracing::{debug, info};

use super::engine::{OcrBackend, OcrEngine, OcrError, OcrToken};
use super::parse::parse_tokens;
use crate::vision::image_utils::encode_png_base64;

#[derive(serde::Serialize)]
struct ReadRequest<'a> {
    image: String,
    format: &'a str,
}

/// OCR engine reached over HTTP: `POST {endpoint}/read`
pub struct HttpOcrEngine {
    client: Client,
    endpoint: String,
    backend: OcrBackend,
}

impl HttpOcrEngine {
    /// Create a new OCR sidecar client
    pub fn new(endpoint: &str, backend: OcrBackend, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "OCR client configured: endpoint={}, backend={}",
            endpoint,
            backend.name()
        );

        Ok(Self {
            client,
            endpoint,
            backend,
        })
    }

    pub fn backend(&self) -> OcrBackend {
        self.backend
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check if the OCR sidecar is healthy
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.endpoint))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("OCR health check failed: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl OcrEngine for HttpOcrEngine {
    async fn read(&self, image: &DynamicImage) -> Result<Vec<OcrToken>, OcrError> {
        let start = std::time::Instant::now();
        let request = ReadRequest {
            image: encode_png_base64(image).map_err(|e| OcrError::Collaborator(e.to_string()))?,
            format: "png",
        };

        let response = self
            .client
            .post(format!("{}/read", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| OcrError::Collaborator(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcrError::Collaborator(format!(
                "{} returned HTTP {}",
                self.backend.name(),
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OcrError::Collaborator(e.to_string()))?;
        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| OcrError::Parse(format!("response is not JSON: {}", e)))?;

        let tokens = parse_tokens(&value)?;
        debug!(
            "OCR read {} tokens in {}ms",
            tokens.len(),
            start.elapsed().as_millis()
        );

        Ok(tokens)
    }
}
