// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR engine contract and token types

use async_trait::async_trait;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bounding region reported by the engine, passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundingRegion(pub serde_json::Value);

/// A single recognized text fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrToken {
    /// Recognized text
    pub text: String,
    /// Where the engine found it
    #[serde(default)]
    pub bounding_region: BoundingRegion,
    /// Recognition confidence (0.0-1.0)
    pub confidence: f64,
}

/// Errors reported by an OCR engine
#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine answered, but not in the expected shape
    #[error("unexpected OCR output: {0}")]
    Parse(String),

    /// The engine failed internally or could not be reached
    #[error("OCR engine error: {0}")]
    Collaborator(String),
}

/// Known OCR backends
///
/// Each backend reports confidences on its own scale, so each carries its own
/// default decision threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackend {
    #[default]
    #[value(name = "easyocr")]
    EasyOcr,
    #[value(name = "paddleocr")]
    PaddleOcr,
}

impl OcrBackend {
    /// Average-confidence threshold below which text counts as handwritten
    pub fn default_threshold(self) -> f64 {
        match self {
            OcrBackend::EasyOcr => 0.5,
            OcrBackend::PaddleOcr => 0.3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OcrBackend::EasyOcr => "easyocr",
            OcrBackend::PaddleOcr => "paddleocr",
        }
    }
}

/// An OCR engine that reads text tokens out of an image
///
/// Implementations must be callable concurrently through `&self`; engines that
/// cannot run parallel inference are wrapped in `Serialized`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Read every text token in the image (possibly none)
    async fn read(&self, image: &DynamicImage) -> Result<Vec<OcrToken>, OcrError>;
}
