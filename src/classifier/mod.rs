// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Handwritten-vs-printed classification
//!
//! Two interchangeable strategies sit behind the `Classifier` trait:
//! - `EdgeTextureClassifier` - pixel statistics, no model required
//! - `OcrConfidenceClassifier` - average token confidence from an OCR engine
//!
//! The service picks one at startup via `ClassifierKind`.

pub mod edge_texture;
pub mod ocr_confidence;

use std::fmt;
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vision::{CollaboratorManager, OcrError};

pub use edge_texture::{analyze, EdgeStats, EdgeTextureClassifier};
pub use ocr_confidence::{aggregate, OcrConfidenceClassifier};

/// What kind of text an image holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Handwritten,
    Printed,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Handwritten => "handwritten",
            Label::Printed => "printed",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one classification call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: Label,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn new(label: Label, confidence: f64) -> Self {
        Self { label, confidence }
    }
}

/// Errors a classifier can report for a decoded image
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// OCR engine output did not have the expected structure
    #[error("OCR output could not be parsed: {0}")]
    OcrParse(String),

    /// OCR engine failed internally or was unreachable
    #[error("OCR engine failed: {0}")]
    Collaborator(String),
}

impl From<OcrError> for ClassifyError {
    fn from(error: OcrError) -> Self {
        match error {
            OcrError::Parse(message) => ClassifyError::OcrParse(message),
            OcrError::Collaborator(message) => ClassifyError::Collaborator(message),
        }
    }
}

/// Available classification strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    #[default]
    #[value(name = "edge_texture")]
    EdgeTexture,
    #[value(name = "ocr_confidence")]
    OcrConfidence,
}

impl ClassifierKind {
    pub fn name(self) -> &'static str {
        match self {
            ClassifierKind::EdgeTexture => "edge_texture",
            ClassifierKind::OcrConfidence => "ocr_confidence",
        }
    }
}

/// A strategy that labels a decoded image as handwritten or printed
#[async_trait]
pub trait Classifier: Send + Sync {
    fn kind(&self) -> ClassifierKind;

    async fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, ClassifyError>;
}

/// Build the configured strategy
///
/// `ocr_threshold` is only consulted by the OCR strategy, which also requires
/// an OCR engine in `collaborators`.
pub fn build_classifier(
    kind: ClassifierKind,
    ocr_threshold: f64,
    collaborators: &CollaboratorManager,
) -> Result<Arc<dyn Classifier>> {
    match kind {
        ClassifierKind::EdgeTexture => Ok(Arc::new(EdgeTextureClassifier::new())),
        ClassifierKind::OcrConfidence => {
            let Some(engine) = collaborators.get_ocr_engine() else {
                bail!("the ocr_confidence strategy needs an OCR engine (set ocr_endpoint)");
            };
            Ok(Arc::new(OcrConfidenceClassifier::new(engine, ocr_threshold)))
        }
    }
}
