// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR confidence aggregation
//!
//! Uses low average recognition confidence as a weak proxy for handwriting:
//! text an OCR engine tuned for print struggles to read is more likely to be
//! handwritten. This is a heuristic, not a calibrated classifier.

use std::sync::Arc;

use async_trait::async_trait;
use image::DynamicImage;
use tracing::debug;

use super::{ClassificationResult, Classifier, ClassifierKind, ClassifyError, Label};
use crate::vision::{OcrEngine, OcrToken};

/// Turn per-token confidences into a label
///
/// - no tokens: `printed` with confidence 0.0
/// - otherwise: `handwritten` iff the mean confidence is below `threshold`,
///   reported with the mean as its confidence
pub fn aggregate(tokens: &[OcrToken], threshold: f64) -> ClassificationResult {
    if tokens.is_empty() {
        return ClassificationResult::new(Label::Printed, 0.0);
    }

    let avg_conf = tokens.iter().map(|t| t.confidence).sum::<f64>() / tokens.len() as f64;
    let label = if avg_conf < threshold {
        Label::Handwritten
    } else {
        Label::Printed
    };

    ClassificationResult::new(label, avg_conf)
}

/// Classifier backed by an external OCR engine
pub struct OcrConfidenceClassifier {
    engine: Arc<dyn OcrEngine>,
    threshold: f64,
}

impl OcrConfidenceClassifier {
    pub fn new(engine: Arc<dyn OcrEngine>, threshold: f64) -> Self {
        Self { engine, threshold }
    }
}

#[async_trait]
impl Classifier for OcrConfidenceClassifier {
    fn kind(&self) -> ClassifierKind {
        ClassifierKind::OcrConfidence
    }

    async fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, ClassifyError> {
        let tokens = self.engine.read(image).await?;
        let result = aggregate(&tokens, self.threshold);

        debug!(
            "OCR confidence: {} tokens, avg={:.3}, threshold={} -> {}",
            tokens.len(),
            result.confidence,
            self.threshold,
            result.label
        );

        Ok(result)
    }
}
