// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Edge density / intensity variance heuristic
//!
//! Handwriting tends to produce more irregular strokes than print, which shows
//! up as a higher mean gradient between neighbouring pixels together with a
//! wider spread of intensities.

use async_trait::async_trait;
use image::{DynamicImage, GrayImage};
use tracing::debug;

use super::{ClassificationResult, Classifier, ClassifierKind, ClassifyError, Label};
use crate::vision::to_luma_601;

/// Edge density above which an image may be handwritten
pub const EDGE_DENSITY_THRESHOLD: f64 = 20.0;

/// Intensity variance above which an image may be handwritten
pub const VARIANCE_THRESHOLD: f64 = 1000.0;

/// Reported for every heuristic decision; not derived from the statistics
pub const HEURISTIC_CONFIDENCE: f64 = 0.8;

/// Statistics the heuristic decides on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStats {
    /// Mean of horizontal + vertical absolute differences
    pub edge_density: f64,
    /// Population variance of all intensities
    pub variance: f64,
}

impl EdgeStats {
    pub fn label(&self) -> Label {
        if self.edge_density > EDGE_DENSITY_THRESHOLD && self.variance > VARIANCE_THRESHOLD {
            Label::Handwritten
        } else {
            Label::Printed
        }
    }
}

/// Compute edge density and variance of a grayscale grid
///
/// The horizontal difference map is H x (W-1) and the vertical one (H-1) x W;
/// both are truncated to their common (H-1) x (W-1) region before summing.
/// An empty region (single row or column) yields an edge density of 0.
pub fn analyze(gray: &GrayImage) -> EdgeStats {
    let (width, height) = gray.dimensions();
    let (width, height) = (width as usize, height as usize);
    let pixels = gray.as_raw();

    let rows = height.saturating_sub(1);
    let cols = width.saturating_sub(1);

    let mut edge_sum: u64 = 0;
    for i in 0..rows {
        let row = &pixels[i * width..(i + 1) * width];
        let below = &pixels[(i + 1) * width..(i + 2) * width];
        for j in 0..cols {
            let here = row[j] as i32;
            let horizontal = (row[j + 1] as i32 - here).unsigned_abs();
            let vertical = (below[j] as i32 - here).unsigned_abs();
            edge_sum += (horizontal + vertical) as u64;
        }
    }

    let edge_count = rows * cols;
    let edge_density = if edge_count == 0 {
        0.0
    } else {
        edge_sum as f64 / edge_count as f64
    };

    EdgeStats {
        edge_density,
        variance: population_variance(pixels),
    }
}

fn population_variance(pixels: &[u8]) -> f64 {
    if pixels.is_empty() {
        return 0.0;
    }

    let n = pixels.len() as f64;
    let mean = pixels.iter().map(|&p| p as f64).sum::<f64>() / n;
    pixels
        .iter()
        .map(|&p| {
            let deviation = p as f64 - mean;
            deviation * deviation
        })
        .sum::<f64>()
        / n
}

/// Model-free classifier built on `analyze`
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTextureClassifier;

impl EdgeTextureClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core, usable without a runtime
    pub fn classify_image(&self, image: &DynamicImage) -> ClassificationResult {
        let stats = analyze(&to_luma_601(image));
        let label = stats.label();

        debug!(
            "Edge texture stats: edge_density={:.2}, variance={:.2} -> {}",
            stats.edge_density, stats.variance, label
        );

        ClassificationResult::new(label, HEURISTIC_CONFIDENCE)
    }
}

#[async_trait]
impl Classifier for EdgeTextureClassifier {
    fn kind(&self) -> ClassifierKind {
        ClassifierKind::EdgeTexture
    }

    async fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, ClassifyError> {
        Ok(self.classify_image(image))
    }
}
