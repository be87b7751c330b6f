// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection response types

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassificationResult, Label};

/// Response from POST /detect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    /// "handwritten" or "printed"
    pub result: Label,
    /// Confidence score (0.0-1.0)
    pub confidence: f64,
}

impl From<ClassificationResult> for DetectResponse {
    fn from(result: ClassificationResult) -> Self {
        Self {
            result: result.label,
            confidence: result.confidence,
        }
    }
}
