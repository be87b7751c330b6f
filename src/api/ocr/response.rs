// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Transcription response types

use serde::{Deserialize, Serialize};

use crate::vision::TRANSCRIPTION_CONFIDENCE;

/// Response from POST /ocr
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResponse {
    /// Transcribed text
    pub text: String,
    /// Confidence score (0.0-1.0)
    pub confidence: f64,
}

impl OcrResponse {
    pub fn new(text: String) -> Self {
        Self {
            text,
            confidence: TRANSCRIPTION_CONFIDENCE,
        }
    }
}
