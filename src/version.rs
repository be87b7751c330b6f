// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the handwriting service

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-handwriting-detection-2025-11-03";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2025-11-03";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "edge-texture-classifier",
    "ocr-confidence-classifier",
    "handwriting-transcription",
    "image-preprocessing",
    "serialized-collaborators",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Handwriting Service {} ({})", VERSION_NUMBER, BUILD_DATE)
}
