// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module
//!
//! This module provides:
//! - Image decoding and grayscale conversion
//! - Preprocessing for the transcription model
//! - OCR and transcription collaborator clients
//!
//! The models themselves run in sidecars; handles are built once at startup.

pub mod image_utils;
pub mod model_manager;
pub mod ocr;
pub mod preprocessing;
pub mod serialized;
pub mod transcription;

pub use image_utils::{
    decode_image_bytes, detect_format, encode_png_base64, to_luma_601, ImageError, ImageInfo,
    MAX_IMAGE_SIZE,
};
pub use model_manager::{CollaboratorConfig, CollaboratorInfo, CollaboratorManager};
pub use ocr::{BoundingRegion, OcrBackend, OcrEngine, OcrError, OcrToken};
pub use preprocessing::ImagePreprocessor;
pub use serialized::Serialized;
pub use transcription::{TranscribeError, TranscriptionModel, TRANSCRIPTION_CONFIDENCE};
