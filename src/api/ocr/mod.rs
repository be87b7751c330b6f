// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Transcription endpoint module
//!
//! Provides POST /ocr for reading handwritten text from an uploaded image.

pub mod handler;
pub mod response;

pub use handler::{ocr_handler, transcribe_image};
pub use response::OcrResponse;
