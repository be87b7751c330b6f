// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR collaborator integration
//!
//! The OCR engine itself runs out of process; this module defines the contract
//! the classifier consumes and an HTTP client for the sidecar.
//!
//! Components:
//! - `engine` - `OcrEngine` trait and token types
//! - `parse` - Validation of raw sidecar output into tokens
//! - `client` - HTTP sidecar client

pub mod client;
pub mod engine;
pub mod parse;

pub use client::HttpOcrEngine;
pub use engine::{BoundingRegion, OcrBackend, OcrEngine, OcrError, OcrToken};
pub use parse::parse_tokens;

#[cfg(test)]
pub use engine::MockOcrEngine;
