// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Handwriting transcription collaborator
//!
//! The sequence-to-sequence model runs in a sidecar; this module defines the
//! `generate(image) -> text` contract and the client that speaks to it.

pub mod client;

use async_trait::async_trait;
use image::DynamicImage;
use thiserror::Error;

pub use client::TranscriptionClient;

/// Confidence reported with every transcription; the model exposes no score
pub const TRANSCRIPTION_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("Transcription request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Transcription model error: {0}")]
    Collaborator(String),
}

/// A model that turns an image of handwriting into text
#[async_trait]
pub trait TranscriptionModel: Send + Sync {
    async fn generate(&self, image: &DynamicImage) -> Result<String, TranscribeError>;
}
