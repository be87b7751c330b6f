// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Single-slot access guard for collaborators that cannot run parallel inference

use async_trait::async_trait;
use image::DynamicImage;
use tokio::sync::Mutex;

use super::ocr::{OcrEngine, OcrError, OcrToken};
use super::transcription::{TranscribeError, TranscriptionModel};

/// Wraps a collaborator so at most one call is in flight at a time
///
/// Waiting callers queue on the mutex in FIFO order.
pub struct Serialized<T> {
    inner: T,
    slot: Mutex<()>,
}

impl<T> Serialized<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            slot: Mutex::new(()),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: OcrEngine> OcrEngine for Serialized<T> {
    async fn read(&self, image: &DynamicImage) -> Result<Vec<OcrToken>, OcrError> {
        let _guard = self.slot.lock().await;
        self.inner.read(image).await
    }
}

#[async_trait]
impl<T: TranscriptionModel> TranscriptionModel for Serialized<T> {
    async fn generate(&self, image: &DynamicImage) -> Result<String, TranscribeError> {
        let _guard = self.slot.lock().await;
        self.inner.generate(image).await
    }
}
