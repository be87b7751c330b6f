// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Transcription endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::response::OcrResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::upload::read_upload;
use crate::vision::decode_image_bytes;

/// POST /ocr - Transcribe handwriting in an uploaded image
///
/// The image is normalized by the preprocessor before it reaches the
/// transcription model.
///
/// # Response
/// - `text`: transcription (may be empty)
/// - `confidence`: always 0.8
///
/// # Errors
/// - 400 Bad Request: no upload in the form
/// - 503 Service Unavailable: no transcription model configured
/// - 500 Internal Server Error: decode, preprocessing or transcription failed
pub async fn ocr_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OcrResponse>, ApiError> {
    let bytes = read_upload(multipart).await?;
    transcribe_image(&state, &bytes).await.map(Json)
}

/// Decode, normalize and transcribe raw image bytes
pub async fn transcribe_image(state: &AppState, bytes: &[u8]) -> Result<OcrResponse, ApiError> {
    let model = state.collaborators.get_transcription_model().ok_or_else(|| {
        warn!("Transcription requested but no model is configured");
        ApiError::ServiceUnavailable("Transcription model not configured".to_string())
    })?;

    let request_id = Uuid::new_v4();
    let (image, info) = decode_image_bytes(bytes)?;

    debug!(
        "[{}] Decoded image: {}x{} {:?}, {} bytes",
        request_id, info.width, info.height, info.format, info.size_bytes
    );

    let prepared = state.preprocessor.prepare(&image)?;
    let text = model.generate(&prepared).await?;

    info!("[{}] Transcription complete: {} chars", request_id, text.len());

    Ok(OcrResponse::new(text))
}
