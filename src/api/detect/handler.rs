// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use tracing::{debug, info};
use uuid::Uuid;

use super::response::DetectResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::upload::read_upload;
use crate::vision::decode_image_bytes;

/// POST /detect - Classify an uploaded image as handwritten or printed
///
/// # Request
/// Multipart form with the image in field `file` (or the first field with data).
///
/// # Response
/// - `result`: "handwritten" or "printed"
/// - `confidence`: 0.0-1.0
///
/// # Errors
/// - 400 Bad Request: no upload in the form
/// - 500 Internal Server Error: the bytes could not be decoded or classified
pub async fn detect_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DetectResponse>, ApiError> {
    let bytes = read_upload(multipart).await?;
    detect_image(&state, &bytes).await.map(Json)
}

/// Decode and classify raw image bytes with the configured strategy
pub async fn detect_image(state: &AppState, bytes: &[u8]) -> Result<DetectResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let (image, info) = decode_image_bytes(bytes)?;

    debug!(
        "[{}] Decoded image: {}x{} {:?} {:?}, {} bytes",
        request_id, info.width, info.height, info.format, info.color, info.size_bytes
    );

    let result = state.classifier.classify(&image).await?;

    info!(
        "[{}] Detection ({}): {} ({:.2})",
        request_id,
        state.classifier.kind().name(),
        result.label,
        result.confidence
    );

    Ok(result.into())
}
