// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload extraction shared by /detect and /ocr

use axum_extra::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use super::errors::ApiError;

/// Preferred form field name
pub const UPLOAD_FIELD: &str = "file";

/// Read the uploaded image bytes
///
/// Returns the `file` field when present and non-empty, otherwise the first
/// field that carries data.
pub async fn read_upload(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    let mut first: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid multipart body: {}", e)))?
    {
        let is_file = field.name() == Some(UPLOAD_FIELD);
        let name = field.name().unwrap_or("<unnamed>").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to read field '{}': {}", name, e)))?;

        if data.is_empty() {
            continue;
        }

        debug!("Upload field '{}': {} bytes", name, data.len());

        if is_file {
            return Ok(data);
        }
        if first.is_none() {
            first = Some(data);
        }
    }

    first.ok_or_else(|| ApiError::InvalidRequest("No file uploaded".to_string()))
}
