// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classifier::ClassifyError;
use crate::vision::{ImageError, TranscribeError};

/// Body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors a request can end in; converted to a response in `into_response`
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed upload
    InvalidRequest(String),
    /// Uploaded bytes are not a usable image, or too large once prepared
    Decode(ImageError),
    Classification(ClassifyError),
    Transcription(TranscribeError),
    /// A collaborator the endpoint needs was not configured at startup
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Decode(_) | ApiError::Classification(_) | ApiError::Transcription(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "{}", msg),
            ApiError::Decode(e) => write!(f, "Failed to process image: {}", e),
            ApiError::Classification(e) => write!(f, "Failed to process image: {}", e),
            ApiError::Transcription(e) => write!(f, "Failed to process image: {}", e),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ImageError> for ApiError {
    fn from(error: ImageError) -> Self {
        ApiError::Decode(error)
    }
}

impl From<ClassifyError> for ApiError {
    fn from(error: ClassifyError) -> Self {
        ApiError::Classification(error)
    }
}

impl From<TranscribeError> for ApiError {
    fn from(error: TranscribeError) -> Self {
        ApiError::Transcription(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!("Request failed ({}): {}", status.as_u16(), self);
        (status, Json(self.to_response())).into_response()
    }
}
