// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared helpers for router-level tests

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use handwriting_service::{
    api::{build_router, AppState},
    classifier::{build_classifier, ClassifierKind},
    vision::{
        BoundingRegion, CollaboratorManager, OcrEngine, OcrError, OcrToken, TranscribeError,
        TranscriptionModel,
    },
};
use image::{ColorType, DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use serde_json::Value;
use tower::ServiceExt;

pub const BOUNDARY: &str = "handwriting-test-boundary";

/// OCR engine returning a fixed token list (or a fixed error)
pub struct FakeOcrEngine {
    pub result: Result<Vec<f64>, String>,
}

#[async_trait]
impl OcrEngine for FakeOcrEngine {
    async fn read(&self, _image: &DynamicImage) -> Result<Vec<OcrToken>, OcrError> {
        match &self.result {
            Ok(confidences) => Ok(confidences
                .iter()
                .map(|&confidence| OcrToken {
                    text: "word".to_string(),
                    bounding_region: BoundingRegion::default(),
                    confidence,
                })
                .collect()),
            Err(message) => Err(OcrError::Parse(message.clone())),
        }
    }
}

/// Transcription model that records what it was given
pub struct FakeTranscriber {
    pub reply: Result<String, String>,
    pub seen: Mutex<Option<(u32, u32, ColorType)>>,
}

impl FakeTranscriber {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            seen: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            seen: Mutex::new(None),
        }
    }

    pub fn last_seen(&self) -> Option<(u32, u32, ColorType)> {
        *self.seen.lock().unwrap()
    }
}

#[async_trait]
impl TranscriptionModel for FakeTranscriber {
    async fn generate(&self, image: &DynamicImage) -> Result<String, TranscribeError> {
        *self.seen.lock().unwrap() = Some((image.width(), image.height(), image.color()));
        self.reply
            .clone()
            .map_err(TranscribeError::Collaborator)
    }
}

pub fn edge_texture_router() -> Router {
    router_with(ClassifierKind::EdgeTexture, CollaboratorManager::empty())
}

pub fn router_with(kind: ClassifierKind, collaborators: CollaboratorManager) -> Router {
    let collaborators = Arc::new(collaborators);
    let classifier = build_classifier(kind, 0.5, &collaborators).unwrap();
    build_router(AppState::new("handwriting_detector", classifier, collaborators))
}

pub fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn checkerboard_png(size: u32) -> Vec<u8> {
    let board = GrayImage::from_fn(size, size, |x, y| {
        if (x + y) % 2 == 0 {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    png_bytes(&DynamicImage::ImageLuma8(board))
}

pub fn blank_png(width: u32, height: u32) -> Vec<u8> {
    png_bytes(&DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width,
        height,
        Rgb([255, 255, 255]),
    )))
}

/// Multipart body with one part per `(field name, data)`
pub fn multipart_body(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, data) in parts {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"upload.png\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Single-field upload
pub fn upload_request(uri: &str, field: &str, data: &[u8]) -> Request<Body> {
    multipart_request(uri, &[(field, data)])
}

pub fn multipart_request(uri: &str, parts: &[(&str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response<Body> = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
