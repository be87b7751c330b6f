// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /ocr through the full router

use std::sync::Arc;

use axum::http::StatusCode;
use handwriting_service::{
    classifier::ClassifierKind,
    vision::{CollaboratorManager, TranscriptionModel},
};
use image::{ColorType, DynamicImage, GrayImage, Luma};
use serde_json::json;

use super::common::{
    blank_png, checkerboard_png, edge_texture_router, png_bytes, router_with, send,
    upload_request, FakeTranscriber,
};

fn transcription_router(model: Arc<FakeTranscriber>) -> axum::Router {
    let model: Arc<dyn TranscriptionModel> = model;
    router_with(
        ClassifierKind::EdgeTexture,
        CollaboratorManager::from_parts(None, Some(model)),
    )
}

#[tokio::test]
async fn test_transcription_is_returned() {
    let model = Arc::new(FakeTranscriber::replying("Dear Margaret"));
    let image = checkerboard_png(32);

    let (status, json) = send(
        transcription_router(model.clone()),
        upload_request("/ocr", "file", &image),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"text": "Dear Margaret", "confidence": 0.8}));
}

#[tokio::test]
async fn test_model_receives_preprocessed_image() {
    let model = Arc::new(FakeTranscriber::replying("x"));
    let image = blank_png(100, 150);

    let (status, _) = send(
        transcription_router(model.clone()),
        upload_request("/ocr", "file", &image),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(model.last_seen(), Some((512, 768, ColorType::Rgb8)));
}

#[tokio::test]
async fn test_empty_transcription_is_not_an_error() {
    let model = Arc::new(FakeTranscriber::replying(""));
    let image = blank_png(8, 8);

    let (status, json) = send(
        transcription_router(model),
        upload_request("/ocr", "file", &image),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "");
}

#[tokio::test]
async fn test_without_model_is_service_unavailable() {
    let image = blank_png(8, 8);
    let (status, json) = send(
        edge_texture_router(),
        upload_request("/ocr", "file", &image),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_malformed_bytes_are_structured_error() {
    let model = Arc::new(FakeTranscriber::replying("unused"));
    let (status, json) = send(
        transcription_router(model.clone()),
        upload_request("/ocr", "file", b"GIF89a-but-not-really"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to process image:"), "{}", message);
    assert_eq!(model.last_seen(), None);
}

#[tokio::test]
async fn test_model_failure_is_structured_error() {
    let model = Arc::new(FakeTranscriber::failing("out of memory"));
    let image = blank_png(8, 8);

    let (status, json) = send(
        transcription_router(model),
        upload_request("/ocr", "file", &image),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("out of memory"));
}

#[tokio::test]
async fn test_missing_upload_is_bad_request() {
    let model = Arc::new(FakeTranscriber::replying("unused"));
    let (status, json) = send(
        transcription_router(model),
        upload_request("/ocr", "note", b""),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "No file uploaded"}));
}

#[tokio::test]
async fn test_thin_strip_is_structured_error() {
    let model = Arc::new(FakeTranscriber::replying("unused"));
    let strip = png_bytes(&DynamicImage::ImageLuma8(GrayImage::from_pixel(
        1,
        200_000,
        Luma([255]),
    )));

    let (status, json) = send(
        transcription_router(model.clone()),
        upload_request("/ocr", "file", &strip),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to process image:"), "{}", message);
    assert!(message.contains("512x102400000"), "{}", message);
    assert_eq!(model.last_seen(), None);
}
