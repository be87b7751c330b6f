// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Collaborator manager wiring
//!
//! Handles are built once and shared; strategies are assembled from whatever
//! the manager holds.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use handwriting_service::{
    classifier::{build_classifier, ClassifierKind, Label},
    vision::{
        BoundingRegion, CollaboratorConfig, CollaboratorManager, OcrBackend, OcrEngine, OcrError,
        OcrToken, Serialized,
    },
};
use image::{DynamicImage, RgbImage};

struct CountingOcr {
    calls: AtomicUsize,
    confidence: f64,
}

#[async_trait]
impl OcrEngine for CountingOcr {
    async fn read(&self, _image: &DynamicImage) -> Result<Vec<OcrToken>, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![OcrToken {
            text: "Invoice".to_string(),
            bounding_region: BoundingRegion::default(),
            confidence: self.confidence,
        }])
    }
}

fn image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::new(10, 10))
}

#[tokio::test]
async fn test_shared_engine_is_the_same_instance() {
    let engine = Arc::new(CountingOcr {
        calls: AtomicUsize::new(0),
        confidence: 0.9,
    });
    let shared: Arc<dyn OcrEngine> = engine.clone();
    let manager = CollaboratorManager::from_parts(Some(shared), None);

    let first = manager.get_ocr_engine().unwrap();
    let second = manager.get_ocr_engine().unwrap();
    first.read(&image()).await.unwrap();
    second.read(&image()).await.unwrap();

    assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_ocr_strategy_built_from_manager() {
    let engine: Arc<dyn OcrEngine> = Arc::new(Serialized::new(CountingOcr {
        calls: AtomicUsize::new(0),
        confidence: 0.25,
    }));
    let manager = CollaboratorManager::from_parts(Some(engine), None);

    let classifier = build_classifier(
        ClassifierKind::OcrConfidence,
        OcrBackend::PaddleOcr.default_threshold(),
        &manager,
    )
    .unwrap();
    let result = classifier.classify(&image()).await.unwrap();

    // 0.25 < 0.3
    assert_eq!(result.label, Label::Handwritten);
    assert_eq!(result.confidence, 0.25);
}

#[test]
fn test_listing_reflects_configuration() {
    let engine: Arc<dyn OcrEngine> = Arc::new(CountingOcr {
        calls: AtomicUsize::new(0),
        confidence: 1.0,
    });
    let manager = CollaboratorManager::from_parts(Some(engine), None);

    let listed = manager.list_collaborators();
    let ocr = listed.iter().find(|c| c.kind == "ocr").unwrap();
    let transcription = listed.iter().find(|c| c.kind == "transcription").unwrap();

    assert!(ocr.available);
    assert!(!transcription.available);
}

#[tokio::test]
async fn test_unreachable_sidecar_reports_collaborator_error() {
    let config = CollaboratorConfig {
        ocr_endpoint: Some("http://127.0.0.1:59994".to_string()),
        request_timeout: Duration::from_secs(2),
        ..Default::default()
    };
    let manager = CollaboratorManager::new(config).await;

    let engine = manager.get_ocr_engine().unwrap();
    let err = engine.read(&image()).await.unwrap_err();

    assert!(matches!(err, OcrError::Collaborator(_)));
}
