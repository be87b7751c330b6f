// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Preprocessing of decoded uploads before transcription
//!
//! Every input color mode must come out as RGB with the shorter side at least
//! 512 pixels.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use handwriting_service::vision::{decode_image_bytes, ImageError, ImagePreprocessor};
use image::{
    ColorType, DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage,
};

// 1x1 palette GIF
const TINY_GIF_BASE64: &str = "R0lGODlhAQABAIAAAP///wAAACH5BAEAAAAALAAAAAABAAEAAAICRAEAOw==";

fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

fn prepare_bytes(bytes: &[u8]) -> DynamicImage {
    let (image, _) = decode_image_bytes(bytes).unwrap();
    ImagePreprocessor::default().prepare(&image).unwrap()
}

#[test]
fn test_palette_gif_becomes_rgb() {
    let bytes = STANDARD.decode(TINY_GIF_BASE64).unwrap();
    let prepared = prepare_bytes(&bytes);

    assert_eq!(prepared.color(), ColorType::Rgb8);
    assert_eq!((prepared.width(), prepared.height()), (512, 512));
}

#[test]
fn test_grayscale_png_becomes_rgb() {
    let gray = GrayImage::from_fn(600, 700, |x, _| Luma([(x % 256) as u8]));
    let bytes = encode(&DynamicImage::ImageLuma8(gray), ImageFormat::Png);

    let prepared = prepare_bytes(&bytes);

    assert_eq!(prepared.color(), ColorType::Rgb8);
    assert_eq!((prepared.width(), prepared.height()), (600, 700));
}

#[test]
fn test_rgba_png_drops_alpha_and_upscales() {
    let rgba = RgbaImage::from_pixel(300, 1000, Rgba([10, 200, 30, 128]));
    let bytes = encode(&DynamicImage::ImageRgba8(rgba), ImageFormat::Png);

    let prepared = prepare_bytes(&bytes);

    assert_eq!(prepared.color(), ColorType::Rgb8);
    // 1000 * 512 / 300 = 1706.67, truncated
    assert_eq!((prepared.width(), prepared.height()), (512, 1706));
}

#[test]
fn test_large_jpeg_keeps_size() {
    let rgb = RgbImage::from_pixel(800, 800, Rgb([120, 130, 140]));
    let bytes = encode(&DynamicImage::ImageRgb8(rgb), ImageFormat::Jpeg);

    let prepared = prepare_bytes(&bytes);

    assert_eq!((prepared.width(), prepared.height()), (800, 800));
}

#[test]
fn test_output_is_gray_in_rgb() {
    let rgb = RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 90]));
    let prepared = ImagePreprocessor::default()
        .prepare(&DynamicImage::ImageRgb8(rgb))
        .unwrap();

    let pixels = prepared.to_rgb8();
    assert!(pixels.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
}

#[test]
fn test_thin_strip_shorter_side_reaches_minimum() {
    let rgb = RgbImage::from_pixel(2, 1, Rgb([0, 0, 0]));
    let prepared = ImagePreprocessor::default()
        .prepare(&DynamicImage::ImageRgb8(rgb))
        .unwrap();

    assert_eq!((prepared.width(), prepared.height()), (1024, 512));
}

#[test]
fn test_thin_strip_upload_is_rejected_not_upscaled() {
    let strip = GrayImage::from_pixel(1, 200_000, Luma([255]));
    let bytes = encode(&DynamicImage::ImageLuma8(strip), ImageFormat::Png);
    let (image, _) = decode_image_bytes(&bytes).unwrap();

    let result = ImagePreprocessor::default().prepare(&image);
    assert!(matches!(result, Err(ImageError::TooManyPixels(512, 102_400_000, _))));
}
