// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the transcription model
//!
//! Normalizes uploads before they reach the transcription sidecar:
//! 1. Convert to RGB
//! 2. Upscale so the shorter side is at least `MIN_SIZE` (never downscale)
//! 3. Contrast enhancement
//! 4. Sharpness enhancement
//! 5. Convert to grayscale
//! 6. Light Gaussian blur to suppress noise
//! 7. Convert back to RGB (the model expects 3 channels)

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use tracing::info;

use super::image_utils::{to_luma_601, ImageError};

/// Shorter-side floor applied before transcription
pub const MIN_SIZE: u32 = 512;

/// Contrast multiplier
pub const CONTRAST_FACTOR: f32 = 1.5;

/// Sharpness multiplier
pub const SHARPNESS_FACTOR: f32 = 1.2;

/// Gaussian blur radius
pub const BLUR_RADIUS: f32 = 0.5;

/// Largest image the pipeline will produce (about 120 MB as RGB)
pub const MAX_PREPARED_PIXELS: u64 = 40_000_000;

/// 3x3 smoothing kernel used as the "blurred" reference for sharpening
const SMOOTH_KERNEL: [[f32; 3]; 3] = [[1.0, 1.0, 1.0], [1.0, 5.0, 1.0], [1.0, 1.0, 1.0]];
const SMOOTH_SCALE: f32 = 13.0;

/// Pure image normalization pipeline in front of the transcription model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePreprocessor {
    pub min_size: u32,
    pub contrast_factor: f32,
    pub sharpness_factor: f32,
    pub blur_radius: f32,
    /// Upper bound on the pixel count after upscaling
    pub max_pixels: u64,
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self {
            min_size: MIN_SIZE,
            contrast_factor: CONTRAST_FACTOR,
            sharpness_factor: SHARPNESS_FACTOR,
            blur_radius: BLUR_RADIUS,
            max_pixels: MAX_PREPARED_PIXELS,
        }
    }
}

impl ImagePreprocessor {
    /// Run the full pipeline and return a new RGB image
    ///
    /// Fails with `ImageError::TooManyPixels` when the planned output is larger
    /// than `max_pixels`; thin strips upscale to enormous sizes.
    pub fn prepare(&self, image: &DynamicImage) -> Result<DynamicImage, ImageError> {
        let (width, height) = image.dimensions();
        let (new_w, new_h) = target_dimensions(width, height, self.min_size);
        let pixels = new_w as u64 * new_h as u64;
        if pixels > self.max_pixels {
            return Err(ImageError::TooManyPixels(
                new_w as u64,
                new_h as u64,
                self.max_pixels,
            ));
        }

        let rgb = image.to_rgb8();
        let rgb = self.upscale(rgb, new_w, new_h);
        let rgb = enhance_contrast(&rgb, self.contrast_factor);
        let rgb = enhance_sharpness(&rgb, self.sharpness_factor);

        let gray = to_luma_601(&DynamicImage::ImageRgb8(rgb));
        let blurred = image::imageops::blur(&gray, self.blur_radius);

        Ok(DynamicImage::ImageRgb8(
            DynamicImage::ImageLuma8(blurred).to_rgb8(),
        ))
    }

    fn upscale(&self, rgb: RgbImage, new_w: u32, new_h: u32) -> RgbImage {
        let (width, height) = rgb.dimensions();
        if (new_w, new_h) == (width, height) {
            return rgb;
        }

        info!(
            "Resized image from {}x{} to {}x{}",
            width, height, new_w, new_h
        );
        image::imageops::resize(&rgb, new_w, new_h, FilterType::Lanczos3)
    }
}

/// Dimensions after the shorter-side upscale
///
/// The shorter side lands exactly on `min_size`; the longer side is scaled by
/// the same ratio and truncated (saturating at `u32::MAX`). Images already at
/// or above `min_size` keep their size.
pub fn target_dimensions(width: u32, height: u32, min_size: u32) -> (u32, u32) {
    let shorter = width.min(height);
    if shorter == 0 || shorter >= min_size {
        return (width, height);
    }

    let ratio = min_size as f64 / shorter as f64;
    let scale = |side: u32| {
        if side == shorter {
            min_size
        } else {
            (side as f64 * ratio) as u32
        }
    };

    (scale(width), scale(height))
}

/// Blend `original` away from `degenerate` by `factor` (1.0 is identity)
fn blend(degenerate: f32, original: f32, factor: f32) -> u8 {
    let value = degenerate + factor * (original - degenerate);
    value.clamp(0.0, 255.0) as u8
}

/// Scale each sample's distance from the mean gray level
pub fn enhance_contrast(rgb: &RgbImage, factor: f32) -> RgbImage {
    let gray = to_luma_601(&DynamicImage::ImageRgb8(rgb.clone()));
    let pixel_count = gray.as_raw().len().max(1) as f64;
    let sum: f64 = gray.as_raw().iter().map(|&v| v as f64).sum();
    let mean = (sum / pixel_count + 0.5).floor() as f32;

    let mut output = rgb.clone();
    for pixel in output.pixels_mut() {
        for c in 0..3 {
            pixel[c] = blend(mean, pixel[c] as f32, factor);
        }
    }

    output
}

/// Push each sample away from its 3x3 smoothed value; border pixels keep
/// their original values
pub fn enhance_sharpness(rgb: &RgbImage, factor: f32) -> RgbImage {
    let (width, height) = rgb.dimensions();
    if width < 3 || height < 3 {
        return rgb.clone();
    }

    let mut output = rgb.clone();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut smoothed = [0.0f32; 3];
            for (ky, row) in SMOOTH_KERNEL.iter().enumerate() {
                for (kx, weight) in row.iter().enumerate() {
                    let sample = rgb.get_pixel(x + kx as u32 - 1, y + ky as u32 - 1);
                    for c in 0..3 {
                        smoothed[c] += sample[c] as f32 * weight;
                    }
                }
            }

            let original = rgb.get_pixel(x, y);
            let mut sharpened = [0u8; 3];
            for c in 0..3 {
                let reference = (smoothed[c] / SMOOTH_SCALE).round();
                sharpened[c] = blend(reference, original[c] as f32, factor);
            }
            output.put_pixel(x, y, Rgb(sharpened));
        }
    }

    output
}
