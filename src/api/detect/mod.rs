// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Handwriting detection endpoint module
//!
//! Provides POST /detect for labelling an uploaded image as handwritten or printed.

pub mod handler;
pub mod response;

pub use handler::{detect_handler, detect_image};
pub use response::DetectResponse;
