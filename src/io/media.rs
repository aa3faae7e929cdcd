// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image loading and encoding.
//!
//! This module decodes photos into RGBA bitmaps for display and clipping,
//! and encodes clipped regions back to PNG.

use anyhow::{Context, Result};
use image::{ImageFormat, ImageResult, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// A decoded photo.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: RgbaImage,
}

impl LoadedImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
        }
    }
}

/// Decode an image file into RGBA.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode image {}", path.display()))?;
    Ok(LoadedImage::from_rgba(img.to_rgba8()))
}

/// Encode an RGBA bitmap as PNG, keeping the alpha channel.
pub fn encode_png(image: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
