// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape-accurate clipping of a mask out of the source photo.
//!
//! Rectangles are plain 1:1 crops. Polygons are cropped to their bounding
//! box and every pixel's alpha is scaled by the polygon's coverage, so the
//! area outside the shape becomes fully transparent. Source pixels that fall
//! outside the photo stay transparent in both cases.

use image::{Rgba, RgbaImage};
use thiserror::Error;
use tiny_skia::{FillRule, PathBuilder, Transform};

use super::media::encode_png;
use crate::models::annotation::{BoundingBox, Mask, Point};
use crate::util::geometry::bounding_box_of;

/// Clipping failures. None of them are retried.
#[derive(Debug, Error)]
pub enum ClipError {
    #[error("polygon needs at least 3 vertices, got {vertices}")]
    InvalidShape { vertices: usize },

    #[error("clip region {width}x{height} has no pixels")]
    EmptyRegion { width: f64, height: f64 },

    #[error("cannot allocate {width}x{height} raster")]
    Allocation { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encoded clip result handed to persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Crop a rectangle 1:1.
pub fn clip_rect(source: &RgbaImage, rect: &BoundingBox) -> Result<RgbaImage, ClipError> {
    let (width, height) = raster_size(rect, rect.width.trunc(), rect.height.trunc())?;
    Ok(copy_region(
        source,
        rect.x.floor() as i64,
        rect.y.floor() as i64,
        width,
        height,
    ))
}

/// Crop `bbox` and make everything outside the polygon transparent.
///
/// The raster spans every pixel the box touches, from `floor(x)` up to
/// `ceil(x + width)`, so fractional edges keep their partially covered pixels.
pub fn clip_polygon(
    source: &RgbaImage,
    points: &[Point],
    bbox: &BoundingBox,
) -> Result<RgbaImage, ClipError> {
    if points.len() < 3 {
        return Err(ClipError::InvalidShape {
            vertices: points.len(),
        });
    }
    let (width, height) = raster_size(
        bbox,
        pixel_span(bbox.x, bbox.width),
        pixel_span(bbox.y, bbox.height),
    )?;
    let (ox, oy) = (bbox.x.floor(), bbox.y.floor());

    let mut pb = PathBuilder::new();
    pb.move_to((points[0].x - ox) as f32, (points[0].y - oy) as f32);
    for p in &points[1..] {
        pb.line_to((p.x - ox) as f32, (p.y - oy) as f32);
    }
    pb.close();
    let path = pb.finish().ok_or(ClipError::InvalidShape {
        vertices: points.len(),
    })?;

    let mut coverage =
        tiny_skia::Mask::new(width, height).ok_or(ClipError::Allocation { width, height })?;
    coverage.fill_path(&path, FillRule::Winding, true, Transform::identity());

    let mut output = copy_region(source, ox as i64, oy as i64, width, height);
    for (pixel, cov) in output.pixels_mut().zip(coverage.data()) {
        pixel[3] = ((u16::from(pixel[3]) * u16::from(*cov) + 127) / 255) as u8;
    }
    Ok(output)
}

/// Clip any mask; polygons are framed by their own bounding box.
pub fn clip(source: &RgbaImage, mask: &Mask) -> Result<RgbaImage, ClipError> {
    match mask {
        Mask::Rect(rect) => clip_rect(source, rect),
        Mask::Polygon { points } => clip_polygon(source, points, &bounding_box_of(points)),
    }
}

/// Clip and encode as PNG.
pub fn clip_to_png(source: &RgbaImage, mask: &Mask) -> Result<ClippedImage, ClipError> {
    clip_and_encode(source, mask).map(|(clipped, _)| clipped)
}

/// Clip and encode, keeping the raster for callers that also display it.
pub fn clip_and_encode(
    source: &RgbaImage,
    mask: &Mask,
) -> Result<(ClippedImage, RgbaImage), ClipError> {
    let raster = clip(source, mask)?;
    let clipped = ClippedImage {
        png: encode_png(&raster)?,
        width: raster.width(),
        height: raster.height(),
    };
    Ok((clipped, raster))
}

fn pixel_span(start: f64, length: f64) -> f64 {
    if length > 0.0 {
        (start + length).ceil() - start.floor()
    } else {
        0.0
    }
}

fn raster_size(rect: &BoundingBox, w: f64, h: f64) -> Result<(u32, u32), ClipError> {
    if !(w >= 1.0 && h >= 1.0) {
        return Err(ClipError::EmptyRegion {
            width: rect.width,
            height: rect.height,
        });
    }
    let (width, height) = (w.min(f64::from(u32::MAX)) as u32, h.min(f64::from(u32::MAX)) as u32);
    let bytes = u64::from(width) * u64::from(height) * 4;
    if bytes > isize::MAX as u64 {
        return Err(ClipError::Allocation { width, height });
    }
    Ok((width, height))
}

fn copy_region(source: &RgbaImage, x0: i64, y0: i64, width: u32, height: u32) -> RgbaImage {
    let (sw, sh) = (i64::from(source.width()), i64::from(source.height()));
    RgbaImage::from_fn(width, height, |x, y| {
        let (sx, sy) = (x0 + i64::from(x), y0 + i64::from(y));
        if sx >= 0 && sy >= 0 && sx < sw && sy < sh {
            *source.get_pixel(sx as u32, sy as u32)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}
