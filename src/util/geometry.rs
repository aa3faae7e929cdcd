// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the image/display coordinate transform and the
//! point-in-shape tests used by hit testing and selection.

use crate::models::annotation::{BoundingBox, Point};

/// Convert an image-space point to display space.
pub fn image_to_display(point: Point, scale: f64) -> Point {
    Point::new(point.x * scale, point.y * scale)
}

/// Convert a display-space point to image space.
///
/// The caller must not pass a zero scale; see `ZoomState::is_ready`.
pub fn display_to_image(point: Point, scale: f64) -> Point {
    Point::new(point.x / scale, point.y / scale)
}

/// Smallest box enclosing every point. An empty slice yields a zero box.
pub fn bounding_box_of(points: &[Point]) -> BoundingBox {
    let Some(first) = points.first() else {
        return BoundingBox::default();
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Arithmetic mean of the vertices.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::default();
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Inclusive on all four edges.
pub fn is_point_in_rect(point: Point, rect: &BoundingBox) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

/// Even-odd ray casting. Fewer than three vertices never contain anything.
pub fn is_point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
