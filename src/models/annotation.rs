// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mask data structures.
//!
//! This module defines the geometry handed between the selection engine,
//! the clipper and the hit tester. All coordinates are image-space pixels
//! unless a function says otherwise.

use serde::{Deserialize, Serialize};

use crate::util::geometry;

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned box in image space. Width and height are never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized box spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// The geometric shape of an annotated region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Mask {
    /// Dragged rectangle.
    Rect(BoundingBox),
    /// Closed polygon; winding order is whatever the user drew.
    Polygon { points: Vec<Point> },
}

impl Mask {
    /// Rectangular framing of the mask.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Mask::Rect(rect) => *rect,
            Mask::Polygon { points } => geometry::bounding_box_of(points),
        }
    }

    /// Check if an image-space point lies inside the mask.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Mask::Rect(rect) => geometry::is_point_in_rect(point, rect),
            Mask::Polygon { points } => geometry::is_point_in_polygon(point, points),
        }
    }

    /// Representative point: rectangle center or vertex centroid.
    pub fn click_point(&self) -> Point {
        match self {
            Mask::Rect(rect) => rect.center(),
            Mask::Polygon { points } => geometry::centroid(points),
        }
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self, Mask::Polygon { .. })
    }
}

/// A finished selection as handed to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub mask: Mask,
    pub click_point: Point,
}

impl Selection {
    /// Wrap a mask, deriving its click point.
    pub fn from_mask(mask: Mask) -> Self {
        let click_point = mask.click_point();
        Self { mask, click_point }
    }
}
