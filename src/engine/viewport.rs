// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewport metrics.
//!
//! Selection tools never query the windowing toolkit directly. They receive
//! a metrics provider describing where the image sits on screen and how much
//! it is scaled.

use crate::models::annotation::Point;
use crate::util::geometry::{display_to_image, image_to_display};

/// Scale and on-screen origin of the displayed image.
pub trait ViewportMetrics {
    /// Combined fit and zoom scale. Always positive.
    fn display_scale(&self) -> f64;

    /// Screen position of the image's top-left pixel.
    fn origin_offset(&self) -> Point;

    /// Convert a pointer position to image space.
    fn to_image(&self, display: Point) -> Point {
        let origin = self.origin_offset();
        display_to_image(
            Point::new(display.x - origin.x, display.y - origin.y),
            self.display_scale(),
        )
    }

    /// Convert an image-space point to a screen position.
    fn to_display(&self, image: Point) -> Point {
        let origin = self.origin_offset();
        let p = image_to_display(image, self.display_scale());
        Point::new(p.x + origin.x, p.y + origin.y)
    }
}

/// Plain metrics value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub display_scale: f64,
    pub origin_offset: Point,
}

impl Viewport {
    pub fn new(display_scale: f64, origin_offset: Point) -> Self {
        Self {
            display_scale,
            origin_offset,
        }
    }

    /// Unscaled viewport anchored at the origin.
    pub fn identity() -> Self {
        Self::new(1.0, Point::default())
    }
}

impl ViewportMetrics for Viewport {
    fn display_scale(&self) -> f64 {
        self.display_scale
    }

    fn origin_offset(&self) -> Point {
        self.origin_offset
    }
}
