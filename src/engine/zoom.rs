// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zoom state for one viewer session.
//!
//! The relative zoom is kept as a count of 0.1 steps above 1.0, so the
//! bounds 1.0 and 3.0 are hit exactly no matter how many steps were taken.
//! All transitions take the state by value and return the next state.

use super::viewport::Viewport;
use crate::models::annotation::Point;

/// Smallest relative zoom (fit to container).
pub const MIN_SCALE: f64 = 1.0;
/// Largest relative zoom.
pub const MAX_SCALE: f64 = 3.0;
/// Zoom change per step.
pub const ZOOM_STEP: f64 = 0.1;

const MAX_STEPS: u8 = 20;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Relative zoom plus the sizes the fit scale is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoomState {
    steps: u8,
    container: Size,
    image: Size,
}

impl ZoomState {
    pub fn new(image: Size) -> Self {
        Self {
            steps: 0,
            container: Size::default(),
            image,
        }
    }

    /// User zoom multiplier in `[1.0, 3.0]`.
    pub fn relative_scale(&self) -> f64 {
        MIN_SCALE + f64::from(self.steps) / 10.0
    }

    /// Scale that makes the whole image fit the container.
    pub fn fit_scale(&self) -> f64 {
        if !self.container.is_measured() || !self.image.is_measured() {
            return 1.0;
        }
        (self.container.width / self.image.width).min(self.container.height / self.image.height)
    }

    pub fn display_scale(&self) -> f64 {
        self.fit_scale() * self.relative_scale()
    }

    /// True once both the container and the image have been measured.
    pub fn is_ready(&self) -> bool {
        self.container.is_measured() && self.image.is_measured()
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn image(&self) -> Size {
        self.image
    }

    /// Image size on screen at the current scale.
    pub fn display_size(&self) -> Size {
        let scale = self.display_scale();
        Size::new(self.image.width * scale, self.image.height * scale)
    }

    pub fn zoom_in(self) -> Self {
        Self {
            steps: (self.steps + 1).min(MAX_STEPS),
            ..self
        }
    }

    pub fn zoom_out(self) -> Self {
        Self {
            steps: self.steps.saturating_sub(1),
            ..self
        }
    }

    pub fn reset(self) -> Self {
        Self { steps: 0, ..self }
    }

    /// Wheel handling: scrolling up (negative delta) zooms in.
    pub fn on_wheel(self, delta_y: f64) -> Self {
        if delta_y < 0.0 {
            self.zoom_in()
        } else if delta_y > 0.0 {
            self.zoom_out()
        } else {
            self
        }
    }

    /// Container re-measured. Zoom is kept.
    pub fn with_container(self, container: Size) -> Self {
        Self { container, ..self }
    }

    /// New image dimensions. Zoom resets when they actually change.
    pub fn with_image(self, image: Size) -> Self {
        if image == self.image {
            return self;
        }
        Self {
            steps: 0,
            image,
            ..self
        }
    }

    pub fn can_zoom_in(&self) -> bool {
        self.steps < MAX_STEPS
    }

    pub fn can_zoom_out(&self) -> bool {
        self.steps > 0
    }

    /// Relative zoom as a whole percentage, e.g. 130.
    pub fn percentage(&self) -> u32 {
        (self.relative_scale() * 100.0).round() as u32
    }

    /// Metrics for the selection tools; `None` until ready.
    pub fn viewport(&self, origin: Point) -> Option<Viewport> {
        self.is_ready()
            .then(|| Viewport::new(self.display_scale(), origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::viewport::ViewportMetrics;

    fn ready() -> ZoomState {
        ZoomState::new(Size::new(1600.0, 1200.0)).with_container(Size::new(800.0, 900.0))
    }

    #[test]
    fn test_fit_scale_uses_tighter_axis() {
        let zoom = ready();
        assert!((zoom.fit_scale() - 0.5).abs() < 1e-9);
        assert!((zoom.display_scale() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_not_ready_until_measured() {
        let zoom = ZoomState::new(Size::new(1600.0, 1200.0));
        assert!(!zoom.is_ready());
        assert_eq!(zoom.fit_scale(), 1.0);
        assert!(zoom.viewport(Point::default()).is_none());

        let zoom = ZoomState::new(Size::default()).with_container(Size::new(800.0, 600.0));
        assert!(!zoom.is_ready());
        assert!(ready().viewport(Point::default()).is_some());
    }

    #[test]
    fn test_zoom_in_clamps_exactly_at_max() {
        let mut zoom = ready();
        for _ in 0..10 {
            zoom = zoom.zoom_in();
        }
        assert_eq!(zoom.relative_scale(), 2.0);
        for _ in 0..10 {
            zoom = zoom.zoom_in();
        }
        assert_eq!(zoom.relative_scale(), MAX_SCALE);
        assert!(!zoom.can_zoom_in());
        zoom = zoom.zoom_in();
        assert_eq!(zoom.relative_scale(), MAX_SCALE);
    }

    #[test]
    fn test_zoom_out_clamps_at_min() {
        let zoom = ready().zoom_in().zoom_out().zoom_out();
        assert_eq!(zoom.relative_scale(), MIN_SCALE);
        assert!(!zoom.can_zoom_out());
    }

    #[test]
    fn test_wheel_direction() {
        let zoom = ready().on_wheel(-120.0);
        assert!((zoom.relative_scale() - 1.1).abs() < 1e-9);
        let zoom = zoom.on_wheel(53.0);
        assert_eq!(zoom.relative_scale(), 1.0);
        assert_eq!(zoom.on_wheel(0.0), zoom);
    }

    #[test]
    fn test_reset() {
        let zoom = ready().zoom_in().zoom_in().reset();
        assert_eq!(zoom.relative_scale(), 1.0);
    }

    #[test]
    fn test_container_resize_keeps_zoom() {
        let zoom = ready().zoom_in().zoom_in();
        let resized = zoom.with_container(Size::new(400.0, 300.0));
        assert!((resized.relative_scale() - 1.2).abs() < 1e-9);
        assert!((resized.fit_scale() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_image_change_resets_zoom() {
        let zoom = ready().zoom_in();
        let same = zoom.with_image(Size::new(1600.0, 1200.0));
        assert_eq!(same.percentage(), 110);
        let other = zoom.with_image(Size::new(640.0, 480.0));
        assert_eq!(other.percentage(), 100);
    }

    #[test]
    fn test_display_size_follows_zoom() {
        let zoom = ready().zoom_in().zoom_in().zoom_in().zoom_in().zoom_in();
        let size = zoom.display_size();
        assert!((size.width - 1200.0).abs() < 1e-9);
        assert!((size.height - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_scrolled_viewport_reaches_far_edge() {
        // 800x600 view of a 1600x1200 photo at 3.0x: 2400x1800 on screen.
        let mut zoom =
            ZoomState::new(Size::new(1600.0, 1200.0)).with_container(Size::new(800.0, 600.0));
        for _ in 0..20 {
            zoom = zoom.zoom_in();
        }
        assert!((zoom.display_scale() - 1.5).abs() < 1e-9);

        // Scrolled to the bottom-right corner, the image origin is off screen.
        let viewport = zoom.viewport(Point::new(-1600.0, -1200.0)).unwrap();
        let p = viewport.to_image(Point::new(790.0, 590.0));
        assert!(p.x > 1590.0 && p.x <= 1600.0);
        assert!(p.y > 1190.0 && p.y <= 1200.0);
        let back = viewport.to_display(p);
        assert!((back.x - 790.0).abs() < 1e-9);
    }
}
