// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drag-to-box rectangle selection.

use super::{Draft, Rejection, SelectionOutcome, Tool, ToolState};
use crate::engine::viewport::ViewportMetrics;
use crate::engine::zoom::Size;
use crate::models::annotation::{BoundingBox, Mask, Point, Selection};

/// Rectangle tool. Points are clamped to the image bounds.
#[derive(Debug, Clone)]
pub struct RectTool {
    image: Size,
    min_size: f64,
    start: Option<Point>,
    current: Option<BoundingBox>,
}

impl RectTool {
    pub fn new(image: Size, min_size: f64) -> Self {
        Self {
            image,
            min_size,
            start: None,
            current: None,
        }
    }

    fn image_point(&self, pos: Point, viewport: &dyn ViewportMetrics) -> Point {
        let p = viewport.to_image(pos);
        Point::new(
            p.x.clamp(0.0, self.image.width),
            p.y.clamp(0.0, self.image.height),
        )
    }

    fn finish(&mut self) -> SelectionOutcome {
        if self.start.take().is_none() {
            return SelectionOutcome::Pending;
        }
        let rect = self.current.take().unwrap_or_default();
        if rect.width < self.min_size || rect.height < self.min_size {
            return SelectionOutcome::Rejected(Rejection::GeometryTooSmall {
                width: rect.width,
                height: rect.height,
            });
        }
        SelectionOutcome::Selected(Selection::from_mask(Mask::Rect(rect)))
    }
}

impl Tool for RectTool {
    fn on_pointer_down(&mut self, pos: Point, viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        self.start = Some(self.image_point(pos, viewport));
        self.current = None;
        SelectionOutcome::Pending
    }

    fn on_pointer_move(&mut self, pos: Point, viewport: &dyn ViewportMetrics) {
        let Some(start) = self.start else {
            return;
        };
        let end = self.image_point(pos, viewport);
        self.current = Some(BoundingBox::from_corners(start, end));
    }

    fn on_pointer_up(&mut self, _pos: Point, _viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        self.finish()
    }

    fn on_pointer_leave(&mut self, _viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        self.finish()
    }

    fn cancel(&mut self) {
        self.start = None;
        self.current = None;
    }

    fn state(&self) -> ToolState {
        if self.start.is_some() {
            ToolState::Drafting
        } else {
            ToolState::Idle
        }
    }

    fn draft(&self) -> Draft<'_> {
        match self.current {
            Some(rect) => Draft::Rect(rect),
            None => Draft::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::viewport::Viewport;

    fn tool() -> RectTool {
        RectTool::new(Size::new(800.0, 600.0), 5.0)
    }

    fn drag(
        tool: &mut RectTool,
        from: Point,
        to: Point,
        viewport: &Viewport,
    ) -> SelectionOutcome {
        tool.on_pointer_down(from, viewport);
        tool.on_pointer_move(to, viewport);
        tool.on_pointer_up(to, viewport)
    }

    #[test]
    fn test_tiny_drag_is_rejected() {
        let mut tool = tool();
        let outcome = drag(
            &mut tool,
            Point::new(100.0, 100.0),
            Point::new(102.0, 102.0),
            &Viewport::identity(),
        );
        assert!(matches!(
            outcome,
            SelectionOutcome::Rejected(Rejection::GeometryTooSmall { .. })
        ));
        assert_eq!(tool.state(), ToolState::Idle);
    }

    #[test]
    fn test_thin_drag_is_rejected() {
        let mut tool = tool();
        let outcome = drag(
            &mut tool,
            Point::new(100.0, 100.0),
            Point::new(300.0, 104.0),
            &Viewport::identity(),
        );
        assert!(matches!(outcome, SelectionOutcome::Rejected(_)));
    }

    #[test]
    fn test_click_without_move_is_rejected() {
        let mut tool = tool();
        let viewport = Viewport::identity();
        tool.on_pointer_down(Point::new(50.0, 50.0), &viewport);
        let outcome = tool.on_pointer_up(Point::new(50.0, 50.0), &viewport);
        assert!(matches!(outcome, SelectionOutcome::Rejected(_)));
    }

    #[test]
    fn test_exact_minimum_is_accepted() {
        let mut tool = tool();
        let outcome = drag(
            &mut tool,
            Point::new(10.0, 10.0),
            Point::new(15.0, 15.0),
            &Viewport::identity(),
        );
        assert!(matches!(outcome, SelectionOutcome::Selected(_)));
    }

    #[test]
    fn test_reverse_drag_is_normalized_in_image_space() {
        let mut tool = tool();
        let viewport = Viewport::new(0.5, Point::new(20.0, 10.0));
        let outcome = drag(
            &mut tool,
            Point::new(120.0, 110.0),
            Point::new(70.0, 60.0),
            &viewport,
        );
        let SelectionOutcome::Selected(selection) = outcome else {
            panic!("expected a selection");
        };
        assert_eq!(
            selection.mask,
            Mask::Rect(BoundingBox::new(100.0, 100.0, 100.0, 100.0))
        );
        assert_eq!(selection.click_point, Point::new(150.0, 150.0));
    }

    #[test]
    fn test_points_clamped_to_image() {
        let mut tool = tool();
        let outcome = drag(
            &mut tool,
            Point::new(700.0, -40.0),
            Point::new(950.0, 100.0),
            &Viewport::identity(),
        );
        let SelectionOutcome::Selected(selection) = outcome else {
            panic!("expected a selection");
        };
        assert_eq!(
            selection.mask,
            Mask::Rect(BoundingBox::new(700.0, 0.0, 100.0, 100.0))
        );
    }

    #[test]
    fn test_live_preview_draft() {
        let mut tool = tool();
        let viewport = Viewport::identity();
        assert_eq!(tool.draft(), Draft::None);
        tool.on_pointer_down(Point::new(10.0, 10.0), &viewport);
        tool.on_pointer_move(Point::new(40.0, 30.0), &viewport);
        assert_eq!(tool.draft(), Draft::Rect(BoundingBox::new(10.0, 10.0, 30.0, 20.0)));
    }

    #[test]
    fn test_leave_finalizes() {
        let mut tool = tool();
        let viewport = Viewport::identity();
        tool.on_pointer_down(Point::new(10.0, 10.0), &viewport);
        tool.on_pointer_move(Point::new(60.0, 60.0), &viewport);
        assert!(matches!(
            tool.on_pointer_leave(&viewport),
            SelectionOutcome::Selected(_)
        ));
        assert_eq!(tool.on_pointer_leave(&viewport), SelectionOutcome::Pending);
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut tool = tool();
        tool.on_pointer_move(Point::new(60.0, 60.0), &Viewport::identity());
        assert_eq!(tool.draft(), Draft::None);
        assert_eq!(tool.state(), ToolState::Idle);
    }
}
