// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Click-to-place polygon selection.
//!
//! Each press adds a vertex, closes the polygon (press on the first vertex
//! once there are three), or deletes the pressed vertex. The vertex hit
//! radius is measured on screen, so it covers fewer image pixels as the
//! user zooms in.

use super::{Draft, SelectionOutcome, Tool, ToolState};
use crate::engine::viewport::ViewportMetrics;
use crate::models::annotation::{Mask, Point, Selection};

/// Polygon tool.
#[derive(Debug, Clone)]
pub struct PolygonTool {
    hit_radius: f64,
    vertices: Vec<Point>,
    cursor: Option<Point>,
}

impl PolygonTool {
    /// `hit_radius` is in display pixels.
    pub fn new(hit_radius: f64) -> Self {
        Self {
            hit_radius,
            vertices: Vec::new(),
            cursor: None,
        }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Drop every placed vertex without completing.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    fn vertex_at(&self, pos: Point, viewport: &dyn ViewportMetrics) -> Option<usize> {
        self.vertices
            .iter()
            .position(|v| pos.distance_to(viewport.to_display(*v)) < self.hit_radius)
    }
}

impl Tool for PolygonTool {
    fn on_pointer_down(&mut self, pos: Point, viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        match self.vertex_at(pos, viewport) {
            Some(0) if self.vertices.len() >= 3 => {
                let points = std::mem::take(&mut self.vertices);
                self.cursor = None;
                SelectionOutcome::Selected(Selection::from_mask(Mask::Polygon { points }))
            }
            Some(idx) => {
                self.vertices.remove(idx);
                SelectionOutcome::Pending
            }
            None => {
                self.vertices.push(viewport.to_image(pos));
                SelectionOutcome::Pending
            }
        }
    }

    fn on_pointer_move(&mut self, pos: Point, viewport: &dyn ViewportMetrics) {
        self.cursor = Some(viewport.to_image(pos));
    }

    fn on_pointer_up(&mut self, _pos: Point, _viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        SelectionOutcome::Pending
    }

    fn on_pointer_leave(&mut self, _viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        self.cursor = None;
        SelectionOutcome::Pending
    }

    fn cancel(&mut self) {
        self.vertices.clear();
        self.cursor = None;
    }

    fn state(&self) -> ToolState {
        if self.vertices.is_empty() {
            ToolState::Idle
        } else {
            ToolState::Drafting
        }
    }

    fn draft(&self) -> Draft<'_> {
        if self.vertices.is_empty() {
            return Draft::None;
        }
        Draft::Polygon {
            vertices: &self.vertices,
            cursor: self.cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::viewport::Viewport;

    fn click_all(tool: &mut PolygonTool, points: &[(f64, f64)], viewport: &Viewport) {
        for (x, y) in points {
            assert_eq!(
                tool.on_pointer_down(Point::new(*x, *y), viewport),
                SelectionOutcome::Pending
            );
        }
    }

    #[test]
    fn test_close_on_first_vertex() {
        let mut tool = PolygonTool::new(12.0);
        let viewport = Viewport::identity();
        click_all(
            &mut tool,
            &[(0.0, 0.0), (90.0, 0.0), (0.0, 30.0)],
            &viewport,
        );
        let outcome = tool.on_pointer_down(Point::new(5.0, 5.0), &viewport);
        let SelectionOutcome::Selected(selection) = outcome else {
            panic!("expected polygon to close");
        };
        let Mask::Polygon { points } = &selection.mask else {
            panic!("expected a polygon mask");
        };
        assert_eq!(points.len(), 3);
        assert!((selection.click_point.x - 30.0).abs() < 1e-9);
        assert!((selection.click_point.y - 10.0).abs() < 1e-9);
        assert_eq!(tool.state(), ToolState::Idle);
    }

    #[test]
    fn test_first_vertex_with_two_points_deletes_it() {
        let mut tool = PolygonTool::new(12.0);
        let viewport = Viewport::identity();
        click_all(&mut tool, &[(0.0, 0.0), (90.0, 0.0)], &viewport);
        assert_eq!(
            tool.on_pointer_down(Point::new(3.0, 3.0), &viewport),
            SelectionOutcome::Pending
        );
        assert_eq!(tool.vertices(), &[Point::new(90.0, 0.0)]);
    }

    #[test]
    fn test_click_on_other_vertex_deletes_it() {
        let mut tool = PolygonTool::new(12.0);
        let viewport = Viewport::identity();
        click_all(
            &mut tool,
            &[(0.0, 0.0), (90.0, 0.0), (90.0, 90.0), (0.0, 90.0)],
            &viewport,
        );
        tool.on_pointer_down(Point::new(88.0, 92.0), &viewport);
        assert_eq!(
            tool.vertices(),
            &[
                Point::new(0.0, 0.0),
                Point::new(90.0, 0.0),
                Point::new(0.0, 90.0)
            ]
        );
    }

    #[test]
    fn test_vertices_stored_in_image_space() {
        let mut tool = PolygonTool::new(12.0);
        let viewport = Viewport::new(2.0, Point::new(10.0, 10.0));
        click_all(&mut tool, &[(30.0, 50.0)], &viewport);
        assert_eq!(tool.vertices(), &[Point::new(10.0, 20.0)]);
    }

    #[test]
    fn test_hit_radius_is_in_display_pixels() {
        let viewport = Viewport::new(3.0, Point::default());
        let mut tool = PolygonTool::new(12.0);
        // Vertex at image (100, 100) sits at display (300, 300).
        click_all(&mut tool, &[(300.0, 300.0)], &viewport);
        // 15 display px away: outside the 12 px tolerance, though only 5 image px.
        tool.on_pointer_down(Point::new(315.0, 300.0), &viewport);
        assert_eq!(tool.vertices().len(), 2);
        // 10 display px away: inside the tolerance, deletes the second vertex.
        tool.on_pointer_down(Point::new(325.0, 300.0), &viewport);
        assert_eq!(tool.vertices().len(), 1);
    }

    #[test]
    fn test_rubber_band_is_visual_only() {
        let mut tool = PolygonTool::new(12.0);
        let viewport = Viewport::identity();
        click_all(&mut tool, &[(10.0, 10.0)], &viewport);
        tool.on_pointer_move(Point::new(50.0, 60.0), &viewport);
        assert_eq!(
            tool.draft(),
            Draft::Polygon {
                vertices: &[Point::new(10.0, 10.0)],
                cursor: Some(Point::new(50.0, 60.0)),
            }
        );
        assert_eq!(tool.vertices().len(), 1);
        tool.on_pointer_leave(&viewport);
        assert_eq!(
            tool.draft(),
            Draft::Polygon {
                vertices: &[Point::new(10.0, 10.0)],
                cursor: None,
            }
        );
    }

    #[test]
    fn test_clear_resets_without_completing() {
        let mut tool = PolygonTool::new(12.0);
        let viewport = Viewport::identity();
        click_all(&mut tool, &[(0.0, 0.0), (90.0, 0.0), (0.0, 90.0)], &viewport);
        tool.clear();
        assert_eq!(tool.state(), ToolState::Idle);
        assert_eq!(tool.draft(), Draft::None);
    }

    #[test]
    fn test_pointer_up_never_completes() {
        let mut tool = PolygonTool::new(12.0);
        let viewport = Viewport::identity();
        click_all(&mut tool, &[(0.0, 0.0), (90.0, 0.0), (0.0, 90.0)], &viewport);
        assert_eq!(
            tool.on_pointer_up(Point::new(0.0, 0.0), &viewport),
            SelectionOutcome::Pending
        );
        assert_eq!(tool.vertices().len(), 3);
    }
}
