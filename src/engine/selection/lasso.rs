// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Freehand lasso selection.

use super::{Draft, Rejection, SelectionOutcome, Tool, ToolState};
use crate::engine::viewport::ViewportMetrics;
use crate::models::annotation::{Mask, Point, Selection};

/// Lasso tool. Every move sample while the pointer is down becomes a vertex.
#[derive(Debug, Clone, Default)]
pub struct LassoTool {
    points: Vec<Point>,
    drawing: bool,
    /// Set while a detection request for a previous lasso is in flight.
    busy: bool,
}

impl LassoTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore all pointer input while `busy` is set.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        if busy {
            self.cancel();
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn finish(&mut self) -> SelectionOutcome {
        if !self.drawing || self.busy {
            return SelectionOutcome::Pending;
        }
        self.drawing = false;
        let points = std::mem::take(&mut self.points);
        if points.len() < 3 {
            return SelectionOutcome::Rejected(Rejection::InsufficientVertices {
                count: points.len(),
            });
        }
        SelectionOutcome::Selected(Selection::from_mask(Mask::Polygon { points }))
    }
}

impl Tool for LassoTool {
    fn on_pointer_down(&mut self, pos: Point, viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        if self.busy {
            return SelectionOutcome::Pending;
        }
        self.drawing = true;
        self.points = vec![viewport.to_image(pos)];
        SelectionOutcome::Pending
    }

    fn on_pointer_move(&mut self, pos: Point, viewport: &dyn ViewportMetrics) {
        if self.drawing && !self.busy {
            self.points.push(viewport.to_image(pos));
        }
    }

    fn on_pointer_up(&mut self, _pos: Point, _viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        self.finish()
    }

    fn on_pointer_leave(&mut self, _viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        self.finish()
    }

    fn cancel(&mut self) {
        self.points.clear();
        self.drawing = false;
    }

    fn state(&self) -> ToolState {
        if self.drawing {
            ToolState::Drafting
        } else {
            ToolState::Idle
        }
    }

    fn draft(&self) -> Draft<'_> {
        if self.points.is_empty() {
            Draft::None
        } else {
            Draft::Lasso(&self.points)
        }
    }
}
