// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer-driven selection tools.
//!
//! Every tool receives pointer positions in display pixels together with
//! the current viewport metrics, converts them to image space, and keeps its
//! in-progress draft there. A finished shape is reported through
//! [`SelectionOutcome::Selected`]; drafts that fail the tool's size policy
//! are reported as [`SelectionOutcome::Rejected`] and need no user-facing
//! error.

pub mod lasso;
pub mod polygon;
pub mod rect;

use std::fmt;

use crate::config::EngineConfig;
use crate::engine::viewport::ViewportMetrics;
use crate::engine::zoom::Size;
use crate::models::annotation::{BoundingBox, Point, Selection};

pub use lasso::LassoTool;
pub use polygon::PolygonTool;
pub use rect::RectTool;

/// Which selection tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Rect,
    Polygon,
    Lasso,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Rect => "Rectangle",
            ToolKind::Polygon => "Polygon",
            ToolKind::Lasso => "Lasso",
        }
    }

    pub fn all() -> &'static [ToolKind] {
        &[ToolKind::Rect, ToolKind::Polygon, ToolKind::Lasso]
    }
}

/// Coarse state of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolState {
    Idle,
    Drafting,
}

/// Why a draft was discarded instead of completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Rectangle smaller than the minimum side length.
    GeometryTooSmall { width: f64, height: f64 },
    /// Fewer than three points.
    InsufficientVertices { count: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::GeometryTooSmall { width, height } => {
                write!(f, "selection too small ({:.1}x{:.1})", width, height)
            }
            Rejection::InsufficientVertices { count } => {
                write!(f, "need at least 3 points, got {}", count)
            }
        }
    }
}

/// Result of feeding one pointer event to a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// Nothing finished yet.
    Pending,
    Selected(Selection),
    Rejected(Rejection),
}

/// In-progress shape for overlay rendering, in image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draft<'a> {
    None,
    Rect(BoundingBox),
    Polygon {
        vertices: &'a [Point],
        /// Rubber-band end point; not part of the geometry.
        cursor: Option<Point>,
    },
    Lasso(&'a [Point]),
}

/// Behavior shared by all selection tools.
pub trait Tool {
    fn on_pointer_down(&mut self, pos: Point, viewport: &dyn ViewportMetrics) -> SelectionOutcome;

    fn on_pointer_move(&mut self, pos: Point, viewport: &dyn ViewportMetrics);

    fn on_pointer_up(&mut self, pos: Point, viewport: &dyn ViewportMetrics) -> SelectionOutcome;

    fn on_pointer_leave(&mut self, viewport: &dyn ViewportMetrics) -> SelectionOutcome;

    /// Discard the draft without completing.
    fn cancel(&mut self);

    fn state(&self) -> ToolState;

    fn draft(&self) -> Draft<'_>;
}

/// The active tool of a viewer session.
#[derive(Debug, Clone)]
pub enum SelectionTool {
    Rect(RectTool),
    Polygon(PolygonTool),
    Lasso(LassoTool),
}

impl SelectionTool {
    /// Create a tool with an empty draft.
    pub fn new(kind: ToolKind, image: Size, config: &EngineConfig) -> Self {
        match kind {
            ToolKind::Rect => SelectionTool::Rect(RectTool::new(image, config.min_rect_size)),
            ToolKind::Polygon => {
                SelectionTool::Polygon(PolygonTool::new(config.vertex_hit_radius()))
            }
            ToolKind::Lasso => SelectionTool::Lasso(LassoTool::new()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            SelectionTool::Rect(_) => ToolKind::Rect,
            SelectionTool::Polygon(_) => ToolKind::Polygon,
            SelectionTool::Lasso(_) => ToolKind::Lasso,
        }
    }

    fn tool(&self) -> &dyn Tool {
        match self {
            SelectionTool::Rect(t) => t,
            SelectionTool::Polygon(t) => t,
            SelectionTool::Lasso(t) => t,
        }
    }

    fn tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            SelectionTool::Rect(t) => t,
            SelectionTool::Polygon(t) => t,
            SelectionTool::Lasso(t) => t,
        }
    }

    pub fn on_pointer_down(
        &mut self,
        pos: Point,
        viewport: &dyn ViewportMetrics,
    ) -> SelectionOutcome {
        let outcome = self.tool_mut().on_pointer_down(pos, viewport);
        self.log_outcome(&outcome);
        outcome
    }

    pub fn on_pointer_move(&mut self, pos: Point, viewport: &dyn ViewportMetrics) {
        self.tool_mut().on_pointer_move(pos, viewport);
    }

    pub fn on_pointer_up(&mut self, pos: Point, viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        let outcome = self.tool_mut().on_pointer_up(pos, viewport);
        self.log_outcome(&outcome);
        outcome
    }

    pub fn on_pointer_leave(&mut self, viewport: &dyn ViewportMetrics) -> SelectionOutcome {
        let outcome = self.tool_mut().on_pointer_leave(viewport);
        self.log_outcome(&outcome);
        outcome
    }

    pub fn cancel(&mut self) {
        self.tool_mut().cancel();
    }

    /// Explicit clear action. Only the polygon tool distinguishes it from cancel.
    pub fn clear(&mut self) {
        match self {
            SelectionTool::Polygon(t) => t.clear(),
            other => other.cancel(),
        }
    }

    pub fn state(&self) -> ToolState {
        self.tool().state()
    }

    pub fn draft(&self) -> Draft<'_> {
        self.tool().draft()
    }

    fn log_outcome(&self, outcome: &SelectionOutcome) {
        match outcome {
            SelectionOutcome::Selected(selection) => log::info!(
                "{} selection finished, click point ({:.1}, {:.1})",
                self.kind().name(),
                selection.click_point.x,
                selection.click_point.y
            ),
            SelectionOutcome::Rejected(reason) => {
                log::debug!("{} draft discarded: {}", self.kind().name(), reason)
            }
            SelectionOutcome::Pending => {}
        }
    }
}
