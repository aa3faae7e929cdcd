// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! shelfmask - interactive region masking for shelf photographs.
//!
//! The library holds everything that does not need a window: the
//! image/display transform, zoom state, the rectangle, polygon and lasso
//! selection tools, hit testing against existing masks, and clipping a
//! finished mask out of the photo.

pub mod config;
pub mod engine;
pub mod io;
pub mod models;
pub mod util;

pub use config::EngineConfig;
pub use engine::selection::{SelectionOutcome, SelectionTool, ToolKind};
pub use engine::viewport::{Viewport, ViewportMetrics};
pub use engine::zoom::{Size, ZoomState};
pub use models::annotation::{BoundingBox, Mask, Point, Selection};
pub use models::photo::{MaskEntry, PhotoMasks};
