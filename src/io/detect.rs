// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Assisted detection collaborator.
//!
//! A remote segmentation service can turn a single click or a lasso hint
//! into an object outline. Only the request/response shapes and the
//! [`Detector`] seam live here; transport is provided by the caller.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::annotation::{BoundingBox, Mask, Point, Selection};

/// Error code used when the service answers without a usable outline.
pub const NO_OBJECT: &str = "NO_OBJECT";
/// Error code used when the error body itself cannot be read.
pub const SERVER_ERROR: &str = "SERVER_ERROR";

/// Integer image-space point as sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl From<Point> for PixelPoint {
    fn from(p: Point) -> Self {
        Self {
            x: p.x.round() as i64,
            y: p.y.round() as i64,
        }
    }
}

/// Detection hint sent to the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetectionRequest {
    Click { click_x: i64, click_y: i64 },
    Lasso { lasso_polygon: Vec<PixelPoint> },
}

impl DetectionRequest {
    pub fn from_click(point: Point) -> Self {
        let p = PixelPoint::from(point);
        DetectionRequest::Click {
            click_x: p.x,
            click_y: p.y,
        }
    }

    pub fn from_lasso(points: &[Point]) -> Self {
        DetectionRequest::Lasso {
            lasso_polygon: points.iter().copied().map(PixelPoint::from).collect(),
        }
    }
}

/// Outline returned by the service, in image pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub polygon: Vec<Point>,
    pub bounding_box: BoundingBox,
}

impl DetectionResult {
    /// Turn the outline into a finished polygon selection.
    pub fn into_selection(self) -> Result<Selection, DetectionError> {
        if self.polygon.len() < 3 {
            return Err(DetectionError::new(
                format!("detected outline has {} points", self.polygon.len()),
                NO_OBJECT,
            ));
        }
        Ok(Selection::from_mask(Mask::Polygon {
            points: self.polygon,
        }))
    }
}

/// Failure reported by (or about) the service.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{error} ({code})")]
pub struct DetectionError {
    pub error: String,
    pub code: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Wrapped { detail: DetectionError },
    Plain(DetectionError),
}

impl DetectionError {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }

    /// Parse an error response body (`{error, code}` or `{detail: {...}}`).
    pub fn from_response_body(body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody::Wrapped { detail }) => detail,
            Ok(ErrorBody::Plain(err)) => err,
            Err(_) => Self::new("detection server error", SERVER_ERROR),
        }
    }
}

/// Transport to the segmentation service.
pub trait Detector {
    fn segment(
        &self,
        image: &RgbaImage,
        request: &DetectionRequest,
    ) -> Result<DetectionResult, DetectionError>;
}
