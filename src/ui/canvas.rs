// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for photo display and selection.
//!
//! This module draws the photo at the current zoom, overlays the existing
//! masks and the active draft, and translates raw pointer input into
//! display-space pointer events for the selection engine.

use shelfmask::engine::selection::Draft;
use shelfmask::util::hit_test::hits_at_point;
use shelfmask::{Mask, MaskEntry, Point, Size, Viewport, ViewportMetrics, ZoomState};

/// Pointer input in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Leave,
}

/// What the canvas needs to draw one frame.
pub struct CanvasInput<'a> {
    pub texture: Option<&'a egui::TextureHandle>,
    pub zoom: ZoomState,
    pub masks: &'a [MaskEntry],
    pub highlighted: Option<&'a str>,
    pub draft: Draft<'a>,
    /// List the masks under the cursor (view mode).
    pub show_hover_hits: bool,
    pub vertex_radius: f32,
}

/// Measurements and input gathered during one frame.
pub struct CanvasOutput {
    pub container: Size,
    /// `None` until the photo and container are measured.
    pub viewport: Option<Viewport>,
    pub events: Vec<PointerEvent>,
    /// Wheel delta, positive when scrolling down.
    pub wheel: f64,
}

/// Pointer tracking that must survive between frames.
#[derive(Debug, Default)]
pub struct CanvasState {
    inside: bool,
}

const MASK_COLOR: egui::Color32 = egui::Color32::YELLOW;
const HIGHLIGHT_COLOR: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
const DRAFT_COLOR: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
const RECT_DRAFT_COLOR: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const FIRST_VERTEX_COLOR: egui::Color32 = egui::Color32::from_rgb(245, 158, 11);

/// Display the canvas and collect pointer input.
///
/// The photo sits in a scroll area sized to `max(display, available)`, so a
/// zoomed photo can be scrolled to any edge. The wheel drives zoom instead
/// of scrolling.
pub fn show(ui: &mut egui::Ui, state: &mut CanvasState, input: CanvasInput<'_>) -> CanvasOutput {
    let area = ui.available_rect_before_wrap();
    let available = area.size();
    let container = Size::new(available.x as f64, available.y as f64);
    let mut output = CanvasOutput {
        container,
        viewport: None,
        events: Vec::new(),
        wheel: 0.0,
    };

    let Some(texture) = input.texture else {
        let (rect, _response) = ui.allocate_exact_size(available, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(40));
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Open a photo to begin (File → Open Image...)",
            egui::FontId::proportional(16.0),
            egui::Color32::from_gray(180),
        );
        return output;
    };

    let zoom = input.zoom.with_container(container);
    let display = zoom.display_size();
    let scaled = egui::vec2(display.width as f32, display.height as f32);
    let canvas_size = scaled.max(available);

    // Claim the wheel before the scroll area sees it.
    if ui.rect_contains_pointer(area) {
        let scroll = ui.ctx().input_mut(|i| {
            i.smooth_scroll_delta = egui::Vec2::ZERO;
            i.raw_scroll_delta.y
        });
        if scroll != 0.0 {
            // egui reports wheel-up as positive.
            output.wheel = -(scroll as f64);
        }
    }

    egui::ScrollArea::both()
        .id_source("photo_canvas_scroll")
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let (canvas_rect, _response) =
                ui.allocate_exact_size(canvas_size, egui::Sense::click_and_drag());
            // Centered while the photo fits; the scroll offset moves it otherwise.
            let image_rect = egui::Rect::from_center_size(canvas_rect.center(), scaled);
            let visible = ui.clip_rect().intersect(canvas_rect);

            let painter = ui.painter_at(canvas_rect);
            painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));

            let origin = Point::new(image_rect.min.x as f64, image_rect.min.y as f64);
            let Some(viewport) = zoom.viewport(origin) else {
                return;
            };
            output.viewport = Some(viewport);

            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            for entry in input.masks {
                let highlighted = input.highlighted == Some(entry.id.as_str());
                draw_mask(&painter, &entry.mask, &viewport, highlighted);
            }
            draw_draft(&painter, input.draft, &viewport, input.vertex_radius);

            collect_input(ui, visible, state, &mut output);

            if input.show_hover_hits && state.inside {
                draw_hover_hits(ui, visible, &viewport, input.masks);
            }
        });

    output
}

fn draw_hover_hits(ui: &egui::Ui, visible: egui::Rect, viewport: &Viewport, masks: &[MaskEntry]) {
    let Some(pos) = ui.input(|i| i.pointer.latest_pos()) else {
        return;
    };
    let p = viewport.to_image(Point::new(pos.x as f64, pos.y as f64));
    let hits: Vec<&str> = hits_at_point(p, masks)
        .into_iter()
        .map(|e| e.id.as_str())
        .collect();
    if hits.is_empty() {
        return;
    }
    ui.painter_at(visible).text(
        visible.left_bottom() + egui::vec2(8.0, -8.0),
        egui::Align2::LEFT_BOTTOM,
        format!("Under cursor: {}", hits.join(", ")),
        egui::FontId::proportional(14.0),
        egui::Color32::WHITE,
    );
}

/// Turn raw pointer input inside the visible part of the canvas into events.
fn collect_input(ui: &egui::Ui, visible: egui::Rect, state: &mut CanvasState, output: &mut CanvasOutput) {
    let (pos, pressed, released, moved) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.delta() != egui::Vec2::ZERO,
        )
    });

    let inside = pos.is_some_and(|p| visible.contains(p));
    if let Some(pos) = pos {
        let p = Point::new(pos.x as f64, pos.y as f64);
        if inside {
            if pressed {
                output.events.push(PointerEvent::Down(p));
            }
            if moved {
                output.events.push(PointerEvent::Move(p));
            }
            if released {
                output.events.push(PointerEvent::Up(p));
            }
        }
    }

    if state.inside && !inside {
        output.events.push(PointerEvent::Leave);
    }
    state.inside = inside;
}

fn to_pos(viewport: &Viewport, p: Point) -> egui::Pos2 {
    let d = viewport.to_display(p);
    egui::pos2(d.x as f32, d.y as f32)
}

fn screen_points(viewport: &Viewport, points: &[Point]) -> Vec<egui::Pos2> {
    points.iter().map(|p| to_pos(viewport, *p)).collect()
}

fn draw_mask(painter: &egui::Painter, mask: &Mask, viewport: &Viewport, highlighted: bool) {
    let color = if highlighted { HIGHLIGHT_COLOR } else { MASK_COLOR };
    let stroke = egui::Stroke::new(if highlighted { 3.0 } else { 2.0 }, color);
    match mask {
        Mask::Rect(r) => {
            let screen = egui::Rect::from_two_pos(
                to_pos(viewport, Point::new(r.x, r.y)),
                to_pos(viewport, Point::new(r.x + r.width, r.y + r.height)),
            );
            if highlighted {
                painter.rect_filled(screen, 0.0, color.gamma_multiply(0.2));
            }
            painter.rect_stroke(screen, 0.0, stroke);
        }
        Mask::Polygon { points } => {
            painter.add(egui::Shape::closed_line(screen_points(viewport, points), stroke));
        }
    }
}

fn draw_draft(painter: &egui::Painter, draft: Draft<'_>, viewport: &Viewport, vertex_radius: f32) {
    match draft {
        Draft::None => {}
        Draft::Rect(r) => {
            let screen = egui::Rect::from_two_pos(
                to_pos(viewport, Point::new(r.x, r.y)),
                to_pos(viewport, Point::new(r.x + r.width, r.y + r.height)),
            );
            painter.rect_filled(screen, 0.0, RECT_DRAFT_COLOR.gamma_multiply(0.2));
            painter.rect_stroke(screen, 0.0, egui::Stroke::new(2.0, RECT_DRAFT_COLOR));
        }
        Draft::Polygon { vertices, cursor } => {
            let points = screen_points(viewport, vertices);
            if points.len() > 1 {
                painter.add(egui::Shape::line(
                    points.clone(),
                    egui::Stroke::new(2.0, DRAFT_COLOR),
                ));
            }
            if let (Some(last), Some(cursor)) = (points.last(), cursor) {
                painter.extend(egui::Shape::dashed_line(
                    &[*last, to_pos(viewport, cursor)],
                    egui::Stroke::new(1.0, DRAFT_COLOR),
                    5.0,
                    5.0,
                ));
            }
            for (i, p) in points.iter().enumerate() {
                let fill = if i == 0 { FIRST_VERTEX_COLOR } else { DRAFT_COLOR };
                painter.circle_filled(*p, vertex_radius, fill);
                painter.circle_stroke(*p, vertex_radius, egui::Stroke::new(2.0, egui::Color32::BLACK));
            }
        }
        Draft::Lasso(points) => {
            let points = screen_points(viewport, points);
            if points.len() > 1 {
                painter.add(egui::Shape::closed_line(
                    points,
                    egui::Stroke::new(2.0, DRAFT_COLOR),
                ));
            }
        }
    }
}
