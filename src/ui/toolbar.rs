// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with tool selection and zoom controls.

use shelfmask::{ToolKind, ZoomState};

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    /// `None` switches back to view mode.
    SelectTool(Option<ToolKind>),
    ClearDraft,
    ZoomIn,
    ZoomOut,
    ResetZoom,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, current_tool: Option<ToolKind>, zoom: &ZoomState) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");
        ui.separator();

        if ui.selectable_label(current_tool.is_none(), "⬆ View").clicked() {
            action = ToolbarAction::SelectTool(None);
        }
        for kind in ToolKind::all() {
            let label = match kind {
                ToolKind::Rect => "▭ Rectangle",
                ToolKind::Polygon => "▱ Polygon",
                ToolKind::Lasso => "➰ Lasso",
            };
            if ui.selectable_label(current_tool == Some(*kind), label).clicked() {
                action = ToolbarAction::SelectTool(Some(*kind));
            }
        }

        if current_tool == Some(ToolKind::Polygon) && ui.button("Clear").clicked() {
            action = ToolbarAction::ClearDraft;
        }

        ui.separator();

        if ui.add_enabled(zoom.can_zoom_out(), egui::Button::new("−")).clicked() {
            action = ToolbarAction::ZoomOut;
        }
        ui.label(format!("{}%", zoom.percentage()));
        if ui.add_enabled(zoom.can_zoom_in(), egui::Button::new("+")).clicked() {
            action = ToolbarAction::ZoomIn;
        }
        if ui.button("Fit").clicked() {
            action = ToolbarAction::ResetZoom;
        }

        ui.separator();

        let tool_text = match current_tool {
            None => "Click a marked region to select it",
            Some(ToolKind::Rect) => "Drag to select a rectangle",
            Some(ToolKind::Polygon) => {
                "Click to add vertices, click the first (orange) vertex to close, click a vertex to delete it"
            }
            Some(ToolKind::Lasso) => "Drag around the object",
        };
        ui.label(egui::RichText::new(tool_text).italics().weak());
    });

    action
}
