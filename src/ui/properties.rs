// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Side panel: the pending selection preview and the photo's mask list.

use shelfmask::io::clip::ClippedImage;
use shelfmask::{Mask, PhotoMasks, Selection};

/// A finished selection waiting to be added to the photo.
pub struct PendingSelection {
    pub selection: Selection,
    pub clipped: ClippedImage,
    pub texture: egui::TextureHandle,
}

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    AddPending,
    DiscardPending,
    Highlight(String),
    Remove(String),
}

/// Display the properties panel.
pub fn show(
    ui: &mut egui::Ui,
    photo: Option<&PhotoMasks>,
    pending: Option<&PendingSelection>,
    highlighted: Option<&str>,
    status: Option<&str>,
) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Selection");
    ui.separator();

    match pending {
        Some(pending) => {
            ui.add(egui::Image::new(&pending.texture).max_width(ui.available_width()));
            ui.label(format!(
                "{} · {}×{} px · {:.1} KB",
                mask_kind(&pending.selection.mask),
                pending.clipped.width,
                pending.clipped.height,
                pending.clipped.png.len() as f64 / 1024.0
            ));
            ui.label(format!(
                "Center: ({:.0}, {:.0})",
                pending.selection.click_point.x, pending.selection.click_point.y
            ));
            ui.horizontal(|ui| {
                if ui.button("Add to photo").clicked() {
                    action = PropertiesAction::AddPending;
                }
                if ui.button("Discard").clicked() {
                    action = PropertiesAction::DiscardPending;
                }
            });
        }
        None => {
            ui.label(egui::RichText::new("Nothing selected").weak());
        }
    }

    if let Some(status) = status {
        ui.add_space(6.0);
        ui.colored_label(egui::Color32::from_rgb(239, 68, 68), status);
    }

    ui.add_space(12.0);
    ui.heading("Masks");
    ui.separator();

    let Some(photo) = photo else {
        ui.label(egui::RichText::new("No photo loaded").weak());
        return action;
    };

    if photo.is_empty() {
        ui.label(egui::RichText::new("No masks on this photo").weak());
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for entry in photo.entries().iter().rev() {
            ui.horizontal(|ui| {
                let selected = highlighted == Some(entry.id.as_str());
                let text = format!("{} ({})", entry.id, mask_kind(&entry.mask));
                if ui.selectable_label(selected, text).clicked() {
                    action = PropertiesAction::Highlight(entry.id.clone());
                }
                if ui.small_button("🗑").clicked() {
                    action = PropertiesAction::Remove(entry.id.clone());
                }
            });
        }
    });

    action
}

fn mask_kind(mask: &Mask) -> String {
    match mask {
        Mask::Rect(_) => "rectangle".to_string(),
        Mask::Polygon { points } => format!("polygon, {} points", points.len()),
    }
}
