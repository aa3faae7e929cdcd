// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! One viewer session exists per loaded photo. It owns the zoom state, the
//! active selection tool and the pending selection. Decoding and clipping
//! run on background threads; clip results are tagged with the session they
//! were started in and dropped if the session moved on.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use image::RgbaImage;
use shelfmask::engine::selection::{Draft, SelectionOutcome};
use shelfmask::engine::session::{Session, Tagged};
use shelfmask::io::clip::{self, ClippedImage};
use shelfmask::io::media::{self, LoadedImage};
use shelfmask::{
    EngineConfig, PhotoMasks, Selection, SelectionTool, Size, ToolKind, Viewport,
    ViewportMetrics, ZoomState,
};

use crate::ui::canvas::{self, CanvasInput, CanvasState, PointerEvent};
use crate::ui::properties::{self, PendingSelection, PropertiesAction};
use crate::ui::toolbar::{self, ToolbarAction};

/// A decoded photo ready for display.
struct LoadedPhoto {
    masks: PhotoMasks,
    pixels: Arc<RgbaImage>,
    texture: egui::TextureHandle,
}

/// Result of background image loading operation.
struct LoadedImageData {
    name: String,
    image: LoadedImage,
}

/// Result of a background clip; the raster backs the preview texture.
struct ClipJob {
    selection: Selection,
    result: Result<(ClippedImage, RgbaImage), String>,
}

/// Main application state.
pub struct ShelfmaskApp {
    config: EngineConfig,

    /// Selected tool; `None` is view mode
    current_tool: Option<ToolKind>,

    /// Live tool instance holding the draft
    tool: Option<SelectionTool>,

    zoom: ZoomState,

    photo: Option<LoadedPhoto>,

    /// Advanced on every photo or tool switch
    session: Session,

    canvas_state: CanvasState,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImageData, String>>>,

    clip_sender: Sender<Tagged<ClipJob>>,
    clip_receiver: Receiver<Tagged<ClipJob>>,
    clipping: bool,

    pending: Option<PendingSelection>,

    /// Mask picked in view mode
    highlighted: Option<String>,

    /// Last user-visible error
    status: Option<String>,

    /// Loading state message
    loading_message: Option<String>,
}

impl ShelfmaskApp {
    /// Create a new viewer.
    pub fn new(config: EngineConfig) -> Self {
        let (clip_sender, clip_receiver) = channel();
        Self {
            config,
            current_tool: None,
            tool: None,
            zoom: ZoomState::default(),
            photo: None,
            session: Session::default(),
            canvas_state: CanvasState::default(),
            image_loader: None,
            clip_sender,
            clip_receiver,
            clipping: false,
            pending: None,
            highlighted: None,
            status: None,
            loading_message: None,
        }
    }

    fn image_size(&self) -> Size {
        self.photo
            .as_ref()
            .map(|p| Size::new(f64::from(p.masks.width), f64::from(p.masks.height)))
            .unwrap_or_default()
    }

    /// Start a fresh session: drop the draft, pending selection and any clip in flight.
    fn begin_session(&mut self) {
        self.session.advance();
        self.pending = None;
        self.clipping = false;
        self.status = None;
        let image = self.image_size();
        self.tool = self
            .current_tool
            .map(|kind| SelectionTool::new(kind, image, &self.config));
    }

    fn select_tool(&mut self, kind: Option<ToolKind>) {
        if kind == self.current_tool {
            return;
        }
        self.current_tool = kind;
        self.highlighted = None;
        self.begin_session();
        log::info!(
            "Switched to {}",
            kind.map(|k| k.name()).unwrap_or("view mode")
        );
    }

    /// Load an image file and create a texture for display (asynchronously).
    fn load_image_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        std::thread::spawn(move || {
            let result = media::load_image(&path)
                .map(|image| {
                    log::info!(
                        "Loaded image: {} ({}x{})",
                        path.display(),
                        image.width,
                        image.height
                    );
                    LoadedImageData {
                        name: path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.display().to_string()),
                        image,
                    }
                })
                .map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    fn set_photo(&mut self, data: LoadedImageData, ctx: &egui::Context) {
        let LoadedImage {
            width,
            height,
            pixels,
        } = data.image;
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            pixels.as_raw(),
        );
        let texture = ctx.load_texture("photo", color_image, egui::TextureOptions::LINEAR);

        self.photo = Some(LoadedPhoto {
            masks: PhotoMasks::new(data.name, width, height),
            pixels: Arc::new(pixels),
            texture,
        });
        self.zoom = self
            .zoom
            .with_image(Size::new(f64::from(width), f64::from(height)))
            .reset();
        self.highlighted = None;
        self.begin_session();
    }

    /// Clip the finished selection off the UI thread.
    fn start_clip(&mut self, selection: Selection, ctx: &egui::Context) {
        let Some(photo) = &self.photo else {
            return;
        };
        let pixels = Arc::clone(&photo.pixels);
        let sender = self.clip_sender.clone();
        let session = self.session.id();
        let ctx = ctx.clone();
        self.clipping = true;

        std::thread::spawn(move || {
            let result =
                clip::clip_and_encode(&pixels, &selection.mask).map_err(|e| e.to_string());
            let _ = sender.send(Tagged {
                session,
                value: ClipJob { selection, result },
            });
            ctx.request_repaint();
        });
    }

    fn poll_background(&mut self, ctx: &egui::Context) {
        if let Some(ref receiver) = self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;
                self.loading_message = None;
                match result {
                    Ok(data) => self.set_photo(data, ctx),
                    Err(e) => {
                        log::error!("Failed to load image: {}", e);
                        self.status = Some(e);
                    }
                }
            }
        }

        while let Ok(tagged) = self.clip_receiver.try_recv() {
            let Some(job) = self.session.accept(tagged) else {
                continue;
            };
            self.clipping = false;
            match job.result {
                Ok((clipped, raster)) => {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [raster.width() as usize, raster.height() as usize],
                        raster.as_raw(),
                    );
                    let texture = ctx.load_texture(
                        "selection_preview",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.pending = Some(PendingSelection {
                        selection: job.selection,
                        clipped,
                        texture,
                    });
                }
                Err(e) => {
                    log::error!("Failed to clip selection: {}", e);
                    self.status = Some(format!("Failed to clip selection: {}", e));
                }
            }
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent, viewport: &Viewport, ctx: &egui::Context) {
        let Some(tool) = self.tool.as_mut() else {
            // View mode: pick the topmost mask under the click.
            if let (PointerEvent::Down(pos), Some(photo)) = (event, &self.photo) {
                let point = viewport.to_image(pos);
                self.highlighted = photo.masks.find_at(point).map(|e| e.id.clone());
                match &self.highlighted {
                    Some(id) => log::info!("Selected {} at ({:.0}, {:.0})", id, point.x, point.y),
                    None => log::debug!("No mask at ({:.0}, {:.0})", point.x, point.y),
                }
            }
            return;
        };

        let outcome = match event {
            PointerEvent::Down(pos) => tool.on_pointer_down(pos, viewport),
            PointerEvent::Move(pos) => {
                tool.on_pointer_move(pos, viewport);
                SelectionOutcome::Pending
            }
            PointerEvent::Up(pos) => tool.on_pointer_up(pos, viewport),
            PointerEvent::Leave => tool.on_pointer_leave(viewport),
        };

        if let SelectionOutcome::Selected(selection) = outcome {
            self.pending = None;
            self.status = None;
            self.start_clip(selection, ctx);
        }
    }

    fn add_pending(&mut self) {
        let (Some(pending), Some(photo)) = (self.pending.take(), self.photo.as_mut()) else {
            return;
        };
        let id = photo.masks.push(pending.selection).id.clone();
        self.highlighted = Some(id);
    }

    fn apply_zoom(&mut self, zoom: ZoomState) {
        if zoom != self.zoom {
            log::debug!("Zoom {}%", zoom.percentage());
        }
        self.zoom = zoom;
    }
}

impl eframe::App for ShelfmaskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background(ctx);

        // Request repaint while work is in flight (to update spinner)
        if self.loading_message.is_some() || self.clipping {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif"])
                            .pick_file()
                        {
                            self.load_image_file(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Zoom In").clicked() {
                        self.apply_zoom(self.zoom.zoom_in());
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.apply_zoom(self.zoom.zoom_out());
                        ui.close_menu();
                    }
                    if ui.button("Reset Zoom").clicked() {
                        self.apply_zoom(self.zoom.reset());
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, self.current_tool, &self.zoom))
            .inner;
        match toolbar_action {
            ToolbarAction::SelectTool(kind) => self.select_tool(kind),
            ToolbarAction::ClearDraft => {
                if let Some(tool) = self.tool.as_mut() {
                    tool.clear();
                }
            }
            ToolbarAction::ZoomIn => self.apply_zoom(self.zoom.zoom_in()),
            ToolbarAction::ZoomOut => self.apply_zoom(self.zoom.zoom_out()),
            ToolbarAction::ResetZoom => self.apply_zoom(self.zoom.reset()),
            ToolbarAction::None => {}
        }

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(260.0)
            .show(ctx, |ui| {
                if self.clipping {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Clipping...");
                    });
                }
                properties::show(
                    ui,
                    self.photo.as_ref().map(|p| &p.masks),
                    self.pending.as_ref(),
                    self.highlighted.as_deref(),
                    self.status.as_deref(),
                )
            })
            .inner;
        match properties_action {
            PropertiesAction::AddPending => self.add_pending(),
            PropertiesAction::DiscardPending => self.pending = None,
            PropertiesAction::Highlight(id) => self.highlighted = Some(id),
            PropertiesAction::Remove(id) => {
                if let Some(photo) = self.photo.as_mut() {
                    if photo.masks.remove(&id).is_some() {
                        log::info!("Removed {}, total: {}", id, photo.masks.len());
                    }
                }
                if self.highlighted.as_deref() == Some(id.as_str()) {
                    self.highlighted = None;
                }
            }
            PropertiesAction::None => {}
        }

        // Escape cancels the draft or clears the highlight
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if let Some(tool) = self.tool.as_mut() {
                tool.cancel();
            }
            self.highlighted = None;
        }

        // Main canvas (center)
        let output = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.spinner();
                            ui.label(egui::RichText::new(message).size(16.0));
                        });
                    });
                    return None;
                }
                let input = CanvasInput {
                    texture: self.photo.as_ref().map(|p| &p.texture),
                    zoom: self.zoom,
                    masks: self
                        .photo
                        .as_ref()
                        .map(|p| p.masks.entries())
                        .unwrap_or(&[]),
                    highlighted: self.highlighted.as_deref(),
                    draft: self
                        .tool
                        .as_ref()
                        .map(|t| t.draft())
                        .unwrap_or(Draft::None),
                    show_hover_hits: self.tool.is_none(),
                    vertex_radius: self.config.vertex_radius as f32,
                };
                Some(canvas::show(ui, &mut self.canvas_state, input))
            })
            .inner;

        let Some(output) = output else {
            return;
        };

        self.zoom = self.zoom.with_container(output.container);
        if output.wheel != 0.0 {
            self.apply_zoom(self.zoom.on_wheel(output.wheel));
        }

        // Pointer events are only meaningful once the viewport is measured.
        if let Some(viewport) = output.viewport {
            for event in output.events {
                self.handle_pointer(event, &viewport, ctx);
            }
        }
    }
}
