// ============================================================================
// OBSCURA APP — egui shell around the headless editor session
// ============================================================================
//
// Everything here is presentation plumbing: dialogs, toolbar, texture upload,
// pointer plumbing. All editing semantics live behind `EditorSession`.

use eframe::egui;
use egui::{Color32, Pos2, Rect, Sense, TextureOptions, pos2};
use std::fs;

use obscura::io::{pick_export_path, pick_open_path};
use obscura::regions::{MAX_BLUR_STRENGTH, MIN_BLUR_STRENGTH};
use obscura::{EditorSession, ExportFormat, PointerKind, log_err, log_info};

pub struct ObscuraApp {
    session: EditorSession,
    /// GPU texture holding the latest composite; rebuilt when dirty.
    texture: Option<egui::TextureHandle>,
    texture_dirty: bool,
    /// Last user-visible status or error line.
    status: String,
}

impl ObscuraApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            session: EditorSession::new(),
            texture: None,
            texture_dirty: false,
            status: "Open an image to start".to_string(),
        }
    }

    fn open_image(&mut self) {
        let Some(path) = pick_open_path() else { return };
        match fs::read(&path) {
            Ok(bytes) => match self.session.load_image(&bytes) {
                Ok(()) => {
                    let (w, h) = self.session.dimensions().unwrap_or((0, 0));
                    self.status = format!("{} — {}×{}", path.display(), w, h);
                    self.texture_dirty = true;
                }
                Err(e) => {
                    // Decode failure keeps the prior session intact.
                    log_err!("Failed to decode {}: {}", path.display(), e);
                    self.status = format!("Could not decode {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                log_err!("Failed to read {}: {}", path.display(), e);
                self.status = format!("Could not read {}: {}", path.display(), e);
            }
        }
    }

    fn export_image(&mut self, format: ExportFormat) {
        let Some(path) = pick_export_path(format) else { return };
        match self.session.export(format) {
            Ok(payload) => match fs::write(&path, payload) {
                Ok(()) => {
                    log_info!("Exported {} to {}", format.label(), path.display());
                    self.status = format!("Exported {}", path.display());
                }
                Err(e) => {
                    log_err!("Failed to write {}: {}", path.display(), e);
                    self.status = format!("Could not write {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                log_err!("{} export failed: {}", format.label(), e);
                self.status = format!("Export failed: {}", e);
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open…").clicked() {
                self.open_image();
            }
            ui.separator();

            let can_undo = self.session.can_undo();
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() && self.session.undo()
            {
                self.texture_dirty = true;
            }
            let can_redo = self.session.can_redo();
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() && self.session.redo()
            {
                self.texture_dirty = true;
            }
            if ui
                .add_enabled(self.session.has_image(), egui::Button::new("Reset"))
                .clicked()
            {
                self.session.reset();
                self.texture_dirty = true;
            }
            ui.separator();

            if ui.button("Zoom −").clicked() {
                self.session.zoom_out();
            }
            if ui.button("Zoom +").clicked() {
                self.session.zoom_in();
            }
            if ui.button("Fit").clicked() {
                self.session.reset_zoom();
            }
            ui.label(format!("{:.0}%", self.session.viewport().zoom() * 100.0));
            ui.separator();

            let mut strength = self.session.blur_strength();
            let slider = egui::Slider::new(&mut strength, MIN_BLUR_STRENGTH..=MAX_BLUR_STRENGTH)
                .text("Blur");
            if ui.add(slider).changed() {
                self.session.set_blur_strength(strength);
                self.texture_dirty = true;
            }
            ui.separator();

            let has_image = self.session.has_image();
            if ui
                .add_enabled(has_image, egui::Button::new("Export PNG"))
                .clicked()
            {
                self.export_image(ExportFormat::Png);
            }
            if ui
                .add_enabled(has_image, egui::Button::new("Export JPEG"))
                .clicked()
            {
                self.export_image(ExportFormat::Jpeg);
            }
        });
    }

    /// Feed pointer events for the canvas rect into the session. Display
    /// positions are relative to the canvas's top-left corner; the session
    /// maps them into image space.
    fn handle_pointer(&mut self, ctx: &egui::Context, response: &egui::Response, rect: Rect) {
        let local = |pos: Pos2| pos2(pos.x - rect.min.x, pos.y - rect.min.y);
        let pointer = ctx.input(|i| i.pointer.interact_pos());

        if response.drag_started() {
            if let Some(pos) = pointer {
                self.session.pointer(PointerKind::Down, local(pos));
                self.texture_dirty = true;
            }
        } else if self.session.is_dragging() {
            match pointer {
                Some(pos) if !rect.contains(pos) => {
                    // Left the canvas mid-drag: finalize at the last
                    // position rather than leaving a stuck selection.
                    self.session.pointer(PointerKind::Leave, local(pos));
                    self.texture_dirty = true;
                }
                Some(pos) if response.dragged() => {
                    self.session.pointer(PointerKind::Move, local(pos));
                    self.texture_dirty = true;
                }
                _ => {}
            }
            if response.drag_released() && self.session.is_dragging() {
                let pos = pointer.map(local).unwrap_or(pos2(0.0, 0.0));
                self.session.pointer(PointerKind::Up, pos);
                self.texture_dirty = true;
            }
        }
    }

    /// Re-upload the composite texture if any state changed this frame.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if !self.texture_dirty {
            return;
        }
        self.texture_dirty = false;
        match self.session.composite() {
            Some(composite) => {
                let size = [composite.width() as usize, composite.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, composite.as_raw());
                match &mut self.texture {
                    Some(tex) => tex.set(color_image, TextureOptions::LINEAR),
                    None => {
                        self.texture =
                            Some(ctx.load_texture("composite", color_image, TextureOptions::LINEAR));
                    }
                }
            }
            None => self.texture = None,
        }
    }
}

impl eframe::App for ObscuraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                if self.session.has_image() {
                    ui.separator();
                    ui.label(format!("{} blur region(s)", self.session.region_count()));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.session.has_image() {
                ui.centered_and_justified(|ui| {
                    ui.label("No image loaded — use Open… to pick one");
                });
                return;
            }

            // Aspect-fit into whatever space the panel currently has; zoom
            // scales the displayed size only, never the raster.
            let container = ui.available_size();
            self.session.fit(container);
            let display_size = self.session.display_size().unwrap_or(container);

            egui::ScrollArea::both().show(ui, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(display_size, Sense::click_and_drag());
                self.handle_pointer(ctx, &response, rect);
                self.refresh_texture(ctx);

                if let Some(texture) = &self.texture {
                    ui.painter().image(
                        texture.id(),
                        rect,
                        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
                response.on_hover_cursor(egui::CursorIcon::Crosshair);
            });
        });
    }
}
