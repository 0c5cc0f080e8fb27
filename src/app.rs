// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the application structure that implements the
//! eframe::App trait. It owns the background texture and the color dialog,
//! and routes panel actions into the `MapAnnotator`.

use crate::annotator::{MapAnnotator, PIN_RETRY_INTERVAL};
use crate::config::AppConfig;
use crate::io::{media::MapImage, serialization};
use crate::models::pin::CanvasSize;
use crate::ui::{
    canvas,
    color_dialog::{ColorDialog, ColorDialogOutcome},
    entry_list,
};

/// Export formats offered in the File menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Json,
    Yaml,
}

/// Main application state.
pub struct PinmapApp {
    config: AppConfig,

    /// Entry registry and pins
    annotator: MapAnnotator,

    /// Full resolution map
    map: MapImage,

    /// Map resampled to the current canvas
    background: Option<egui::TextureHandle>,

    /// Text of the "new entry" field
    new_entry_text: String,

    /// Open color picker, if any
    color_dialog: Option<ColorDialog>,

    /// Set once the shutdown checkpoint has been written
    saved_on_close: bool,
}

impl PinmapApp {
    pub fn new(config: AppConfig, annotator: MapAnnotator, map: MapImage) -> Self {
        Self {
            config,
            annotator,
            map,
            background: None,
            new_entry_text: String::new(),
            color_dialog: None,
            saved_on_close: false,
        }
    }

    /// Resample the map for a new canvas size and move the pins.
    fn resize_background(&mut self, ctx: &egui::Context, size: CanvasSize) {
        if !self.annotator.resize_background(size.width, size.height) {
            return;
        }

        // resample at physical resolution so the map stays sharp on HiDPI
        let pixels_per_point = ctx.pixels_per_point() as f64;
        let width = (size.width * pixels_per_point).round() as u32;
        let height = (size.height * pixels_per_point).round() as u32;
        let resampled = self.map.resample(width, height);
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [resampled.width as usize, resampled.height as usize],
            &resampled.pixels,
        );

        match &mut self.background {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.background =
                    Some(ctx.load_texture("map_background", image, egui::TextureOptions::LINEAR));
            }
        }
        log::debug!("Resized canvas to {:.0}x{:.0}", size.width, size.height);
    }

    fn handle_list_action(&mut self, action: entry_list::ListAction) {
        match action {
            entry_list::ListAction::Add(text) => {
                if self.annotator.add_entry(&text, true, None, None).is_some() {
                    self.new_entry_text.clear();
                }
            }
            entry_list::ListAction::ToggleVisibility(id) => {
                self.annotator.toggle_visibility(id);
            }
            entry_list::ListAction::PickColor(id) => {
                if let Some(entry) = self.annotator.entry(id) {
                    self.color_dialog = Some(ColorDialog::new(id, entry.color));
                }
            }
            entry_list::ListAction::Remove(id) => {
                if self.color_dialog.as_ref().is_some_and(|d| d.entry() == id) {
                    self.color_dialog = None;
                }
                self.annotator.remove_entry(id);
            }
            entry_list::ListAction::None => {}
        }
    }

    /// Export the current entries to a file.
    fn export_entries(&self, format: ExportFormat) {
        let (name, extensions, file_name) = match format {
            ExportFormat::Json => ("JSON", vec!["json"], "pins.json"),
            ExportFormat::Yaml => ("YAML", vec!["yaml", "yml"], "pins.yaml"),
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter(name, &extensions)
            .set_file_name(file_name)
            .save_file()
        else {
            return;
        };

        let state = self.annotator.save_state();
        let result = match format {
            ExportFormat::Json => serialization::export_json(&state, &path),
            ExportFormat::Yaml => serialization::export_yaml(&state, &path),
        };

        match result {
            Ok(_) => log::info!("Exported {} entries to {}", state.entries.len(), path.display()),
            Err(e) => log::error!("Failed to export entries: {:#}", e),
        }
    }
}

impl eframe::App for PinmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Final checkpoint before the window goes away
        if ctx.input(|i| i.viewport().close_requested()) && !self.saved_on_close {
            self.annotator.checkpoint();
            self.saved_on_close = true;
            log::info!("Saved state on close");
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save").clicked() {
                        self.annotator.checkpoint();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Export as JSON...").clicked() {
                        self.export_entries(ExportFormat::Json);
                        ui.close_menu();
                    }
                    if ui.button("Export as YAML...").clicked() {
                        self.export_entries(ExportFormat::Yaml);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Status line
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let entries = self.annotator.entries();
            let shown = entries.iter().filter(|e| e.is_rendered()).count();
            ui.horizontal(|ui| {
                ui.label(format!("{} entries, {} pins shown", entries.len(), shown));
                ui.separator();
                let size = self.annotator.canvas_size();
                ui.label(format!("Map {:.0}x{:.0}", size.width, size.height));
                if let Some(id) = self.annotator.dragging() {
                    if let Some(entry) = self.annotator.entry(id) {
                        ui.separator();
                        ui.label(format!("Moving {}", entry.text));
                    }
                }
            });
        });

        // Entry list (left side)
        let list_action = egui::SidePanel::left("entries")
            .default_width(self.config.list_panel_width)
            .resizable(true)
            .show(ctx, |ui| entry_list::show(ui, self.annotator.entries(), &mut self.new_entry_text))
            .inner;
        self.handle_list_action(list_action);

        // Color picker
        if let Some(dialog) = self.color_dialog.as_mut() {
            match dialog.show(ctx) {
                ColorDialogOutcome::Picked(color) => {
                    let id = dialog.entry();
                    self.annotator.set_color(id, color);
                    self.color_dialog = None;
                }
                ColorDialogOutcome::Cancelled => self.color_dialog = None,
                ColorDialogOutcome::Open => {}
            }
        }

        // Map canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| canvas::show(ui, &self.annotator, &self.background))
            .inner;

        match canvas_action {
            canvas::CanvasAction::Resized(size) => {
                self.resize_background(ctx, size);
                ctx.request_repaint();
            }
            canvas::CanvasAction::PressPin(id, point) => {
                self.annotator.begin_drag(id, point);
            }
            canvas::CanvasAction::DragTo(point) => {
                self.annotator.drag_to(point);
                ctx.request_repaint();
            }
            canvas::CanvasAction::Release => {
                self.annotator.end_drag();
            }
            canvas::CanvasAction::None => {}
        }

        // Deferred pin creation
        if self.annotator.process_pending() > 0 {
            ctx.request_repaint();
        }
        if self.annotator.has_pending() {
            ctx.request_repaint_after(PIN_RETRY_INTERVAL);
        }
    }
}
