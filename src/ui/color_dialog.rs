// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pin color picker window.

use crate::models::{color::HexColor, entry::EntryId};

/// What the user did with the dialog this frame.
pub enum ColorDialogOutcome {
    Open,
    Picked(HexColor),
    Cancelled,
}

/// A color picker for one entry. Nothing changes until the user confirms.
pub struct ColorDialog {
    entry: EntryId,
    color: egui::Color32,
}

impl ColorDialog {
    pub fn new(entry: EntryId, initial: HexColor) -> Self {
        Self {
            entry,
            color: initial.to_color32(),
        }
    }

    pub fn entry(&self) -> EntryId {
        self.entry
    }

    pub fn show(&mut self, ctx: &egui::Context) -> ColorDialogOutcome {
        let mut outcome = ColorDialogOutcome::Open;
        let mut open = true;

        egui::Window::new("Choose pin color")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::color_picker::color_picker_color32(
                    ui,
                    &mut self.color,
                    egui::color_picker::Alpha::Opaque,
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        outcome = ColorDialogOutcome::Picked(HexColor::from_color32(self.color));
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = ColorDialogOutcome::Cancelled;
                    }
                });
            });

        if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            outcome = ColorDialogOutcome::Cancelled;
        }
        outcome
    }
}
