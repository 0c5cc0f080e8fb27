// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Entry list panel.
//!
//! This module provides the left-hand panel: a text field to add entries
//! and one row per entry with a visibility checkbox, a color swatch and
//! the label. Right-clicking a row offers removal.

use crate::models::entry::{Entry, EntryId};

/// Result of list panel interaction.
pub enum ListAction {
    None,
    Add(String),
    ToggleVisibility(EntryId),
    PickColor(EntryId),
    Remove(EntryId),
}

/// Display the entry list and collect the user's action.
pub fn show(ui: &mut egui::Ui, entries: &[Entry], new_text: &mut String) -> ListAction {
    let mut action = ListAction::None;

    let input = ui.add(
        egui::TextEdit::singleline(new_text)
            .hint_text("New entry")
            .desired_width(f32::INFINITY),
    );
    let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    let add_clicked = ui
        .add(egui::Button::new("Add").min_size(egui::vec2(ui.available_width(), 0.0)))
        .clicked();
    if submitted || add_clicked {
        action = ListAction::Add(new_text.clone());
    }

    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if entries.is_empty() {
                ui.label(egui::RichText::new("No entries yet").weak());
            }

            for entry in entries {
                if let Some(row_action) = show_row(ui, entry) {
                    action = row_action;
                }
            }
        });

    action
}

fn show_row(ui: &mut egui::Ui, entry: &Entry) -> Option<ListAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        let mut visible = entry.visible;
        let checkbox = ui.checkbox(&mut visible, "");
        if checkbox.changed() {
            action = Some(ListAction::ToggleVisibility(entry.id()));
        }

        let swatch = ui
            .add(
                egui::Button::new("")
                    .fill(entry.color.to_color32())
                    .min_size(egui::vec2(18.0, 18.0)),
            )
            .on_hover_text(entry.color.to_string());
        if swatch.clicked() {
            action = Some(ListAction::PickColor(entry.id()));
        }

        let label = ui.add(egui::Label::new(entry.text.as_str()).sense(egui::Sense::click()));

        for response in [checkbox, swatch, label] {
            response.context_menu(|ui| {
                if ui.button("Remove").clicked() {
                    action = Some(ListAction::Remove(entry.id()));
                    ui.close_menu();
                }
            });
        }
    });

    action
}
