// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map canvas.
//!
//! This module paints the background map stretched over the whole canvas
//! with the pins on top, reports size changes, and turns pointer input on
//! pins into drag actions. Positions handed out are canvas coordinates
//! (points from the canvas top-left).

use crate::annotator::MapAnnotator;
use crate::models::{
    entry::EntryId,
    pin::{CanvasSize, Pin, Point},
};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    Resized(CanvasSize),
    PressPin(EntryId, Point),
    DragTo(Point),
    Release,
}

/// Display the canvas and handle pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    annotator: &MapAnnotator,
    background: &Option<egui::TextureHandle>,
) -> CanvasAction {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
    if let Some(texture) = background {
        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    for pin in annotator.entries().iter().filter_map(|e| e.pin.as_ref()) {
        draw_pin(&painter, pin, rect.min);
    }

    let size = CanvasSize::new(rect.width() as f64, rect.height() as f64);
    if size_changed(annotator.canvas_size(), size) {
        return CanvasAction::Resized(size);
    }

    let to_canvas = |pos: egui::Pos2| Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
    let dragging = annotator.dragging().is_some();

    if let Some(pos) = response.hover_pos() {
        if dragging {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if annotator.pin_at(to_canvas(pos)).is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
    }

    if response.drag_started_by(egui::PointerButton::Primary) {
        // the press point, not where the pointer crossed the drag threshold
        if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
            let point = to_canvas(origin);
            if let Some(id) = annotator.pin_at(point) {
                return CanvasAction::PressPin(id, point);
            }
        }
    } else if dragging && response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            return CanvasAction::DragTo(to_canvas(pos));
        }
    } else if dragging && response.drag_stopped() {
        return CanvasAction::Release;
    }

    CanvasAction::None
}

fn size_changed(current: CanvasSize, measured: CanvasSize) -> bool {
    (current.width - measured.width).abs() > 0.5 || (current.height - measured.height).abs() > 0.5
}

/// Draw a pin offset by the canvas origin.
fn draw_pin(painter: &egui::Painter, pin: &Pin, origin: egui::Pos2) {
    let points = pin
        .vertices()
        .iter()
        .map(|v| egui::pos2(origin.x + v.x as f32, origin.y + v.y as f32))
        .collect();

    painter.add(egui::Shape::convex_polygon(
        points,
        pin.fill.to_color32(),
        egui::Stroke::new(1.0, egui::Color32::BLACK),
    ));
}
