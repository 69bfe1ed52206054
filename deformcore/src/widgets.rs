//! Widgets shared by the visualizer window

use crate::theme::{DeformColors, DeformTheme};
use egui::{Response, Ui};

/// Status bar: white bg, 1px black top border
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(DeformColors::WHITE)
        .stroke(egui::Stroke::new(1.0, DeformColors::BLACK))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

/// Single-line editor for the note-count sequence.
///
/// The frame turns red while the text does not parse; the caller decides
/// what to keep.
pub fn encoding_input(ui: &mut Ui, theme: &DeformTheme, text: &mut String, valid: bool) -> Response {
    let stroke_color = if valid { DeformColors::BLACK } else { DeformColors::INVALID };
    egui::Frame::none()
        .fill(DeformColors::WHITE)
        .stroke(egui::Stroke::new(1.0, stroke_color))
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(text)
                    .font(theme.input_font())
                    .frame(false)
                    .hint_text("4, 7")
                    .desired_width(320.0),
            )
        })
        .inner
}
