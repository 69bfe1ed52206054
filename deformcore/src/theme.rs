//! Visualizer theme
//!
//! White page, black 1px outlines, light grey connectors. Note colors come
//! from the palette; the chrome stays out of their way.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub struct DeformColors;

impl DeformColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const CONNECTOR: Color32 = Color32::from_rgb(226, 226, 226);
    pub const INVALID: Color32 = Color32::from_rgb(211, 43, 81);
}

/// Theme configuration for the visualizer window
pub struct DeformTheme {
    pub font_size_body: f32,
    pub font_size_input: f32,
    pub font_size_small: f32,
    pub outline_width: f32,
    pub connector_width: f32,
}

impl Default for DeformTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_input: 24.0,
            font_size_small: 11.0,
            outline_width: 1.0,
            connector_width: 2.0,
        }
    }
}

impl DeformTheme {
    pub fn outline(&self) -> Stroke {
        Stroke::new(self.outline_width, DeformColors::BLACK)
    }

    pub fn connector(&self) -> Stroke {
        Stroke::new(self.connector_width, DeformColors::CONNECTOR)
    }

    pub fn input_font(&self) -> FontId {
        FontId::new(self.font_size_input, FontFamily::Proportional)
    }

    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, self.input_font()),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();
        visuals.window_fill = DeformColors::WHITE;
        visuals.panel_fill = DeformColors::WHITE;
        visuals.extreme_bg_color = DeformColors::WHITE;
        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = self.outline();
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;
        style.visuals = visuals;

        ctx.set_style(style);
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    let frame_resp = egui::Frame::none()
        .fill(DeformColors::WHITE)
        .stroke(Stroke::new(1.0, DeformColors::BLACK))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner);
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}

/// Strip Cmd+/Cmd- so the keyboard cannot rescale the UI; zoom belongs to
/// the band view. Call at the start of `update()`.
pub fn consume_zoom_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|event| {
            !matches!(event,
                egui::Event::Key { key, modifiers, .. }
                    if modifiers.command && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals))
        });
    });
}
