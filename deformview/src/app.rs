//! Main window: encoding input, band canvas, status bar.

use deformcore::layout::Layout;
use deformcore::theme::{consume_zoom_keys, menu_bar, DeformColors};
use deformcore::widgets::{encoding_input, status_bar};
use deformcore::{DeformTheme, PaletteCache, Session, VisualizerConfig};
use egui::{Context, Key, Rect, Sense, Vec2};

/// Scroll distance (points) counted as one wheel notch.
const SCROLL_STEP: f32 = 50.0;

pub struct DeformViewApp {
    session: Session,
    palette: PaletteCache,
    theme: DeformTheme,
    /// Text as typed; may be invalid
    input: String,
    input_error: Option<String>,
    scroll_accum: f32,
    blank_notes: usize,
    show_about: bool,
}

impl DeformViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, theme: DeformTheme, config: VisualizerConfig) -> Self {
        let counts = config.note_counts().unwrap_or_else(|e| {
            log::warn!("bad starting notes, using the default: {}", e);
            Default::default()
        });
        Self {
            input: counts.to_string(),
            session: Session::new(counts, config.max_zoom).with_max_notes(config.max_notes),
            palette: PaletteCache::new(),
            theme,
            input_error: None,
            scroll_accum: 0.0,
            blank_notes: 0,
            show_about: false,
        }
    }

    fn apply_input(&mut self) {
        match self.session.submit_text(&self.input) {
            Ok(_) => self.input_error = None,
            Err(e) => self.input_error = Some(e.to_string()),
        }
    }

    /// Turn accumulated wheel movement into whole zoom steps.
    fn take_scroll_steps(&mut self, delta: f32) -> i32 {
        self.scroll_accum += delta;
        let steps = (self.scroll_accum / SCROLL_STEP).trunc();
        self.scroll_accum -= steps * SCROLL_STEP;
        steps as i32
    }

    fn paint(&self, painter: &egui::Painter, canvas: Rect, layout: &Layout) {
        let offset = canvas.min.to_vec2();
        let outline = self.theme.outline();
        let connector = self.theme.connector();

        let visible = |x: f64| {
            let x = x as f32 + offset.x;
            x >= canvas.left() && x <= canvas.right()
        };
        for (a, b) in layout
            .connectors
            .iter()
            .filter(|c| visible(c.start.x))
            .flat_map(|c| c.dashes())
        {
            painter.line_segment([a.to_pos2() + offset, b.to_pos2() + offset], connector);
        }

        for band in &layout.bands {
            for note in &band.notes {
                let rect = note.rect.to_egui().translate(offset);
                if !rect.intersects(canvas) {
                    continue;
                }
                painter.rect_filled(rect, 0.0, note.color.to_color32());
                if band.outlined {
                    painter.rect_stroke(rect, 0.0, outline);
                }
            }
        }
    }
}

impl eframe::App for DeformViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        consume_zoom_keys(ctx);

        let text_focused = ctx.memory(|m| m.focused().is_some());
        ctx.input(|i| {
            if i.key_pressed(Key::Escape) && !text_focused {
                self.session.reset_view();
            }
        });

        // Menu bar
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            menu_bar(ui, |ui| {
                ui.menu_button("view", |ui| {
                    if ui.button("zoom in").clicked() {
                        self.session.scroll(1);
                        ui.close_menu();
                    }
                    if ui.button("zoom out").clicked() {
                        self.session.scroll(-1);
                        ui.close_menu();
                    }
                    if ui.button("reset view   esc").clicked() {
                        self.session.reset_view();
                        ui.close_menu();
                    }
                });
                ui.menu_button("help", |ui| {
                    if ui.button("about").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Encoding input
        egui::TopBottomPanel::top("encoding").show(ctx, |ui| {
            ui.add_space(4.0);
            let valid = self.input_error.is_none();
            let response = encoding_input(ui, &self.theme, &mut self.input, valid);
            if response.changed() {
                self.apply_input();
            }
            ui.add_space(4.0);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let view = self.session.view();
            let status = match &self.input_error {
                Some(err) => format!("{}  |  showing {}", err, self.session.counts()),
                None => format!(
                    "{}  |  zoom {}  |  origin {}, {}  |  {} blank note(s)",
                    self.session.counts(),
                    view.zoom,
                    view.origin.x,
                    view.origin.y,
                    self.blank_notes
                ),
            };
            status_bar(ui, &status);
        });

        // Band canvas
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(DeformColors::WHITE))
            .show(ctx, |ui| {
                let canvas = ui.available_rect_before_wrap();
                let response = ui.allocate_rect(canvas, Sense::drag());

                if response.dragged() {
                    let delta = response.drag_delta();
                    self.session.drag(delta.x, delta.y);
                }
                if response.hovered() {
                    let scroll = ui.input(|i| i.raw_scroll_delta);
                    if scroll != Vec2::ZERO {
                        let steps = self.take_scroll_steps(scroll.y);
                        if steps != 0 {
                            self.session.scroll(steps);
                        }
                    }
                }

                let base = self.session.counts().base() as usize;
                let palette = self.palette.get(base);
                let layout = self.session.layout(f64::from(canvas.width()), palette);
                self.blank_notes = layout.blank_count();

                let painter = ui.painter_at(canvas);
                self.paint(&painter, canvas, &layout);
            });

        // About dialog
        if self.show_about {
            egui::Window::new("about deformview")
                .collapsible(false)
                .resizable(false)
                .default_width(300.0)
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("deformview");
                        ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        ui.label("visualizer for the deformed music problem");
                    });
                    ui.add_space(8.0);
                    ui.separator();
                    ui.label("type note counts, coarsest band first: 4, 7");
                    ui.label("white notes sit exactly on a boundary above");
                    ui.add_space(4.0);
                    ui.label("controls:");
                    ui.label("  drag: pan");
                    ui.label("  scroll: zoom");
                    ui.label("  esc: reset view");
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("ok").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
