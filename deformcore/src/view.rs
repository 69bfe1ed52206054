//! Pan/zoom state and the per-session reducer
//!
//! The app feeds raw input (drag deltas, wheel steps, edited text) into
//! [`Session`]; nothing here touches egui, so all of it runs in plain tests.

use crate::color::Rgb;
use crate::encoding::{NoteCounts, DEFAULT_MAX_NOTES};
use crate::error::EncodingError;
use crate::layout::{compute_bands, Layout};

/// Zoom cap; `e^zoom` past this pushes coordinates beyond what f32 can place.
pub const DEFAULT_MAX_ZOOM: u32 = 12;

/// Integer pan offset in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub origin: Offset,
    /// Always within `1..=max_zoom`
    pub zoom: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            origin: Offset::default(),
            zoom: 1,
        }
    }
}

impl ViewState {
    /// Move the origin by a pointer delta. Movement slows down as the view
    /// zooms in: each axis moves by `delta / (1 + zoom / 10)`, truncated.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let damping = 1.0 + f64::from(self.zoom) / 10.0;
        let step = |origin: i32, delta: f32| (f64::from(origin) + f64::from(delta) / damping) as i32;
        self.origin.x = step(self.origin.x, dx);
        self.origin.y = step(self.origin.y, dy);
    }

    /// Apply wheel steps (positive zooms in).
    pub fn scroll(&mut self, steps: i32, max_zoom: u32) {
        let zoom = i64::from(self.zoom) + i64::from(steps);
        self.zoom = zoom.clamp(1, i64::from(max_zoom.max(1))) as u32;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything the user can change during a session.
#[derive(Debug, Clone)]
pub struct Session {
    counts: NoteCounts,
    view: ViewState,
    max_zoom: u32,
    max_notes: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(NoteCounts::default(), DEFAULT_MAX_ZOOM)
    }
}

impl Session {
    pub fn new(counts: NoteCounts, max_zoom: u32) -> Self {
        Self {
            counts,
            view: ViewState::default(),
            max_zoom: max_zoom.max(1),
            max_notes: DEFAULT_MAX_NOTES,
        }
    }

    /// Cap on notes per band for text submitted later.
    pub fn with_max_notes(mut self, max_notes: u32) -> Self {
        self.max_notes = max_notes.max(1);
        self
    }

    pub fn counts(&self) -> &NoteCounts {
        &self.counts
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Replace the sequence. A different sequence resets the view; returns
    /// whether anything changed.
    pub fn set_counts(&mut self, counts: NoteCounts) -> bool {
        if counts == self.counts {
            return false;
        }
        log::info!("note counts changed: {} -> {}", self.counts, counts);
        self.counts = counts;
        self.view.reset();
        true
    }

    /// Try the user's edited text. Invalid text leaves the session as it was.
    pub fn submit_text(&mut self, text: &str) -> Result<bool, EncodingError> {
        match NoteCounts::parse_with_limit(text, self.max_notes) {
            Ok(counts) => Ok(self.set_counts(counts)),
            Err(e) => {
                log::warn!("invalid encoding input {:?}: {}", text, e);
                Err(e)
            }
        }
    }

    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.view.drag(dx, dy);
    }

    pub fn scroll(&mut self, steps: i32) {
        self.view.scroll(steps, self.max_zoom);
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    /// Layout of the current state for a drawing area `window_width` wide.
    pub fn layout(&self, window_width: f64, palette: &[Rgb]) -> Layout {
        compute_bands(&self.counts, window_width, self.view.zoom, self.view.origin, palette)
    }
}
