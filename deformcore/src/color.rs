//! RGB colors with real-valued channels
//!
//! Shade and tint math runs on `f32` channels so repeated blending does not
//! accumulate rounding; `clamped()` brings a color back into [0, 255].

use crate::error::ColorError;
use egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(f32::from)
                .map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Darker variant: every channel scaled by `1 - 0.1 * percent`.
    pub fn shade(self, percent: f32) -> Self {
        self.map(|c| c * (1.0 - 0.1 * percent))
    }

    /// Lighter variant: every channel moved toward 255 by `0.1 * percent`.
    pub fn tint(self, percent: f32) -> Self {
        self.map(|c| c + (255.0 - c) * percent * 0.1)
    }

    pub fn clamped(self) -> Self {
        self.map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 255.0) })
    }

    pub fn is_white(&self) -> bool {
        *self == Self::WHITE
    }

    pub fn to_color32(self) -> Color32 {
        let c = self.clamped();
        Color32::from_rgb(c.r.round() as u8, c.g.round() as u8, c.b.round() as u8)
    }
}

impl From<Rgb> for Color32 {
    fn from(color: Rgb) -> Self {
        color.to_color32()
    }
}
