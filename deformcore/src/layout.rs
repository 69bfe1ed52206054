//! Band layout engine
//!
//! Turns a note-count sequence into stacked bands of equal-width notes. The
//! first band takes its colors from the palette; every later band inherits
//! colors from the band right above it: a note whose center falls inside a
//! note of the previous band takes that note's color, and a note whose center
//! lands exactly on a boundary between two previous notes is left white.
//!
//! All bands share the same total width, so whether a center sits on a
//! boundary depends only on the two note counts. It is decided with integer
//! arithmetic; pixel coordinates are only used for drawing.

use crate::color::Rgb;
use crate::encoding::NoteCounts;
use crate::view::Offset;

/// Band width at zoom 0, scaled by `floor(e^zoom)`.
pub const BASE_BAND_WIDTH: f64 = 420.0;
/// Vertical unit per zoom step; a note is half of it.
pub const BASE_NOTE_HEIGHT: f64 = 120.0;
/// Subtracted from the note height unit to get the band spacing.
pub const BAND_MARGIN_OFFSET: f64 = 35.0;
/// Connector dash length per zoom step.
pub const DASH_LENGTH: f64 = 4.0;
/// Bands with at least this many notes are drawn without outlines.
pub const OUTLINE_CUTOFF: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x as f32, self.y as f32)
    }

    fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

/// Pixel-space rectangle of one note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NoteRect {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn to_egui(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.x as f32, self.y as f32),
            egui::vec2(self.width as f32, self.height as f32),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub rect: NoteRect,
    pub color: Rgb,
}

/// One row of notes at a single resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub note_count: u32,
    pub notes: Vec<Note>,
    /// False for very dense bands, where outlines would hide the colors.
    pub outlined: bool,
}

impl Band {
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.notes.iter().map(|n| n.color)
    }

    /// Notes drawn white, either by boundary alignment or inherited from a
    /// white note above.
    pub fn blank_count(&self) -> usize {
        self.notes.iter().filter(|n| n.color.is_white()).count()
    }
}

/// Dashed guide from the bottom of one band down to a note of the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub start: Point,
    pub end: Point,
    pub dash_length: f64,
}

impl Connector {
    /// Split the connector into the segments actually drawn.
    ///
    /// The line is cut into `floor(length / dash_length)` evenly spaced knots
    /// and every other interval between knots is kept.
    pub fn dashes(&self) -> Vec<(Point, Point)> {
        let length = ((self.end.x - self.start.x).powi(2) + (self.end.y - self.start.y).powi(2)).sqrt();
        if self.dash_length <= 0.0 || !length.is_finite() {
            return Vec::new();
        }
        let knots = (length / self.dash_length).floor() as usize;
        if knots < 2 {
            return Vec::new();
        }
        let knot = |i: usize| self.start.lerp(self.end, i as f64 / (knots - 1) as f64);
        (0..knots - 1).step_by(2).map(|i| (knot(i), knot(i + 1))).collect()
    }
}

/// Everything drawn for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub bands: Vec<Band>,
    pub connectors: Vec<Connector>,
}

impl Layout {
    pub fn blank_count(&self) -> usize {
        self.bands.iter().skip(1).map(Band::blank_count).sum()
    }
}

/// Placement shared by every band of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandGeometry {
    pub band_width: f64,
    pub x_pad: f64,
    pub note_height: f64,
    pub first_top: f64,
    pub band_margin: f64,
    pub dash_length: f64,
}

impl BandGeometry {
    pub fn new(window_width: f64, zoom: u32, origin: Offset) -> Self {
        let zoom = zoom.max(1);
        let scale = f64::from(zoom);
        let band_width = BASE_BAND_WIDTH * scale.exp().floor();
        let base_note_height = BASE_NOTE_HEIGHT * scale;
        let note_height = base_note_height / 2.0;
        Self {
            band_width,
            x_pad: (window_width - band_width) / 2.0 + f64::from(origin.x),
            note_height,
            first_top: f64::from(origin.y) * scale + note_height,
            band_margin: base_note_height - BAND_MARGIN_OFFSET,
            dash_length: DASH_LENGTH * scale,
        }
    }

    pub fn band_top(&self, index: usize) -> f64 {
        self.first_top + index as f64 * self.band_margin
    }

    fn note_rect(&self, band_index: usize, note_count: u32, k: u32) -> NoteRect {
        let width = self.band_width / f64::from(note_count);
        NoteRect {
            x: self.x_pad + f64::from(k) * width,
            y: self.band_top(band_index),
            width,
            height: self.note_height,
        }
    }
}

/// Where the center of a note falls relative to the band above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// Strictly inside the previous note with this index
    Inside(usize),
    /// Exactly on a boundary between two previous notes
    Boundary,
}

/// Locate note `k` of an `note_count`-note band inside a band of
/// `previous_count` notes of the same total width.
///
/// The center sits at `(2k + 1) / (2 * note_count)` of the width and the
/// previous notes are `1 / previous_count` wide, so the parent index is
/// `floor((2k + 1) * previous_count / (2 * note_count))` and the remainder of
/// that division is zero exactly on a boundary.
pub fn parent_of(k: u32, note_count: u32, previous_count: u32) -> Parent {
    let numerator = (2 * u128::from(k) + 1) * u128::from(previous_count);
    let denominator = 2 * u128::from(note_count);
    if numerator % denominator == 0 {
        Parent::Boundary
    } else {
        Parent::Inside((numerator / denominator) as usize)
    }
}

/// Lay out a flat band colored straight from `palette`.
///
/// Notes beyond the end of the palette are drawn white.
pub fn base_band(note_count: u32, band_index: usize, geometry: &BandGeometry, palette: &[Rgb]) -> Band {
    let notes = (0..note_count)
        .map(|k| Note {
            rect: geometry.note_rect(band_index, note_count, k),
            color: palette.get(k as usize).copied().unwrap_or(Rgb::WHITE),
        })
        .collect();
    Band {
        note_count,
        notes,
        outlined: note_count < OUTLINE_CUTOFF,
    }
}

/// Lay out band `band_index` below `previous`, inheriting its colors.
fn derived_band(
    previous: &Band,
    note_count: u32,
    band_index: usize,
    geometry: &BandGeometry,
) -> (Band, Vec<Connector>) {
    let parent_bottom = geometry.band_top(band_index - 1) + geometry.note_height;
    let mut notes = Vec::with_capacity(note_count as usize);
    let mut connectors = Vec::with_capacity(note_count as usize);

    for k in 0..note_count {
        let rect = geometry.note_rect(band_index, note_count, k);
        let parent = parent_of(k, note_count, previous.note_count);
        let color = match parent {
            Parent::Boundary => Rgb::WHITE,
            Parent::Inside(index) => previous
                .notes
                .get(index)
                .map(|n| n.color)
                .unwrap_or(Rgb::WHITE),
        };
        log::trace!(
            "band {} note {}: center {:.3}, parent {:?}, color {:?}",
            band_index,
            k,
            rect.center_x() - geometry.x_pad,
            parent,
            color
        );

        connectors.push(Connector {
            start: Point::new(rect.center_x(), parent_bottom),
            // one pixel short so the dash does not cover the outline
            end: Point::new(rect.center_x(), rect.y - 1.0),
            dash_length: geometry.dash_length,
        });
        notes.push(Note { rect, color });
    }

    let band = Band {
        note_count,
        notes,
        outlined: note_count < OUTLINE_CUTOFF,
    };
    log::debug!(
        "band {}: {} notes, {} blank",
        band_index,
        note_count,
        band.blank_count()
    );
    (band, connectors)
}

/// Compute every band and connector for one frame.
///
/// Pure: identical arguments give identical output.
pub fn compute_bands(
    counts: &NoteCounts,
    window_width: f64,
    zoom: u32,
    origin: Offset,
    palette: &[Rgb],
) -> Layout {
    let geometry = BandGeometry::new(window_width, zoom, origin);
    let base = base_band(counts.base(), 0, &geometry, palette);

    let (mut bands, connectors, last) = counts.iter().enumerate().skip(1).fold(
        (Vec::with_capacity(counts.len()), Vec::new(), base),
        |(mut bands, mut connectors, previous), (band_index, note_count)| {
            let (band, links) = derived_band(&previous, note_count, band_index, &geometry);
            bands.push(previous);
            connectors.extend(links);
            (bands, connectors, band)
        },
    );
    bands.push(last);

    Layout { bands, connectors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::generate_palette;

    const WIDTH: f64 = 1240.0;

    fn counts(values: &[u32]) -> NoteCounts {
        NoteCounts::new(values.to_vec()).unwrap()
    }

    fn layout(values: &[u32]) -> Layout {
        let counts = counts(values);
        let palette = generate_palette(counts.base() as usize);
        compute_bands(&counts, WIDTH, 1, Offset::default(), &palette)
    }

    #[test]
    fn test_single_band_geometry() {
        let layout = layout(&[4]);
        assert_eq!(layout.bands.len(), 1);
        assert!(layout.connectors.is_empty());

        let band = &layout.bands[0];
        // 420 * floor(e) = 840, centered in 1240
        let xs: Vec<f64> = band.notes.iter().map(|n| n.rect.x).collect();
        assert_eq!(xs, vec![200.0, 410.0, 620.0, 830.0]);
        assert!(band.notes.iter().all(|n| n.rect.width == 210.0));
        assert!(band.notes.iter().all(|n| n.rect.y == 60.0 && n.rect.height == 60.0));
        let palette = generate_palette(4);
        assert_eq!(band.colors().collect::<Vec<_>>(), palette);
    }

    #[test]
    fn test_four_to_seven() {
        let layout = layout(&[4, 7]);
        let palette = generate_palette(4);
        let second: Vec<Rgb> = layout.bands[1].colors().collect();
        let expected = vec![
            palette[0],
            palette[0],
            palette[1],
            Rgb::WHITE,
            palette[2],
            palette[3],
            palette[3],
        ];
        assert_eq!(second, expected);
        assert_eq!(layout.bands[1].blank_count(), 1);
        assert_eq!(layout.blank_count(), 1);
    }

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of(3, 7, 4), Parent::Boundary);
        assert_eq!(parent_of(2, 7, 4), Parent::Inside(1));
        // a coarser band below: both centers sit on boundaries of the 4-band
        assert_eq!(parent_of(0, 2, 4), Parent::Boundary);
        assert_eq!(parent_of(1, 2, 4), Parent::Boundary);
        assert_eq!(parent_of(0, 2, 3), Parent::Inside(0));
        assert_eq!(parent_of(1, 2, 3), Parent::Inside(2));
        // same resolution maps one to one
        assert!((0..9).all(|k| parent_of(k, 9, 9) == Parent::Inside(k as usize)));
    }

    #[test]
    fn test_parent_of_huge_counts() {
        assert_eq!(parent_of(u32::MAX - 1, u32::MAX, u32::MAX), Parent::Inside((u32::MAX - 1) as usize));
    }

    #[test]
    fn test_inheritance_chains() {
        let layout = layout(&[4, 7, 14]);
        let second: Vec<Rgb> = layout.bands[1].colors().collect();
        let third: Vec<Rgb> = layout.bands[2].colors().collect();
        // each note of the second band splits into two
        for (k, color) in third.iter().enumerate() {
            assert_eq!(*color, second[k / 2]);
        }
        // the white note propagates down
        assert!(third[6].is_white() && third[7].is_white());
        assert_eq!(layout.bands[2].blank_count(), 2);
        assert_eq!(layout.blank_count(), 3);
    }

    #[test]
    fn test_every_band_kept_in_order() {
        let counts = [4, 7, 3, 9, 2];
        let stacked = layout(&counts);
        let built: Vec<u32> = stacked.bands.iter().map(|b| b.note_count).collect();
        assert_eq!(built, counts);
        for (index, band) in stacked.bands.iter().enumerate() {
            assert_eq!(band.notes.len(), counts[index] as usize);
            assert!(band.notes.iter().all(|n| n.rect.y == band.notes[0].rect.y));
        }
        // band tops increase strictly down the stack
        assert!(stacked.bands.windows(2).all(|w| w[0].notes[0].rect.y < w[1].notes[0].rect.y));
        assert_eq!(stacked.connectors.len(), 7 + 3 + 9 + 2);

        let single = layout(&[5]);
        assert_eq!(single.bands.len(), 1);
        assert!(single.connectors.is_empty());
    }

    #[test]
    fn test_connectors() {
        let layout = layout(&[4, 7, 3]);
        assert_eq!(layout.connectors.len(), 10);

        let first = layout.connectors[0];
        let note = layout.bands[1].notes[0];
        assert_eq!(first.start.x, note.rect.center_x());
        assert_eq!(first.end.x, note.rect.center_x());
        assert_eq!(first.start.y, layout.bands[0].notes[0].rect.bottom());
        assert_eq!(first.end.y, note.rect.y - 1.0);
        assert_eq!(first.dash_length, 4.0);

        let last = layout.connectors[9];
        assert_eq!(last.start.y, layout.bands[1].notes[0].rect.bottom());
    }

    #[test]
    fn test_dashes_stay_on_connector() {
        let connector = Connector {
            start: Point::new(10.0, 120.0),
            end: Point::new(10.0, 144.0),
            dash_length: 4.0,
        };
        let dashes = connector.dashes();
        assert_eq!(dashes.len(), 3);
        for (a, b) in &dashes {
            assert_eq!(a.x, 10.0);
            assert_eq!(b.x, 10.0);
            assert!(a.y >= 120.0 && b.y <= 144.0 && a.y < b.y);
        }
        assert_eq!(dashes[0].0, connector.start);
    }

    #[test]
    fn test_dashes_degenerate() {
        let short = Connector {
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, 3.0),
            dash_length: 4.0,
        };
        assert!(short.dashes().is_empty());
        let zero = Connector { dash_length: 0.0, ..short };
        assert!(zero.dashes().is_empty());
    }

    #[test]
    fn test_zoom_and_origin() {
        let counts = counts(&[2, 3]);
        let palette = generate_palette(2);
        let layout = compute_bands(&counts, WIDTH, 2, Offset { x: 10, y: 5 }, &palette);
        // 420 * floor(e^2) = 2940
        let band = &layout.bands[0];
        assert_eq!(band.notes[0].rect.x, -840.0);
        assert_eq!(band.notes[0].rect.width, 1470.0);
        assert_eq!(band.notes[0].rect.y, 130.0);
        assert_eq!(band.notes[0].rect.height, 120.0);
        // spacing: 240 - 35
        assert_eq!(layout.bands[1].notes[0].rect.y, 335.0);
        assert_eq!(layout.connectors[0].dash_length, 8.0);
    }

    #[test]
    fn test_short_palette_falls_back_to_white() {
        let counts = counts(&[3]);
        let layout = compute_bands(&counts, WIDTH, 1, Offset::default(), &[Rgb::BLACK]);
        let colors: Vec<Rgb> = layout.bands[0].colors().collect();
        assert_eq!(colors, vec![Rgb::BLACK, Rgb::WHITE, Rgb::WHITE]);
    }

    #[test]
    fn test_dense_bands_drop_outlines() {
        let layout = layout(&[4, OUTLINE_CUTOFF]);
        assert!(layout.bands[0].outlined);
        assert!(!layout.bands[1].outlined);
        assert_eq!(layout.bands[1].notes.len(), OUTLINE_CUTOFF as usize);
    }

    #[test]
    fn test_idempotent() {
        let counts = counts(&[5, 8, 13, 3]);
        let palette = generate_palette(5);
        let origin = Offset { x: -7, y: 12 };
        let a = compute_bands(&counts, WIDTH, 3, origin, &palette);
        let b = compute_bands(&counts, WIDTH, 3, origin, &palette);
        assert_eq!(a, b);
    }
}
