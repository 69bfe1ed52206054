//! Note palettes
//!
//! The first band of the picture needs one color per note. Small counts reuse
//! a hand-picked set of hues; larger counts extend those hues with darker
//! shades and lighter tints, duplicating the hue list when a single hue would
//! need more than [`MAX_SHADES_PER_COLOR`] variants.

use crate::color::Rgb;

/// Colors of the problem statement's own four-note example.
pub const REFERENCE_PALETTE: [&str; 4] = ["#009fe3", "#80cff1", "#ea5e00", "#f4af80"];

/// Base hues, in the order they are handed out.
pub const BASE_PALETTE: [&str; 12] = [
    "#008ad4", "#ea5e00", "#d32b51", "#b74083", "#845a9f", "#3f517d",
    "#386982", "#038cb7", "#00a0a4", "#00a578", "#2c9d13", "#c49d0a",
];

/// Upper bound on variants generated from one hue.
pub const MAX_SHADES_PER_COLOR: i64 = 8;

/// Variants at or above this count start with darker shades.
const SHADE_THRESHOLD: i64 = 5;

fn parse_all(hexes: &[&str]) -> Vec<Rgb> {
    hexes
        .iter()
        .filter_map(|hex| match Rgb::from_hex(hex) {
            Ok(color) => Some(color),
            Err(e) => {
                log::error!("skipping palette entry: {}", e);
                None
            }
        })
        .collect()
}

/// `ceil((notes - available) / MAX_SHADES_PER_COLOR) + 1`
fn shades_needed(note_count: i64, available_colors: i64) -> i64 {
    let missing = note_count - available_colors;
    // ceiling division that also rounds negative quotients toward +inf
    -((-missing).div_euclid(MAX_SHADES_PER_COLOR)) + 1
}

/// Variants of one hue, darkest first.
fn hue_variants(base: Rgb, shades_per_color: i64) -> impl Iterator<Item = Rgb> {
    (0..shades_per_color).map(move |j| {
        let variant = if shades_per_color >= SHADE_THRESHOLD {
            if j < SHADE_THRESHOLD {
                base.shade((8 - 2 * j) as f32)
            } else {
                base.tint((2 * (j - SHADE_THRESHOLD)) as f32)
            }
        } else {
            base.tint((2 * j) as f32)
        };
        variant.clamped()
    })
}

/// Build a palette with at least `note_count` colors.
///
/// Deterministic: the same count always yields the same palette. The result
/// may hold more colors than requested; index only what you need.
pub fn generate_palette(note_count: usize) -> Vec<Rgb> {
    if note_count == 4 {
        return parse_all(&REFERENCE_PALETTE);
    }
    if note_count == 0 {
        log::warn!("palette requested for zero notes, using a single-note palette");
        return generate_palette(1);
    }

    let notes = note_count as i64;
    let mut hues = parse_all(&BASE_PALETTE);
    let mut shades_per_color = shades_needed(notes, hues.len() as i64);

    // Too many variants per hue: spread them over a duplicated hue list.
    while shades_per_color > MAX_SHADES_PER_COLOR
        || shades_per_color.max(2) * (hues.len() as i64) < notes
    {
        hues.extend_from_within(..);
        shades_per_color = shades_needed(notes, hues.len() as i64);
    }

    // More hues than notes
    if shades_per_color <= 0 {
        shades_per_color = 2;
    }

    let palette: Vec<Rgb> = hues
        .iter()
        .flat_map(|&hue| hue_variants(hue, shades_per_color))
        .collect();

    log::debug!(
        "palette for {} notes: {} hues x {} variants = {} colors",
        note_count,
        hues.len(),
        shades_per_color,
        palette.len()
    );
    palette
}

/// Keeps the palette of the current base band so it is only rebuilt when the
/// first note count changes.
#[derive(Debug, Default)]
pub struct PaletteCache {
    cached: Option<(usize, Vec<Rgb>)>,
}

impl PaletteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, note_count: usize) -> &[Rgb] {
        let stale = !matches!(&self.cached, Some((count, _)) if *count == note_count);
        if stale {
            self.cached = Some((note_count, generate_palette(note_count)));
        }
        match &self.cached {
            Some((_, palette)) => palette,
            None => &[],
        }
    }

    /// Base count of the cached palette, if any
    pub fn note_count(&self) -> Option<usize> {
        self.cached.as_ref().map(|(count, _)| *count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range(c: &Rgb) -> bool {
        [c.r, c.g, c.b].iter().all(|v| (0.0..=255.0).contains(v))
    }

    #[test]
    fn test_reference_palette() {
        let palette = generate_palette(4);
        assert_eq!(
            palette,
            vec![
                Rgb::new(0.0, 159.0, 227.0),
                Rgb::new(128.0, 207.0, 241.0),
                Rgb::new(234.0, 94.0, 0.0),
                Rgb::new(244.0, 175.0, 128.0),
            ]
        );
    }

    #[test]
    fn test_shades_needed() {
        assert_eq!(shades_needed(12, 12), 1);
        assert_eq!(shades_needed(13, 12), 2);
        assert_eq!(shades_needed(20, 12), 2);
        assert_eq!(shades_needed(21, 12), 3);
        assert_eq!(shades_needed(1, 12), 0);
        assert_eq!(shades_needed(7, 12), 1);
    }

    #[test]
    fn test_covers_every_count() {
        for n in 1..=400 {
            let palette = generate_palette(n);
            assert!(palette.len() >= n, "{} colors for {} notes", palette.len(), n);
            assert!(palette.iter().all(in_range), "out of range color for {} notes", n);
        }
    }

    #[test]
    fn test_single_note() {
        let palette = generate_palette(1);
        // two tints per hue: the hue itself and a 20% lighter one
        assert_eq!(palette.len(), 24);
        assert_eq!(palette[0], Rgb::from_hex("#008ad4").unwrap());
    }

    #[test]
    fn test_small_counts_use_base_hues() {
        let palette = generate_palette(7);
        assert_eq!(palette.len(), 12);
        let base = parse_all(&BASE_PALETTE);
        assert_eq!(palette, base);
    }

    fn assert_rgb(actual: Rgb, expected: (f32, f32, f32)) {
        let close = |a: f32, b: f32| (a - b).abs() < 1e-3;
        assert!(
            close(actual.r, expected.0) && close(actual.g, expected.1) && close(actual.b, expected.2),
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_shades_then_tints() {
        // 60 notes -> 7 variants per hue: 5 shades followed by 2 tints
        let palette = generate_palette(60);
        assert_eq!(palette.len(), 12 * 7);
        // #008ad4 = (0, 138, 212)
        let expected = [
            (0.0, 27.6, 42.4),
            (0.0, 55.2, 84.8),
            (0.0, 82.8, 127.2),
            (0.0, 110.4, 169.6),
            (0.0, 138.0, 212.0),
            (0.0, 138.0, 212.0),
            (51.0, 161.4, 220.6),
        ];
        for (color, want) in palette.iter().zip(expected) {
            assert_rgb(*color, want);
        }
        // next hue #ea5e00 starts with its darkest shade
        assert_rgb(palette[7], (46.8, 18.8, 0.0));
    }

    #[test]
    fn test_tints_only() {
        // 30 notes -> 4 variants per hue, all tints
        let palette = generate_palette(30);
        assert_eq!(palette.len(), 12 * 4);
        let expected = [
            (0.0, 138.0, 212.0),
            (51.0, 161.4, 220.6),
            (102.0, 184.8, 229.2),
            (153.0, 208.2, 237.8),
        ];
        for (color, want) in palette.iter().zip(expected) {
            assert_rgb(*color, want);
        }
        assert_rgb(palette[4], (234.0, 94.0, 0.0));
    }

    #[test]
    fn test_large_counts_duplicate_hues() {
        let palette = generate_palette(200);
        assert!(palette.len() >= 200);
        // no hue is stretched past its variant budget
        let second_hue_start = palette
            .iter()
            .position(|c| *c == Rgb::from_hex(BASE_PALETTE[1]).unwrap().clamped())
            .unwrap();
        assert!(second_hue_start <= MAX_SHADES_PER_COLOR as usize);
    }

    #[test]
    fn test_deterministic() {
        for n in [1, 4, 5, 12, 13, 99, 250] {
            assert_eq!(generate_palette(n), generate_palette(n));
        }
    }

    #[test]
    fn test_zero_is_not_fatal() {
        assert!(!generate_palette(0).is_empty());
    }

    #[test]
    fn test_cache_reuses_palette() {
        let mut cache = PaletteCache::new();
        assert_eq!(cache.note_count(), None);
        assert_eq!(cache.get(4).len(), 4);
        assert_eq!(cache.note_count(), Some(4));
        assert_eq!(cache.get(9), &generate_palette(9)[..]);
        assert_eq!(cache.note_count(), Some(9));
    }
}
