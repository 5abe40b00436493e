use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: condition → Color32
// ---------------------------------------------------------------------------

/// Maps every condition of a dataset to a distinct colour.
///
/// Built from the full condition list, so a condition keeps its colour while
/// the selection changes.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(conditions: &[String]) -> Self {
        let palette = generate_palette(conditions.len());
        let mapping = conditions.iter().cloned().zip(palette).collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a condition; unknown names are grey.
    pub fn color_for(&self, condition: &str) -> Color32 {
        self.mapping
            .get(condition)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

// ---------------------------------------------------------------------------
// Sequential scale for heatmap cells
// ---------------------------------------------------------------------------

/// Dark purple → orange → yellow, close to the usual "plasma" ramp.
const SCALE_STOPS: [(f32, f32, f32); 5] = [
    (0.050, 0.030, 0.528),
    (0.494, 0.012, 0.658),
    (0.798, 0.280, 0.470),
    (0.973, 0.585, 0.252),
    (0.940, 0.975, 0.131),
];

/// Colour for a value already normalised to `0.0..=1.0`.  `NaN` is grey.
pub fn sequential(t: f64) -> Color32 {
    if t.is_nan() {
        return Color32::DARK_GRAY;
    }
    let t = t.clamp(0.0, 1.0) as f32;
    let span = (SCALE_STOPS.len() - 1) as f32;
    let pos = t * span;
    let lower = (pos.floor() as usize).min(SCALE_STOPS.len() - 2);
    let frac = pos - lower as f32;

    let (r0, g0, b0) = SCALE_STOPS[lower];
    let (r1, g1, b1) = SCALE_STOPS[lower + 1];
    let a: LinSrgb = Srgb::new(r0, g0, b0).into_linear();
    let b: LinSrgb = Srgb::new(r1, g1, b1).into_linear();
    to_color32(Srgb::from_linear(a.mix(b, frac)))
}

/// Finite min/max over a matrix, ignoring `NaN`.
pub fn value_range(values: &[Vec<f64>]) -> Option<(f64, f64)> {
    values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Position of `v` within `range`; a flat range maps to the middle.
pub fn normalise(v: f64, (lo, hi): (f64, f64)) -> f64 {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        0.5
    } else {
        (v - lo) / span
    }
}
