use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            to_color32(Hsl::new(hue, 0.65, 0.55))
        })
        .collect()
}

/// Light-to-dark blue for `t` in `[0, 1]`, used to shade bars by value.
pub fn blues(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    to_color32(Hsl::new(212.0, 0.35 + 0.45 * t, 0.82 - 0.5 * t))
}

fn to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: expense type → Color32
// ---------------------------------------------------------------------------

/// Stable colour per expense type, shared by the pie chart and the filter panel.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(expense_types: &BTreeSet<String>) -> Self {
        let mapping = expense_types
            .iter()
            .cloned()
            .zip(generate_palette(expense_types.len()))
            .collect();
        Self { mapping }
    }

    pub fn color_for(&self, expense_type: &str) -> Color32 {
        self.mapping
            .get(expense_type)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}
