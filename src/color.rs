use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use dbst_lab::data::Series;

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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed colours for the measured series
// ---------------------------------------------------------------------------

/// Fixed colour per measured series.
pub fn series_color(series: Series) -> Color32 {
    match series {
        Series::Baseline => Color32::from_rgb(90, 160, 255),
        Series::PlusH2PO4 => Color32::from_rgb(80, 200, 120),
        Series::PlusPb => Color32::from_rgb(235, 90, 80),
    }
}

/// Colour of the digital bit `1` / `0` in tables.
pub fn bit_color(bit: bool) -> Color32 {
    if bit {
        Color32::from_rgb(80, 200, 120)
    } else {
        Color32::GRAY
    }
}
