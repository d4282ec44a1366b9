use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Hue of the first series (sky blue); later series rotate away from it.
const BASE_HUE: f32 = 200.0;

/// `n` visually distinct colours for bars, evenly spaced around the hue circle.
pub fn series_colors(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl(BASE_HUE + (i as f32 / n as f32) * 360.0, 0.7, 0.6))
        .collect()
}

/// Single colour used for scatter markers and histogram bars.
pub fn primary() -> Color32 {
    hsl(BASE_HUE, 0.8, 0.5)
}

fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue % 360.0, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}
