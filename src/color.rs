use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// 8-bit sRGB colour shared by the SVG writer and the dashboard.
pub type Rgb = Srgb<u8>;

/// Bar fill used for single-series charts.
pub const BAR_COLOR: (u8, u8, u8) = (76, 114, 176);

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

/// `#rrggbb` notation.
pub fn to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// The single-series bar colour.
pub fn bar_color() -> Rgb {
    let (r, g, b) = BAR_COLOR;
    Srgb::new(r, g, b)
}
