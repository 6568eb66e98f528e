pub mod panels;
pub mod plot;

use cord_explorer::color::Rgb;
use eframe::egui::Color32;

pub fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.red, color.green, color.blue)
}
