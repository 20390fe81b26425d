use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Lighten, Srgb};

use crate::view::ColorCategory;

// ---------------------------------------------------------------------------
// Risk colors
// ---------------------------------------------------------------------------

const HIGH_RGB: (u8, u8, u8) = (204, 0, 0);
const LOW_RGB: (u8, u8, u8) = (0, 204, 0);

/// Mean line color in the time-series panels.
pub const MEAN_LINE: Color32 = Color32::from_rgb(40, 40, 40);

/// Solid color for bars of the given category.
pub fn category_color(category: ColorCategory) -> Color32 {
    let (r, g, b) = match category {
        ColorCategory::High => HIGH_RGB,
        ColorCategory::Low => LOW_RGB,
    };
    Color32::from_rgb(r, g, b)
}

/// Translucent, lightened variant used to fill the confidence band.
pub fn band_fill(category: ColorCategory) -> Color32 {
    let base = category_color(category);
    let rgb = Srgb::new(base.r(), base.g(), base.b()).into_format::<f32>();
    let hsl: Hsl = rgb.into_color();
    let light: Srgb = hsl.lighten(0.35).into_color();
    Color32::from_rgba_unmultiplied(
        (light.red * 255.0).round() as u8,
        (light.green * 255.0).round() as u8,
        (light.blue * 255.0).round() as u8,
        140,
    )
}

/// Legend entries (label → colour) for the UI.
pub fn legend_entries() -> [(&'static str, Color32); 2] {
    [
        ("Rt ≥ 1 (growing)", category_color(ColorCategory::High)),
        ("Rt < 1 (shrinking)", category_color(ColorCategory::Low)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_colors_match_categories() {
        assert_eq!(category_color(ColorCategory::High), Color32::from_rgb(204, 0, 0));
        assert_eq!(category_color(ColorCategory::Low), Color32::from_rgb(0, 204, 0));
    }

    #[test]
    fn band_fill_is_lighter_and_keeps_hue() {
        let fill = band_fill(ColorCategory::High);
        assert_eq!(fill.a(), 140);
        let [r, g, b, _] = fill.to_srgba_unmultiplied();
        assert!(r > g && r > b, "expected a red tone, got {r},{g},{b}");
        assert!(g > 0, "expected lightening to lift the other channels");
    }
}
