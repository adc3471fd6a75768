use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed series palette
// ---------------------------------------------------------------------------

/// Hue, saturation, lightness of each palette slot, in assignment order.
const SERIES_HSL: [(f32, f32, f32); 15] = [
    (12.0, 0.76, 0.61),
    (173.0, 0.58, 0.39),
    (197.0, 0.37, 0.24),
    (43.0, 0.74, 0.66),
    (27.0, 0.87, 0.67),
    (231.0, 0.48, 0.48),
    (180.0, 0.50, 0.40),
    (220.0, 0.70, 0.50),
    (160.0, 0.60, 0.45),
    (30.0, 0.80, 0.55),
    (280.0, 0.60, 0.60),
    (0.0, 0.70, 0.60),
    (60.0, 0.70, 0.45),
    (200.0, 0.75, 0.55),
    (330.0, 0.70, 0.60),
];

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Colour for the series at `index`, wrapping once the palette runs out.
pub fn series_color(index: usize) -> Color32 {
    let (h, s, l) = SERIES_HSL[index % SERIES_HSL.len()];
    hsl_to_color32(h, s, l)
}

// ---------------------------------------------------------------------------
// Colour mapping: series key → Color32
// ---------------------------------------------------------------------------

/// Positional colour assignment for an ordered list of series.
///
/// Colours follow list position, so the same ordered list always maps the
/// same way and reordering it moves colours between series.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    entries: Vec<(String, Color32)>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<S: AsRef<str>>(keys: &[S]) -> Self {
        let entries = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_ref().to_string(), series_color(i)))
            .collect();
        ColorMap {
            entries,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a series key.
    pub fn color_for(&self, key: &str) -> Color32 {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_palette() -> Vec<Color32> {
        SERIES_HSL
            .iter()
            .map(|&(h, s, l)| hsl_to_color32(h, s, l))
            .collect()
    }

    #[test]
    fn palette_wraps() {
        let palette = series_palette();
        assert_eq!(palette.len(), 15);
        assert_eq!(series_color(0), palette[0]);
        assert_eq!(series_color(15), palette[0]);
        assert_eq!(series_color(17), palette[2]);
    }

    #[test]
    fn palette_colours_are_distinct() {
        let palette = series_palette();
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn assignment_is_positional_and_deterministic() {
        let first = ColorMap::new(&["Alpha", "Beta", "Gamma"]);
        let again = ColorMap::new(&["Alpha", "Beta", "Gamma"]);
        assert_eq!(first, again);

        let reordered = ColorMap::new(&["Gamma", "Alpha", "Beta"]);
        assert_eq!(reordered.color_for("Gamma"), first.color_for("Alpha"));
        assert_ne!(reordered.color_for("Alpha"), first.color_for("Alpha"));
    }

    #[test]
    fn unknown_key_gets_default() {
        let map = ColorMap::new(&["Alpha"]);
        assert_eq!(map.color_for("Zeta"), Color32::GRAY);
    }
}
