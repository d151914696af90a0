use std::collections::BTreeMap;

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
            let hsl = Hsl::new(hue, 0.70, 0.50);
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
// Region → colour mapping
// ---------------------------------------------------------------------------

/// Assign each region a stable colour, in iteration order of the given set.
pub fn region_colors<'a, I>(regions: I) -> BTreeMap<String, Color32>
where
    I: IntoIterator<Item = &'a String>,
{
    let regions: Vec<&String> = regions.into_iter().collect();
    let palette = generate_palette(regions.len());
    regions
        .into_iter()
        .zip(palette)
        .map(|(r, c)| (r.clone(), c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_hues() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        for pair in colors.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn regions_map_to_stable_colors() {
        let regions = vec!["North".to_string(), "South".to_string()];
        let a = region_colors(&regions);
        let b = region_colors(&regions);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }
}
