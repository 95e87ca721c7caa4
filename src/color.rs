use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed colours
// ---------------------------------------------------------------------------

pub const TAB_RED: Color32 = Color32::from_rgb(214, 39, 40);
pub const TAB_BLUE: Color32 = Color32::from_rgb(31, 119, 180);
pub const TREND_LINE: Color32 = Color32::from_rgb(31, 119, 180);
pub const WARNING: Color32 = Color32::from_rgb(230, 160, 20);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// A hue ramp: `n` colours evenly spaced between two hues.
#[derive(Debug, Clone, Copy)]
pub struct HueRamp {
    pub hue_start: f32,
    pub hue_end: f32,
    pub saturation: f32,
    pub lightness: f32,
}

/// Blue-violet through green to yellow.
pub const VIRIDIS: HueRamp = HueRamp {
    hue_start: 275.0,
    hue_end: 55.0,
    saturation: 0.65,
    lightness: 0.45,
};

/// Soft pastel pair for two-category charts.
pub const SET2: HueRamp = HueRamp {
    hue_start: 165.0,
    hue_end: 20.0,
    saturation: 0.45,
    lightness: 0.60,
};

/// Red through yellow to blue.
pub const SPECTRAL: HueRamp = HueRamp {
    hue_start: 0.0,
    hue_end: 220.0,
    saturation: 0.70,
    lightness: 0.55,
};

impl HueRamp {
    /// Generates `n` colours along the ramp. Hues wrap around 360°.
    pub fn colors(&self, n: usize) -> Vec<Color32> {
        if n == 0 {
            return Vec::new();
        }
        let span = self.hue_end - self.hue_start;
        (0..n)
            .map(|i| {
                let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
                let hue = (self.hue_start + span * t).rem_euclid(360.0);
                hsl_to_color32(hue, self.saturation, self.lightness)
            })
            .collect()
    }
}

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
