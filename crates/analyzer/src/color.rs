use crate::ranking::Extrema;
use serde::Serialize;

/// A color with each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Blue channel shared by every alpha color.
pub const ALPHA_BLUE: f64 = 0.25;

/// Color of the beta bars.
pub const BETA_COLOR: Rgb = Rgb { r: 0.0, g: 0.75, b: 1.0 };

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// 8-bit channels for terminal and image output.
    pub fn to_u8(&self) -> (u8, u8, u8) {
        let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Maps an alpha to green (positive) or red (negative), scaled by how close it
/// is to the most extreme alpha of the same sign.
///
/// An extreme of 0 (no alpha of that sign) yields a 0 channel instead of a
/// division by zero.
pub fn color_for_alpha(alpha: f64, extrema: &Extrema) -> Rgb {
    if alpha >= 0.0 {
        Rgb::new(0.0, fraction_of(alpha, extrema.max_alpha), ALPHA_BLUE)
    } else {
        Rgb::new(fraction_of(alpha, extrema.min_alpha), 0.0, ALPHA_BLUE)
    }
}

pub fn colors_for_alphas(alphas: &[f64], extrema: &Extrema) -> Vec<Rgb> {
    alphas.iter().map(|a| color_for_alpha(*a, extrema)).collect()
}

fn fraction_of(value: f64, extreme: f64) -> f64 {
    let ratio = value / extreme;
    if extreme == 0.0 || !ratio.is_finite() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}
