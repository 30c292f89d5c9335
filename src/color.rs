//! Linear RGB colour used for liquid and meat tinting.
//!
//! Channels are floats in `[0, 1]`. Interpolation clamps its factor, so a
//! blend step larger than one simply snaps to the target colour.

use serde::Serialize;

/// Colour with red, green and blue channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const CYAN: Rgb = Rgb::new(0.0, 1.0, 1.0);

    /// Raw meat.
    pub const RAW_MEAT: Rgb = Rgb::new(0.95, 0.65, 0.55);
    /// Meat at the target doneness.
    pub const COOKED_MEAT: Rgb = Rgb::new(0.75, 0.54, 0.12);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Interpolate towards `other` by `t`, clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Largest per-channel difference, handy for tolerance checks.
    pub fn max_channel_delta(self, other: Rgb) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}
