//! Green → yellow → red choropleth scale.

use std::fmt;

use serde::Serialize;

use crate::snapshot::CaseBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Fill for regions without data.
    pub const NO_DATA: Rgb = Rgb::new(0xde, 0xe2, 0xe6);
    pub const GREEN: Rgb = Rgb::new(51, 255, 51);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Position of `total` between the bounds, clamped to `[0, 1]`.
///
/// Degenerate bounds (`max <= min`) put totals at or above `max` at 1 and
/// everything else at 0.
pub fn normalize(total: u64, bounds: CaseBounds) -> f64 {
    if bounds.max <= bounds.min {
        return if total >= bounds.max { 1.0 } else { 0.0 };
    }
    let span = (bounds.max - bounds.min) as f64;
    ((total as f64 - bounds.min as f64) / span).clamp(0.0, 1.0)
}

fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
}

fn blend(from: Rgb, to: Rgb, t: f64) -> Rgb {
    Rgb::new(lerp(from.r, to.r, t), lerp(from.g, to.g, t), lerp(from.b, to.b, t))
}

pub fn color_for(total: u64, bounds: CaseBounds) -> Rgb {
    if total == 0 {
        return Rgb::NO_DATA;
    }
    let t = normalize(total, bounds);
    if t < 0.5 {
        blend(Rgb::GREEN, Rgb::YELLOW, t * 2.0)
    } else {
        blend(Rgb::YELLOW, Rgb::RED, (t - 0.5) * 2.0)
    }
}
