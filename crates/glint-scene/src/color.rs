//! RGB color arithmetic for shading.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul};

/// An RGB color with f64 channels.
///
/// Channels are unit-less shading quantities and are not clamped here;
/// values above 1 are legal intermediate results and are clamped only when
/// a pixel buffer is converted for display or export.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Black (all channels zero). Also the tracer's miss color.
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    /// White (all channels one).
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a new color.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

/// Element-wise product, used for modulating light by reflectance.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_ops() {
        let a = Color::new(0.5, 1.0, 2.0);
        let b = Color::new(2.0, 0.5, 0.5);
        assert_eq!(a * b, Color::new(1.0, 0.5, 1.0));
        assert_eq!(a + b, Color::new(2.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Color::new(1.0, 2.0, 4.0));
    }
}
