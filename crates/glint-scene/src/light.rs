//! Point lights.

use crate::color::Color;
use glint_math::Point3;

/// A point light.
///
/// The ambient color is supplied once per scene but stored on every light;
/// the tracer reads it from the first light.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Position of the light in world space.
    pub position: Point3,
    /// Emitted color.
    pub color: Color,
    /// Scene-wide ambient color.
    pub ambient: Color,
}

impl Light {
    /// Create a new light.
    pub fn new(position: Point3, color: Color, ambient: Color) -> Self {
        Self {
            position,
            color,
            ambient,
        }
    }
}
