//! Surface materials for the Phong shading model.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// A Phong material, associated one-to-one with a shape at scene level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Ambient reflectance.
    pub ambient: Color,
    /// Diffuse reflectance.
    pub diffuse: Color,
    /// Specular reflectance.
    pub specular: Color,
    /// Phong shininess exponent (>= 0).
    pub specular_exponent: f64,
    /// Mirror reflectivity in [0, 1].
    pub reflectivity: f64,
    /// Transparency in [0, 1]; 0 is fully opaque.
    pub transparency: f64,
    /// Refractive index of the material's interior.
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::BLACK,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
            specular_exponent: 1.0,
            reflectivity: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}
