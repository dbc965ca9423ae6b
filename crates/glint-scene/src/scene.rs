//! The scene: shapes, their materials, and lights.

use crate::error::{Result, SceneError};
use crate::light::Light;
use crate::material::Material;
use crate::shape::Shape;
use std::collections::HashMap;

/// Identifier of a shape within a scene (its insertion index).
pub type ShapeId = usize;

/// A scene to trace: an ordered list of shapes, a shape-to-material
/// association, and an ordered list of lights.
///
/// Materials are attached separately from shapes (the editor workflow), so
/// [`Scene::validate`] exists to check the tracing preconditions up front:
/// every shape must have a material and there must be at least one light.
#[derive(Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    materials: HashMap<ShapeId, Material>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape and return its id.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Attach (or replace) the material of a shape.
    pub fn attach_material(&mut self, id: ShapeId, material: Material) {
        self.materials.insert(id, material);
    }

    /// Append a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// All shapes, in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Mutable access to a shape, for parameter edits between frames.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    /// The material attached to a shape, if any.
    pub fn material(&self, id: ShapeId) -> Option<&Material> {
        self.materials.get(&id)
    }

    /// All lights, in insertion order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Check the tracing preconditions: every shape has a material and the
    /// scene has at least one light.
    pub fn validate(&self) -> Result<()> {
        for id in 0..self.shapes.len() {
            if !self.materials.contains_key(&id) {
                return Err(SceneError::MissingMaterial(id));
            }
        }
        if self.lights.is_empty() {
            return Err(SceneError::NoLights);
        }
        Ok(())
    }
}
