//! Declarative scene document for persistence.
//!
//! The document is plain serde data, kept separate from the live scene
//! types: shapes are stored as their parameters only, and the live shapes
//! are rebuilt through their constructors on load, so a file can never
//! produce a shape whose transform pair disagrees with its parameters.
//!
//! A document holds one ambient color, the lights, the shape/material
//! pairs, and an optional camera description for standalone rendering.

use crate::color::Color;
use crate::error::Result as SceneResult;
use crate::light::Light;
use crate::material::Material;
use crate::scene::Scene;
use crate::shape::{Cone, Cuboid, Cylinder, Ellipsoid, Shape, Sphere};
use glint_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

fn pt(a: [f64; 3]) -> Point3 {
    Point3::new(a[0], a[1], a[2])
}

fn vec(a: [f64; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

/// A light in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDoc {
    /// Position of the light.
    pub position: [f64; 3],
    /// Emitted color.
    pub color: Color,
}

/// A shape in the document, parameters only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeDoc {
    /// A sphere.
    Sphere {
        /// Center of the sphere.
        center: [f64; 3],
        /// Radius of the sphere.
        radius: f64,
    },
    /// A box.
    Cuboid {
        /// Corner of the box.
        corner: [f64; 3],
        /// Edge axis for the length extent.
        length_axis: [f64; 3],
        /// Edge axis for the width extent.
        width_axis: [f64; 3],
        /// Edge axis for the height extent.
        height_axis: [f64; 3],
        /// Extent along `length_axis`.
        length: f64,
        /// Extent along `width_axis`.
        width: f64,
        /// Extent along `height_axis`.
        height: f64,
    },
    /// An ellipsoid.
    Ellipsoid {
        /// Center of the ellipsoid.
        center: [f64; 3],
        /// Axis for the length extent.
        length_axis: [f64; 3],
        /// Axis for the width extent.
        width_axis: [f64; 3],
        /// Axis for the height extent.
        height_axis: [f64; 3],
        /// Extent along `length_axis`.
        length: f64,
        /// Extent along `width_axis`.
        width: f64,
        /// Extent along `height_axis`.
        height: f64,
    },
    /// A capped cylinder.
    Cylinder {
        /// Center of the base.
        center: [f64; 3],
        /// Axis for the length diameter.
        length_axis: [f64; 3],
        /// Axis for the width diameter.
        width_axis: [f64; 3],
        /// Axis of the cylinder.
        height_axis: [f64; 3],
        /// Diameter along `length_axis`.
        length: f64,
        /// Diameter along `width_axis`.
        width: f64,
        /// Height along `height_axis`.
        height: f64,
    },
    /// A cone.
    Cone {
        /// Center of the base.
        center: [f64; 3],
        /// Axis for the length diameter.
        length_axis: [f64; 3],
        /// Axis for the width diameter.
        width_axis: [f64; 3],
        /// Axis of the cone, toward the apex.
        height_axis: [f64; 3],
        /// Base diameter along `length_axis`.
        length: f64,
        /// Base diameter along `width_axis`.
        width: f64,
        /// Height along `height_axis`.
        height: f64,
    },
}

impl ShapeDoc {
    /// Build the live shape this document describes.
    pub fn build(&self) -> Shape {
        match *self {
            ShapeDoc::Sphere { center, radius } => Shape::Sphere(Sphere::new(pt(center), radius)),
            ShapeDoc::Cuboid {
                corner,
                length_axis,
                width_axis,
                height_axis,
                length,
                width,
                height,
            } => Shape::Cuboid(Cuboid::new(
                pt(corner),
                vec(length_axis),
                vec(width_axis),
                vec(height_axis),
                length,
                width,
                height,
            )),
            ShapeDoc::Ellipsoid {
                center,
                length_axis,
                width_axis,
                height_axis,
                length,
                width,
                height,
            } => Shape::Ellipsoid(Ellipsoid::new(
                pt(center),
                vec(length_axis),
                vec(width_axis),
                vec(height_axis),
                length,
                width,
                height,
            )),
            ShapeDoc::Cylinder {
                center,
                length_axis,
                width_axis,
                height_axis,
                length,
                width,
                height,
            } => Shape::Cylinder(Cylinder::new(
                pt(center),
                vec(length_axis),
                vec(width_axis),
                vec(height_axis),
                length,
                width,
                height,
            )),
            ShapeDoc::Cone {
                center,
                length_axis,
                width_axis,
                height_axis,
                length,
                width,
                height,
            } => Shape::Cone(Cone::new(
                pt(center),
                vec(length_axis),
                vec(width_axis),
                vec(height_axis),
                length,
                width,
                height,
            )),
        }
    }
}

/// A shape paired with its material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDoc {
    /// The shape parameters.
    pub shape: ShapeDoc,
    /// The material attached to the shape.
    pub material: Material,
}

/// Camera description for standalone rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDoc {
    /// Eye position.
    pub eye: [f64; 3],
    /// Look-at target.
    pub target: [f64; 3],
    /// Up vector.
    pub up: [f64; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
}

impl CameraDoc {
    /// Eye position as a point.
    pub fn eye_point(&self) -> Point3 {
        pt(self.eye)
    }

    /// Target position as a point.
    pub fn target_point(&self) -> Point3 {
        pt(self.target)
    }

    /// Up direction as a vector.
    pub fn up_vec(&self) -> Vec3 {
        vec(self.up)
    }
}

impl Default for CameraDoc {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 10.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 45.0,
        }
    }
}

/// A complete scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDoc {
    /// Scene-wide ambient color.
    pub ambient: Color,
    /// The lights.
    pub lights: Vec<LightDoc>,
    /// Shape/material pairs.
    pub objects: Vec<ObjectDoc>,
    /// Optional camera for standalone rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraDoc>,
}

impl SceneDoc {
    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the document to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Build a live scene from the document.
    ///
    /// The scene-wide ambient color is copied onto every light.
    pub fn build_scene(&self) -> Scene {
        let mut scene = Scene::new();
        for light in &self.lights {
            scene.add_light(Light::new(pt(light.position), light.color, self.ambient));
        }
        for object in &self.objects {
            let id = scene.add_shape(object.shape.build());
            scene.attach_material(id, object.material.clone());
        }
        scene
    }

    /// Validate the document's scene preconditions without building it.
    pub fn validate(&self) -> SceneResult<()> {
        self.build_scene().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn sample_doc() -> SceneDoc {
        SceneDoc {
            ambient: Color::new(0.1, 0.1, 0.1),
            lights: vec![LightDoc {
                position: [0.0, 5.0, 5.0],
                color: Color::WHITE,
            }],
            objects: vec![
                ObjectDoc {
                    shape: ShapeDoc::Sphere {
                        center: [0.0, 0.0, 0.0],
                        radius: 1.0,
                    },
                    material: Material::default(),
                },
                ObjectDoc {
                    shape: ShapeDoc::Cone {
                        center: [3.0, 0.0, 0.0],
                        length_axis: [1.0, 0.0, 0.0],
                        width_axis: [0.0, 1.0, 0.0],
                        height_axis: [0.0, 0.0, 1.0],
                        length: 2.0,
                        width: 2.0,
                        height: 1.5,
                    },
                    material: Material {
                        reflectivity: 0.25,
                        ..Material::default()
                    },
                },
            ],
            camera: Some(CameraDoc::default()),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let doc = sample_doc();
        let json = doc.to_json().unwrap();
        let parsed = SceneDoc::from_json(&json).unwrap();
        assert_eq!(doc, parsed);
    }

    #[test]
    fn test_build_scene() {
        let doc = sample_doc();
        let scene = doc.build_scene();
        assert!(scene.validate().is_ok());
        assert_eq!(scene.shapes().len(), 2);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.lights()[0].ambient, doc.ambient);
        assert_eq!(scene.shapes()[1].kind(), ShapeKind::Cone);
        assert!((scene.material(1).unwrap().reflectivity - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(SceneDoc::from_json("{\"ambient\": []").is_err());
    }
}
