//! The recursive Whitted shader.

use crate::intersect::intersect;
use glint_math::{Ray, Vec3, DINF, EPSILON};
use glint_scene::{Color, Light, Material, Scene, SceneError, Shape};

/// Recursion cutoff: calls deeper than this return black.
pub const MAX_DEPTH: u32 = 5;

/// Minimum shadow-ray parameter for an occluder to count.
pub const SHADOW_MIN_T: f64 = 1e-4;

/// The recursive shader over a validated scene snapshot.
///
/// Construction resolves every shape to its material and checks the
/// tracing preconditions (a material per shape, at least one light) up
/// front, so the recursion itself is infallible. The scene is borrowed for
/// the tracer's lifetime and must not be mutated while a frame is in
/// flight.
pub struct Tracer<'a> {
    objects: Vec<(&'a Shape, &'a Material)>,
    lights: &'a [Light],
    ambient: Color,
}

impl<'a> Tracer<'a> {
    /// Build a tracer over a scene, failing fast if any shape lacks a
    /// material or the scene has no lights.
    pub fn new(scene: &'a Scene) -> Result<Self, SceneError> {
        let mut objects = Vec::with_capacity(scene.shapes().len());
        for (id, shape) in scene.shapes().iter().enumerate() {
            let material = scene
                .material(id)
                .ok_or(SceneError::MissingMaterial(id))?;
            objects.push((shape, material));
        }

        let lights = scene.lights();
        let ambient = match lights.first() {
            Some(light) => light.ambient,
            None => return Err(SceneError::NoLights),
        };

        Ok(Self {
            objects,
            lights,
            ambient,
        })
    }

    /// Trace a ray and return the color seen along it.
    ///
    /// `medium_index` is the refractive index of the volume the ray is
    /// traveling through (1 for air); recursive refraction calls pass the
    /// next medium's index through it.
    pub fn trace(&self, ray: &Ray, depth: u32, medium_index: f64) -> Color {
        if depth > MAX_DEPTH {
            return Color::BLACK;
        }

        // Nearest hit across every shape in the scene.
        let mut best_t = DINF;
        let mut best_normal = Vec3::zeros();
        let mut best_material: Option<&Material> = None;
        for &(shape, material) in &self.objects {
            let record = intersect(ray, shape);
            if record.hit && record.t > EPSILON && best_t > record.t {
                best_t = record.t;
                best_normal = record.normal;
                best_material = Some(material);
            }
        }

        let Some(material) = best_material else {
            // Miss: the background is black.
            return Color::BLACK;
        };

        // Once inside a medium the only way out is into air.
        let refract_index = if medium_index == 1.0 {
            material.refractive_index
        } else {
            1.0
        };

        let hit_point = ray.at(best_t);
        let p2v = (ray.p - hit_point).normalize();

        // Ambient is scene-global and added once, before the light loop.
        let mut color = self.ambient * material.ambient;

        for light in self.lights {
            let to_light = light.position - hit_point;
            let light_dist = to_light.norm();
            let p2l = to_light.normalize();

            // A back-facing or grazing light contributes nothing.
            let lxn = p2l.dot(&best_normal);
            if lxn > 0.0 {
                let diffuse = (material.diffuse * light.color) * lxn;

                let r = best_normal * (2.0 * lxn) - p2l;
                let rxvn = r.dot(&p2v).powf(material.specular_exponent);
                let specular = (material.specular * light.color) * rxvn;

                // Every occluder between the point and the light attenuates
                // by its transparency; occluders are not sorted and the
                // product is taken in scene order.
                let mut shadow = 1.0;
                let surface_ray = Ray::new(hit_point + p2l * EPSILON, p2l);
                for &(shape, occluder) in &self.objects {
                    let record = intersect(&surface_ray, shape);
                    if record.hit && record.t > SHADOW_MIN_T && record.t.abs() < light_dist {
                        shadow *= occluder.transparency;
                    }
                }

                color += (diffuse + specular) * shadow;
            }
        }

        let mut reflect = Color::BLACK;
        let mut refract = Color::BLACK;

        if material.reflectivity > 0.0 {
            let w = (best_normal * (2.0 * p2v.dot(&best_normal)) - p2v).normalize();
            reflect = self.trace(&Ray::new(hit_point, w), depth + 1, 1.0);
        }

        if material.transparency > 0.0 {
            let c1 = medium_index;
            let c2 = refract_index;
            let nxv = best_normal.dot(&p2v);
            let nxv2 = nxv * nxv;

            // Refraction is traced only when this reaches 1, which is also
            // what keeps the square root's argument non-negative.
            if nxv2 + (c1 / c2) * (c1 / c2) >= 1.0 {
                // An exiting ray sees the flipped normal; without the flip
                // it would be bent back inside.
                let refract_normal = if nxv < 0.0 { -best_normal } else { best_normal };

                // cos(theta2) = sqrt(1 - (c2/c1)^2 (1 - (N.V)^2))
                // W = ((c2/c1)(N.V) - cos(theta2)) N - (c2/c1) V
                let ratio = c2 / c1;
                let cosine = (1.0 - ratio * ratio * (1.0 - nxv2)).sqrt();
                let w = (refract_normal * (ratio * refract_normal.dot(&p2v) - cosine)
                    - p2v * ratio)
                    .normalize();

                let next_medium = if medium_index == 1.0 {
                    material.refractive_index
                } else {
                    1.0
                };
                refract = self.trace(&Ray::new(hit_point, w), depth + 1, next_medium);
            }
        }

        color + reflect * material.reflectivity + refract * material.transparency
    }
}
