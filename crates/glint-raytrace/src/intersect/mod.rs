//! Ray-shape intersection algorithms.
//!
//! Each shape kind has a dedicated intersector. The transformed kinds map
//! the world-space ray into the shape's canonical space through the inverse
//! transform (points with the perspective divide, directions with a zero
//! homogeneous component), solve there, and map the surface normal back to
//! world space.

mod cone;
mod cuboid;
mod cylinder;
mod ellipsoid;
mod sphere;

use glint_math::{Ray, Vec3, DINF, EPSILON};
use glint_scene::Shape;

/// Result of a ray-shape intersection query.
///
/// Constructed fresh per query. When `hit` is false the remaining fields
/// are meaningless and must not be used.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Whether the ray hit the shape.
    pub hit: bool,
    /// Parameter along the ray where the hit occurs, in the ray's own
    /// parametrization. Always greater than the tolerance for a real hit.
    pub t: f64,
    /// World-space unit surface normal at the hit.
    pub normal: Vec3,
}

impl HitRecord {
    /// A record reporting no intersection.
    pub fn miss() -> Self {
        Self {
            hit: false,
            t: DINF,
            normal: Vec3::zeros(),
        }
    }

    pub(crate) fn hit(t: f64, normal: Vec3) -> Self {
        Self {
            hit: true,
            t,
            normal,
        }
    }
}

impl Default for HitRecord {
    fn default() -> Self {
        Self::miss()
    }
}

/// Intersect a world-space ray with a shape.
///
/// This dispatches to the shape kind's intersector and enforces the
/// positive-parameter contract: a candidate at or below the tolerance (or a
/// NaN produced by a degenerate solve) is reported as a miss.
pub fn intersect(ray: &Ray, shape: &Shape) -> HitRecord {
    let record = match shape {
        Shape::Sphere(s) => sphere::intersect_sphere(ray, s),
        Shape::Cuboid(s) => cuboid::intersect_cuboid(ray, s),
        Shape::Ellipsoid(s) => ellipsoid::intersect_ellipsoid(ray, s),
        Shape::Cylinder(s) => cylinder::intersect_cylinder(ray, s),
        Shape::Cone(s) => cone::intersect_cone(ray, s),
    };

    if record.hit && record.t > EPSILON {
        record
    } else {
        HitRecord::miss()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Point3;
    use glint_scene::{Cuboid, Cylinder, Ellipsoid, Sphere};

    #[test]
    fn test_unit_normals_for_every_kind() {
        let shapes = [
            Shape::Sphere(Sphere::new(Point3::origin(), 1.0)),
            Shape::Cuboid(Cuboid::new(
                Point3::new(-1.0, -1.0, -1.0),
                Vec3::x(),
                Vec3::y(),
                Vec3::z(),
                2.0,
                2.0,
                2.0,
            )),
            Shape::Ellipsoid(Ellipsoid::new(
                Point3::origin(),
                Vec3::x(),
                Vec3::y(),
                Vec3::z(),
                1.0,
                0.5,
                0.75,
            )),
            Shape::Cylinder(Cylinder::new(
                Point3::new(0.0, 0.0, -0.5),
                Vec3::x(),
                Vec3::y(),
                Vec3::z(),
                2.0,
                2.0,
                1.0,
            )),
            Shape::Cone(glint_scene::Cone::new(
                Point3::new(0.0, 0.0, -0.5),
                Vec3::x(),
                Vec3::y(),
                Vec3::z(),
                2.0,
                2.0,
                1.0,
            )),
        ];

        // A slightly tilted ray toward the origin hits all of them.
        let ray = Ray::new(
            Point3::new(-5.0, 0.0, 0.05),
            Vec3::new(1.0, 0.0, -0.01).normalize(),
        );
        for shape in &shapes {
            let record = intersect(&ray, shape);
            assert!(record.hit, "expected a hit on {:?}", shape.kind());
            assert!(record.t > EPSILON);
            assert!(
                (record.normal.norm() - 1.0).abs() < 1e-4,
                "non-unit normal for {:?}",
                shape.kind()
            );
        }
    }

    #[test]
    fn test_degenerate_transform_is_a_miss() {
        let flat = Shape::Ellipsoid(Ellipsoid::new(
            Point3::origin(),
            Vec3::x(),
            Vec3::y(),
            Vec3::z(),
            1.0,
            1.0,
            0.0,
        ));
        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vec3::x());
        assert!(!intersect(&ray, &flat).hit);
    }
}
