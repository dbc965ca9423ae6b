//! Ray-sphere intersection, solved directly in world space.

use super::HitRecord;
use glint_math::{point_ray_closest, point_ray_dist, Ray, EPSILON};
use glint_scene::Sphere;

/// Intersect a ray with a sphere.
///
/// Rejects quickly when the ray's distance to the center exceeds the
/// radius; otherwise builds the chord through the closest-approach point
/// and reports the smaller root.
pub(super) fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> HitRecord {
    let center = sphere.center();
    let radius = sphere.radius();

    if point_ray_dist(&center, ray) > radius + EPSILON {
        return HitRecord::miss();
    }

    // Chord construction: Q is the closest point on the ray to the center,
    // x the half chord length, A the nearer chord endpoint.
    let closest = point_ray_closest(&center, ray);
    let q = ray.at(closest);
    let w = q - center;
    let x = (radius * radius - w.dot(&w)).sqrt();
    let a = q - ray.dir * x;
    let t = (a - ray.p).dot(&ray.dir) / ray.dir.dot(&ray.dir);

    HitRecord::hit(t, (a - center).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersect::intersect;
    use glint_math::{Point3, Vec3};
    use glint_scene::Shape;

    #[test]
    fn test_head_on_hit() {
        let sphere = Sphere::new(Point3::origin(), 1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let record = intersect_sphere(&ray, &sphere);
        assert!(record.hit);
        assert!((record.t - 4.0).abs() < 1e-10);

        let hit_point = ray.at(record.t);
        assert!(((hit_point - sphere.center()).norm() - 1.0).abs() < 1e-10);
        assert!((record.normal - Vec3::new(0.0, 0.0, 1.0)).norm() < 1e-10);
    }

    #[test]
    fn test_round_trip_at_offset() {
        // Sphere centered one radius off the ray's closest-approach point,
        // perpendicular to the ray: a tangent hit whose reported point lies
        // exactly one radius from the center.
        let r = 2.0;
        let ray = Ray::new(Point3::new(-10.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let sphere = Sphere::new(Point3::new(3.0, r, 0.0), r);
        let record = intersect_sphere(&ray, &sphere);
        assert!(record.hit);

        let hit_point = ray.at(record.t);
        assert!(((hit_point - sphere.center()).norm() - r).abs() < 1e-6);
        assert!((record.normal.norm() - 1.0).abs() < 1e-6);
        let radial = hit_point - sphere.center();
        assert!(record.normal.cross(&radial).norm() < 1e-6);
    }

    #[test]
    fn test_miss() {
        let sphere = Sphere::new(Point3::origin(), 1.0);
        let ray = Ray::new(Point3::new(0.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!intersect_sphere(&ray, &sphere).hit);
    }

    #[test]
    fn test_inside_reports_no_hit() {
        // The chord construction returns the smaller root; from inside the
        // sphere that root is behind the origin and the dispatch discards it.
        let shape = Shape::Sphere(Sphere::new(Point3::origin(), 1.0));
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, -1.0));
        assert!(!intersect(&ray, &shape).hit);
    }

    #[test]
    fn test_behind_origin_reports_no_hit() {
        let shape = Shape::Sphere(Sphere::new(Point3::new(0.0, 0.0, 10.0), 1.0));
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, -1.0));
        assert!(!intersect(&ray, &shape).hit);
    }
}
