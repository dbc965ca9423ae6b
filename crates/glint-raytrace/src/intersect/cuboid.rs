//! Ray-box intersection against the canonical unit cube.

use super::HitRecord;
use glint_math::{plane_ray, transform_point, transform_vec, Plane, Point3, Ray, Vec3, EPSILON};
use glint_scene::Cuboid;

/// Intersect a ray with a box.
///
/// The ray is mapped into the box's canonical space, where the box is the
/// unit cube `[0,1]^3`; each of the six face planes is tested and a hit is
/// accepted when the two in-plane coordinates land in the unit square. The
/// face normal is mapped back through the forward matrix and renormalized.
pub(super) fn intersect_cuboid(ray: &Ray, cuboid: &Cuboid) -> HitRecord {
    let Some(inv) = cuboid.affine().inverse() else {
        return HitRecord::miss();
    };
    let local = Ray::new(
        transform_point(inv, &ray.p),
        transform_vec(inv, &ray.dir),
    );

    // Six face planes with the indices of their two free coordinates.
    let faces = [
        (
            Plane::new(Point3::new(0.5, 0.5, 0.0), Vec3::new(0.0, 0.0, -1.0)),
            0,
            1,
        ),
        (
            Plane::new(Point3::new(0.5, 0.5, 1.0), Vec3::new(0.0, 0.0, 1.0)),
            0,
            1,
        ),
        (
            Plane::new(Point3::new(0.5, 0.0, 0.5), Vec3::new(0.0, -1.0, 0.0)),
            0,
            2,
        ),
        (
            Plane::new(Point3::new(0.5, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)),
            0,
            2,
        ),
        (
            Plane::new(Point3::new(0.0, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0)),
            1,
            2,
        ),
        (
            Plane::new(Point3::new(1.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0)),
            1,
            2,
        ),
    ];

    let mut best = HitRecord::miss();
    for (plane, a0, a1) in faces {
        let t = plane_ray(&plane, &local);
        let hit_point = local.at(t);
        if t > EPSILON
            && best.t > t
            && hit_point[a0] >= 0.0
            && hit_point[a0] <= 1.0
            && hit_point[a1] >= 0.0
            && hit_point[a1] <= 1.0
        {
            best = HitRecord::hit(t, plane.n);
        }
    }

    if best.hit {
        best.normal = transform_vec(cuboid.affine().forward(), &best.normal).normalize();
    }
    best
}
