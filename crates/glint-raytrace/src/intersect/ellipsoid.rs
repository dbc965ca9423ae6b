//! Ray-ellipsoid intersection against the canonical unit sphere.

use super::HitRecord;
use glint_math::{transform_point, transform_vec, Point3, Ray, EPSILON};
use glint_scene::Ellipsoid;

/// Intersect a ray with an ellipsoid.
///
/// The ray is mapped into canonical space, where the ellipsoid is the unit
/// sphere, and solved with the same chord construction as the world-space
/// sphere. The distance work uses a normalized copy of the local direction,
/// but the parameter is produced against the unnormalized direction so it
/// stays consistent with the world ray's parametrization.
pub(super) fn intersect_ellipsoid(ray: &Ray, ellipsoid: &Ellipsoid) -> HitRecord {
    let Some(inv) = ellipsoid.affine().inverse() else {
        return HitRecord::miss();
    };
    let local = Ray::new(
        transform_point(inv, &ray.p),
        transform_vec(inv, &ray.dir),
    );

    let center = Point3::origin();
    let v = local.dir.normalize();

    let c2p = local.p - center;
    let p2q = c2p.dot(&v);
    let d2 = c2p.dot(&c2p) - p2q * p2q;

    if d2 > 1.0 + EPSILON {
        return HitRecord::miss();
    }

    let w = c2p - v * p2q;
    let q = center + w;
    let x = (1.0 - w.dot(&w)).sqrt();
    let a = q - v * x;
    let t = (a - local.p).dot(&local.dir) / local.dir.dot(&local.dir);

    let normal = transform_vec(ellipsoid.affine().forward(), &(a - center)).normalize();
    HitRecord::hit(t, normal)
}
