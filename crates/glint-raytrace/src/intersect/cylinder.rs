//! Ray-cylinder intersection against the canonical unit cylinder.

use super::HitRecord;
use glint_math::{
    plane_ray, point_ray_closest, ray_ray_dist, transform_point, transform_vec, Plane, Point3,
    Ray, Vec3, EPSILON,
};
use glint_scene::Cylinder;

/// A ray whose direction makes less than this with the cap planes is
/// treated as parallel to them.
const CAP_PARALLEL_TOL: f64 = 0.01;

/// Intersect a ray with a capped cylinder.
///
/// Canonical form: radius 1, axis along local +z, base disk at z=0, top
/// disk at z=1. The two cap planes are tested first; when only one (or
/// neither) disk is crossed, the lateral surface is solved as a 2-D
/// line-circle intersection of the ray segment between the two cap-plane
/// crossings, projected onto the base plane. Roots are mapped back to the
/// world ray's parametrization through the segment parameters.
pub(super) fn intersect_cylinder(ray: &Ray, cylinder: &Cylinder) -> HitRecord {
    let Some(inv) = cylinder.affine().inverse() else {
        return HitRecord::miss();
    };
    let local = Ray::new(
        transform_point(inv, &ray.p),
        transform_vec(inv, &ray.dir),
    );

    let axis = Vec3::z();
    let base = Point3::origin();
    let top = Point3::new(0.0, 0.0, 1.0);
    let rad2 = 1.0;

    // Nearly parallel to the caps: reject by distance to the mid plane.
    if axis.dot(&local.dir).abs() < CAP_PARALLEL_TOL {
        let half_center = Point3::new(0.0, 0.0, 0.5);
        if (local.p - half_center).dot(&axis).abs() > 0.5 {
            return HitRecord::miss();
        }
    }

    let bot_plane = Plane::new(base, -axis);
    let top_plane = Plane::new(top, axis);
    let bot_t = plane_ray(&bot_plane, &local);
    let top_t = plane_ray(&top_plane, &local);

    let e1 = local.at(bot_t);
    let e2 = local.at(top_t);

    let bot_dist2 = (base - e1).dot(&(base - e1));
    let top_dist2 = (top - e2).dot(&(top - e2));
    let inside_bot = bot_dist2 < rad2 + EPSILON;
    let inside_top = top_dist2 < rad2 + EPSILON;

    let forward = cylinder.affine().forward();

    // Crossing both disks means the ray runs cap to cap; the nearer cap is
    // the hit.
    if inside_bot && inside_top {
        let (t, n) = if bot_t < top_t {
            (bot_t, bot_plane.n)
        } else {
            (top_t, top_plane.n)
        };
        return HitRecord::hit(t, transform_vec(forward, &n).normalize());
    }

    // The segment between the two cap-plane crossings carries any lateral
    // hit.
    let e_ray = Ray::new(e1, e2 - e1);

    if ray_ray_dist(&Ray::new(base, axis), &e_ray) > 1.0 + EPSILON {
        return HitRecord::miss();
    }

    // Project the segment onto the plane perpendicular to the axis.
    let ppp = e_ray.p - (e_ray.p - base).dot(&axis) * axis;
    let vpp = e_ray.dir - e_ray.dir.dot(&axis) * axis;
    let vpp_unit = vpp.normalize();
    let pp_ray = Ray::new(ppp, vpp);

    // 2-D line-circle intersection.
    let closest = point_ray_closest(&base, &pp_ray);
    let circle_q = pp_ray.at(closest);
    let w = circle_q - base;
    let x = (rad2 - w.dot(&w)).sqrt();
    let d1 = circle_q - vpp_unit * x;
    let d2 = circle_q + vpp_unit * x;

    // The circle parameters hold for the projected ray and the segment
    // alike; a lateral hit needs them inside the segment.
    let t1 = (d1 - pp_ray.p).dot(&pp_ray.dir) / pp_ray.dir.dot(&pp_ray.dir);
    let t2 = (d2 - pp_ray.p).dot(&pp_ray.dir) / pp_ray.dir.dot(&pp_ray.dir);
    let d1_in_range = (0.0..=1.0).contains(&t1);
    let d2_in_range = (0.0..=1.0).contains(&t2);

    // Map the segment hits back onto the local ray's parametrization.
    let r1 = e_ray.at(t1);
    let r2 = e_ray.at(t2);
    let r1_t = (r1 - local.p).dot(&local.dir) / local.dir.dot(&local.dir);
    let r2_t = (r2 - local.p).dot(&local.dir) / local.dir.dot(&local.dir);

    let mut best = HitRecord::miss();

    if inside_bot && bot_t < best.t {
        best = HitRecord::hit(bot_t, bot_plane.n);
    }
    if inside_top && top_t < best.t {
        best = HitRecord::hit(top_t, top_plane.n);
    }
    if d1_in_range && r1_t < best.t {
        let point = local.at(r1_t);
        let radial = (point - base) - (point - base).dot(&axis) * axis;
        best = HitRecord::hit(r1_t, radial);
    }
    if d2_in_range && r2_t < best.t {
        let point = local.at(r2_t);
        let radial = (point - base) - (point - base).dot(&axis) * axis;
        best = HitRecord::hit(r2_t, radial);
    }

    if best.hit {
        best.normal = transform_vec(forward, &best.normal).normalize();
    }
    best
}
