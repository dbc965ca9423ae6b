//! Ray-cone intersection against the canonical unit cone.

use super::HitRecord;
use glint_math::{
    plane_ray, point_ray_closest, transform_point, transform_vec, Plane, Point3, Ray, Vec3,
    EPSILON,
};
use glint_scene::Cone;

/// Intersect a ray with a cone.
///
/// Canonical form: apex at local (0,0,1), base circle of radius 1 at z=0,
/// axis pointing from apex toward the base. The base disk is tested like a
/// cylinder cap; the lateral surface is solved by projecting the ray
/// through the apex into the base plane (a rational parametrization in the
/// axis-distance variable) and intersecting the projected line with the
/// base circle.
///
/// Unlike the other transformed shapes, the local direction is normalized
/// before solving, so the resulting parameter is divided by the
/// pre-normalization length to return to the world ray's parametrization.
/// The normal maps back through the inverse-transpose, which stays correct
/// under non-uniform scaling.
pub(super) fn intersect_cone(ray: &Ray, cone: &Cone) -> HitRecord {
    let Some(inv) = cone.affine().inverse() else {
        return HitRecord::miss();
    };
    let local_p = transform_point(inv, &ray.p);
    let local_dir = transform_vec(inv, &ray.dir);
    let dir_len = local_dir.norm();
    let local = Ray::new(local_p, local_dir.normalize());

    let apex = Vec3::new(0.0, 0.0, 1.0);
    let axis = Vec3::new(0.0, 0.0, -1.0);
    let base = Point3::origin();
    let rad2 = 1.0;

    let mut best = HitRecord::miss();

    // Base disk, tested like a cylinder cap.
    let bot_plane = Plane::new(base, axis);
    let bot_t = plane_ray(&bot_plane, &local);
    let e1 = local.at(bot_t);
    let bot_dist2 = (base - e1).dot(&(base - e1));
    let inside_bot = bot_dist2 < rad2 + EPSILON;

    if bot_t > EPSILON && inside_bot {
        best = HitRecord::hit(bot_t, bot_plane.n);
    }

    // Project the ray through the apex into the base plane. The projected
    // line is L*(t) = (X0 + t*X1) / (m0 + t*m1).
    let p = local.p.coords;
    let u = local.dir;
    let x0 = -p + (base.coords - p).dot(&axis) * apex;
    let x1 = -(u + u.dot(&axis) * apex);
    let m0 = (base.coords - p).dot(&axis) - 1.0;
    let m1 = -u.dot(&axis);

    if m0 == 0.0 && m1 == 0.0 {
        return HitRecord::miss();
    }

    let mut projected_point = Vec3::zeros();
    let mut projected_dir = Vec3::zeros();
    if m0 != 0.0 && m1 != 0.0 {
        projected_point = x0 / m0;
        projected_dir = x0 / m0 - x1 / m1;
    } else if m0 != 0.0 && m1.abs() < EPSILON {
        projected_point = x0 / m0;
        projected_dir = x1;
    } else if m0.abs() < EPSILON && m1 != 0.0 {
        projected_point = x1 / m1;
        projected_dir = x0;
    }

    let v_unit = projected_dir.normalize();
    let p_ray = Ray::new(Point3::from(projected_point), v_unit);

    // 2-D line-circle intersection in the base plane.
    let closest = point_ray_closest(&base, &p_ray);
    let circle_q = p_ray.at(closest);
    let w = circle_q - base;

    if w.dot(&w) < 1.0 {
        let x = (rad2 - w.dot(&w)).sqrt();
        let d1 = (circle_q - v_unit * x).coords;
        let d2 = (circle_q + v_unit * x).coords;

        // Invert the rational parametrization at each circle point.
        let n1 = x1 - d1 * m1;
        let t1 = (d1 * m0 - x0).dot(&n1) / n1.dot(&n1);
        let n2 = x1 - d2 * m1;
        let t2 = (d2 * m0 - x0).dot(&n2) / n2.dot(&n2);

        let hit_time = if t1 < t2 { t1 } else { t2 };
        let hit_point = local.at(hit_time);
        let z = hit_point.z;

        if hit_time > EPSILON && hit_time < best.t && z < 1.0 + EPSILON && z > EPSILON {
            let from_apex = hit_point.coords - apex;
            let normal = from_apex - from_apex.norm() / (0.5f64).sqrt() * axis;
            best = HitRecord::hit(hit_time, normal);
        }
    }

    if best.hit {
        best.normal = transform_vec(&inv.transpose(), &best.normal).normalize();
        best.t /= dir_len;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Base radius 1 at world z=0, apex at world z=1.
    fn unit_cone() -> Cone {
        Cone::new(
            Point3::origin(),
            Vec3::x(),
            Vec3::y(),
            Vec3::z(),
            2.0,
            2.0,
            1.0,
        )
    }

    #[test]
    fn test_lateral_hit() {
        let cone = unit_cone();
        // At z=0.5 the cone's radius is 0.5.
        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.5), Vec3::new(1.0, 0.0, 0.0));
        let record = intersect_cone(&ray, &cone);
        assert!(record.hit);
        assert!((record.t - 4.5).abs() < 1e-9);
        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        assert!((record.normal - expected).norm() < 1e-9);
    }

    #[test]
    fn test_base_hit_from_below() {
        let cone = unit_cone();
        let ray = Ray::new(Point3::new(0.3, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let record = intersect_cone(&ray, &cone);
        assert!(record.hit);
        assert!((record.t - 5.0).abs() < 1e-9);
        assert!((record.normal - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-9);
    }

    #[test]
    fn test_miss_beside_cone() {
        let cone = unit_cone();
        let ray = Ray::new(Point3::new(-5.0, 2.0, 0.5), Vec3::new(1.0, 0.0, 0.0));
        assert!(!intersect_cone(&ray, &cone).hit);
    }

    #[test]
    fn test_above_apex_misses() {
        let cone = unit_cone();
        let ray = Ray::new(Point3::new(-5.0, 0.0, 1.5), Vec3::new(1.0, 0.0, 0.0));
        assert!(!intersect_cone(&ray, &cone).hit);
    }

    #[test]
    fn test_scaled_cone_rescales_parameter() {
        // Radius 2 at the base, height 2: the local solve runs on a
        // normalized direction, so the reported parameter must still be in
        // the world ray's parametrization.
        let cone = Cone::new(
            Point3::origin(),
            Vec3::x(),
            Vec3::y(),
            Vec3::z(),
            4.0,
            4.0,
            2.0,
        );
        let ray = Ray::new(Point3::new(-5.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
        let record = intersect_cone(&ray, &cone);
        assert!(record.hit);
        assert!((record.t - 4.0).abs() < 1e-9);
        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        assert!((record.normal - expected).norm() < 1e-9);
    }

    #[test]
    fn test_lateral_normal_is_unit() {
        let cone = unit_cone();
        let ray = Ray::new(
            Point3::new(-5.0, 0.2, 0.3),
            Vec3::new(1.0, 0.0, 0.02).normalize(),
        );
        let record = intersect_cone(&ray, &cone);
        assert!(record.hit);
        assert!((record.normal.norm() - 1.0).abs() < 1e-6);
    }
}
