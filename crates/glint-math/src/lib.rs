#![warn(missing_docs)]

//! Math types for the glint ray tracer.
//!
//! Thin wrappers around nalgebra providing the geometric vocabulary the
//! tracer works in: points, vectors, rays, planes, and the forward/inverse
//! affine transform pair that maps a canonical unit shape into world space.

use nalgebra::Vector4;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// A 4x4 affine transformation matrix.
pub type Mat4 = nalgebra::Matrix4<f64>;

/// Geometric tolerance shared by every intersection routine.
pub const EPSILON: f64 = 1e-6;

/// "Infinitely far" sentinel for ray parameters.
pub const DINF: f64 = 1e9;

/// A principal axis, used for shape rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

/// A ray defined by an origin and a direction.
///
/// The direction is stored as given; it is *not* normalized here, because
/// several intersection routines depend on the caller's parametrization.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub p: Point3,
    /// Direction of the ray.
    pub dir: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(p: Point3, dir: Vec3) -> Self {
        Self { p, dir }
    }

    /// Evaluate the ray at parameter `t`: `p + t * dir`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.p + self.dir * t
    }
}

/// A plane defined by a point and a normal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// A point on the plane.
    pub p: Point3,
    /// Normal of the plane (not required to be unit length).
    pub n: Vec3,
}

impl Plane {
    /// Create a new plane from a point and a normal.
    pub fn new(p: Point3, n: Vec3) -> Self {
        Self { p, n }
    }
}

/// A forward affine transform paired with its exact inverse.
///
/// Shapes use this to map their canonical unit form into world space. The
/// two matrices are only ever computed together, so they cannot be observed
/// out of sync. A singular forward matrix has no inverse; intersection
/// treats such a shape as unhittable.
#[derive(Debug, Clone, PartialEq)]
pub struct Affine {
    forward: Mat4,
    inverse: Option<Mat4>,
}

impl Affine {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            forward: Mat4::identity(),
            inverse: Some(Mat4::identity()),
        }
    }

    /// Build the transform whose columns are the three (already scaled)
    /// canonical basis images plus a translation, and compute its inverse.
    pub fn from_columns(x: Vec3, y: Vec3, z: Vec3, translation: Vec3) -> Self {
        let mut m = Mat4::identity();
        m.fixed_view_mut::<3, 1>(0, 0).copy_from(&x);
        m.fixed_view_mut::<3, 1>(0, 1).copy_from(&y);
        m.fixed_view_mut::<3, 1>(0, 2).copy_from(&z);
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        let inverse = m.try_inverse();
        Self { forward: m, inverse }
    }

    /// The forward (canonical-to-world) matrix.
    pub fn forward(&self) -> &Mat4 {
        &self.forward
    }

    /// The exact inverse of the forward matrix, if the forward matrix is
    /// invertible.
    pub fn inverse(&self) -> Option<&Mat4> {
        self.inverse.as_ref()
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

/// Transform a point by a 4x4 matrix, including the perspective divide.
pub fn transform_point(m: &Mat4, p: &Point3) -> Point3 {
    let v = m * Vector4::new(p.x, p.y, p.z, 1.0);
    Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
}

/// Transform a direction vector by a 4x4 matrix (homogeneous component 0).
pub fn transform_vec(m: &Mat4, v: &Vec3) -> Vec3 {
    let r = m * Vector4::new(v.x, v.y, v.z, 0.0);
    Vec3::new(r.x, r.y, r.z)
}

/// Parameter of the point on `ray` closest to `pt`.
///
/// The ray direction need not be unit length; the returned parameter is in
/// the ray's own parametrization.
pub fn point_ray_closest(pt: &Point3, ray: &Ray) -> f64 {
    (pt - ray.p).dot(&ray.dir) / ray.dir.dot(&ray.dir)
}

/// Distance from `pt` to the line carrying `ray`.
pub fn point_ray_dist(pt: &Point3, ray: &Ray) -> f64 {
    let closest = ray.at(point_ray_closest(pt, ray));
    (pt - closest).norm()
}

/// Distance between the two lines carrying `r1` and `r2`.
pub fn ray_ray_dist(r1: &Ray, r2: &Ray) -> f64 {
    let cross = r1.dir.cross(&r2.dir);
    let cross_norm = cross.norm();
    if cross_norm < EPSILON {
        // Parallel lines
        return point_ray_dist(&r2.p, r1);
    }
    (r2.p - r1.p).dot(&cross).abs() / cross_norm
}

/// Parameter at which `r` meets the plane `pl`.
///
/// A ray parallel to the plane divides by zero and produces an infinite
/// parameter; callers reject it through their range checks.
pub fn plane_ray(pl: &Plane, r: &Ray) -> f64 {
    (pl.p - r.p).dot(&pl.n) / r.dir.dot(&pl.n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        let p = ray.at(2.0);
        assert!((p - Point3::new(1.0, 4.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_affine_inverse_consistency() {
        let a = Affine::from_columns(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(1.0, 0.0, 4.0),
            Vec3::new(5.0, 6.0, 7.0),
        );
        let inv = a.inverse().unwrap();
        let product = a.forward() * inv;
        assert!((product - Mat4::identity()).norm() < 1e-10);
    }

    #[test]
    fn test_affine_degenerate_has_no_inverse() {
        // Two collinear columns make the transform singular.
        let a = Affine::from_columns(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::zeros(),
        );
        assert!(a.inverse().is_none());
    }

    #[test]
    fn test_transform_point_and_vec() {
        let a = Affine::from_columns(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let p = transform_point(a.forward(), &Point3::new(1.0, 1.0, 1.0));
        assert!((p - Point3::new(3.0, 3.0, 3.0)).norm() < 1e-12);

        // Vectors ignore translation.
        let v = transform_vec(a.forward(), &Vec3::new(1.0, 0.0, 0.0));
        assert!((v - Vec3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_point_ray_closest_unnormalized() {
        // Direction of length 2: the closest-approach parameter halves.
        let ray = Ray::new(Point3::origin(), Vec3::new(2.0, 0.0, 0.0));
        let t = point_ray_closest(&Point3::new(4.0, 3.0, 0.0), &ray);
        assert!((t - 2.0).abs() < 1e-12);
        assert!((point_ray_dist(&Point3::new(4.0, 3.0, 0.0), &ray) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_ray_dist() {
        let r1 = Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0));
        let r2 = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 1.0, 0.0));
        assert!((ray_ray_dist(&r1, &r2) - 5.0).abs() < 1e-12);

        // Parallel lines fall back to point-line distance.
        let r3 = Ray::new(Point3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!((ray_ray_dist(&r1, &r3) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_plane_ray() {
        let pl = Plane::new(Point3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, 1.0));
        let r = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, 1.0));
        assert!((plane_ray(&pl, &r) - 3.0).abs() < 1e-12);

        // Parallel ray: infinite parameter, not a panic.
        let r2 = Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0));
        assert!(plane_ray(&pl, &r2).is_infinite());
    }
}
