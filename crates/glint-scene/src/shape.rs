//! The five shape kinds and their transform maintenance.
//!
//! Every kind except the sphere owns a forward/inverse [`Affine`] pair that
//! maps its canonical unit form (unit cube, unit sphere, unit cylinder,
//! unit cone) into world space. The pair is rebuilt by every mutating
//! method, so it is always consistent with the parametric fields.

use glint_math::{Affine, Axis, Point3, Vec3};
use nalgebra::Matrix3;

/// The kind of a shape (for match-based dispatch and reporting).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Sphere.
    Sphere,
    /// Box spanned by three edge axes.
    Cuboid,
    /// Ellipsoid.
    Ellipsoid,
    /// Capped cylinder.
    Cylinder,
    /// Cone with a base disk.
    Cone,
}

/// Rotation by `d` radians about a principal axis.
fn axis_rotation(d: f64, axis: Axis) -> Matrix3<f64> {
    let (i0, i1) = match axis {
        Axis::X => (1, 2),
        Axis::Y => (2, 0),
        Axis::Z => (0, 1),
    };
    let (s, c) = d.sin_cos();
    let mut m = Matrix3::identity();
    m[(i0, i0)] = c;
    m[(i0, i1)] = s;
    m[(i1, i0)] = -s;
    m[(i1, i1)] = c;
    m
}

/// A sphere, intersected directly in world space; it carries no transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Create a sphere from center and radius.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Center of the sphere.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Radius of the sphere.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Replace the center.
    pub fn set_center(&mut self, center: Point3) {
        self.center = center;
    }

    /// Replace the radius.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// Move the sphere.
    pub fn translate(&mut self, trans: &Vec3) {
        self.center += *trans;
    }

    /// Rotation does not affect a sphere.
    pub fn rotate(&mut self, _d: f64, _axis: Axis) {}
}

/// A box spanned from a corner by three edge axes with separate extents.
///
/// The axes are not required to be orthonormal; together with the extents
/// they define the affine image of the unit cube `[0,1]^3`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    corner: Point3,
    length_axis: Vec3,
    width_axis: Vec3,
    height_axis: Vec3,
    length: f64,
    width: f64,
    height: f64,
    center: Point3,
    affine: Affine,
}

impl Cuboid {
    /// Create a box from a corner, three edge axes, and their extents.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        corner: Point3,
        length_axis: Vec3,
        width_axis: Vec3,
        height_axis: Vec3,
        length: f64,
        width: f64,
        height: f64,
    ) -> Self {
        let mut cuboid = Self {
            corner,
            length_axis,
            width_axis,
            height_axis,
            length,
            width,
            height,
            center: corner,
            affine: Affine::identity(),
        };
        cuboid.update_transform();
        cuboid
    }

    fn update_transform(&mut self) {
        let mut center = self.corner;
        center += self.length_axis * (self.length / 2.0);
        center += self.width_axis * (self.width / 2.0);
        center += self.height_axis * (self.height / 2.0);
        self.center = center;

        self.affine = Affine::from_columns(
            self.length_axis * self.length,
            self.width_axis * self.width,
            self.height_axis * self.height,
            self.corner.coords,
        );
    }

    /// The stored corner (image of the canonical origin).
    pub fn corner(&self) -> Point3 {
        self.corner
    }

    /// Derived center of the box.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Extents along the three edge axes.
    pub fn extents(&self) -> (f64, f64, f64) {
        (self.length, self.width, self.height)
    }

    /// The forward/inverse transform pair.
    pub fn affine(&self) -> &Affine {
        &self.affine
    }

    /// Replace the corner.
    pub fn set_corner(&mut self, corner: Point3) {
        self.corner = corner;
        self.update_transform();
    }

    /// Replace the extents.
    pub fn set_extents(&mut self, length: f64, width: f64, height: f64) {
        self.length = length;
        self.width = width;
        self.height = height;
        self.update_transform();
    }

    /// Replace the edge axes.
    pub fn set_axes(&mut self, length_axis: Vec3, width_axis: Vec3, height_axis: Vec3) {
        self.length_axis = length_axis;
        self.width_axis = width_axis;
        self.height_axis = height_axis;
        self.update_transform();
    }

    /// Move the box.
    pub fn translate(&mut self, trans: &Vec3) {
        self.corner += *trans;
        self.update_transform();
    }

    /// Rotate the box about its center.
    pub fn rotate(&mut self, d: f64, axis: Axis) {
        let m = axis_rotation(d, axis);
        let cv = self.corner - self.center;

        self.length_axis = m * self.length_axis;
        self.width_axis = m * self.width_axis;
        self.height_axis = m * self.height_axis;

        // The corner orbits the center.
        self.corner = self.center + m * cv;

        self.update_transform();
    }
}

/// An ellipsoid: the affine image of the canonical unit sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    center: Point3,
    length_axis: Vec3,
    width_axis: Vec3,
    height_axis: Vec3,
    length: f64,
    width: f64,
    height: f64,
    affine: Affine,
}

impl Ellipsoid {
    /// Create an ellipsoid from its center, three axes, and their extents.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        center: Point3,
        length_axis: Vec3,
        width_axis: Vec3,
        height_axis: Vec3,
        length: f64,
        width: f64,
        height: f64,
    ) -> Self {
        let mut ellipsoid = Self {
            center,
            length_axis,
            width_axis,
            height_axis,
            length,
            width,
            height,
            affine: Affine::identity(),
        };
        ellipsoid.update_transform();
        ellipsoid
    }

    fn update_transform(&mut self) {
        self.affine = Affine::from_columns(
            self.length_axis * self.length,
            self.width_axis * self.width,
            self.height_axis * self.height,
            self.center.coords,
        );
    }

    /// Center of the ellipsoid.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// The forward/inverse transform pair.
    pub fn affine(&self) -> &Affine {
        &self.affine
    }

    /// Replace the center.
    pub fn set_center(&mut self, center: Point3) {
        self.center = center;
        self.update_transform();
    }

    /// Replace the extents.
    pub fn set_extents(&mut self, length: f64, width: f64, height: f64) {
        self.length = length;
        self.width = width;
        self.height = height;
        self.update_transform();
    }

    /// Replace the axes.
    pub fn set_axes(&mut self, length_axis: Vec3, width_axis: Vec3, height_axis: Vec3) {
        self.length_axis = length_axis;
        self.width_axis = width_axis;
        self.height_axis = height_axis;
        self.update_transform();
    }

    /// Move the ellipsoid.
    pub fn translate(&mut self, trans: &Vec3) {
        self.center += *trans;
        self.update_transform();
    }

    /// Rotate the ellipsoid about its center.
    pub fn rotate(&mut self, d: f64, axis: Axis) {
        let m = axis_rotation(d, axis);
        self.length_axis = m * self.length_axis;
        self.width_axis = m * self.width_axis;
        self.height_axis = m * self.height_axis;
        self.update_transform();
    }
}

/// A capped cylinder: the affine image of the canonical unit cylinder
/// (radius 1, axis along local +z, base at z=0, height 1).
///
/// The length/width extents are diameters in the cap plane, so the matrix
/// columns carry half of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    center: Point3,
    length_axis: Vec3,
    width_axis: Vec3,
    height_axis: Vec3,
    length: f64,
    width: f64,
    height: f64,
    affine: Affine,
}

impl Cylinder {
    /// Create a cylinder from its center, three axes, and their extents.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        center: Point3,
        length_axis: Vec3,
        width_axis: Vec3,
        height_axis: Vec3,
        length: f64,
        width: f64,
        height: f64,
    ) -> Self {
        let mut cylinder = Self {
            center,
            length_axis,
            width_axis,
            height_axis,
            length,
            width,
            height,
            affine: Affine::identity(),
        };
        cylinder.update_transform();
        cylinder
    }

    fn update_transform(&mut self) {
        self.affine = Affine::from_columns(
            self.length_axis * (self.length / 2.0),
            self.width_axis * (self.width / 2.0),
            self.height_axis * self.height,
            self.center.coords,
        );
    }

    /// Center of the cylinder (image of the canonical base center).
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// The forward/inverse transform pair.
    pub fn affine(&self) -> &Affine {
        &self.affine
    }

    /// Replace the center.
    pub fn set_center(&mut self, center: Point3) {
        self.center = center;
        self.update_transform();
    }

    /// Replace the extents.
    pub fn set_extents(&mut self, length: f64, width: f64, height: f64) {
        self.length = length;
        self.width = width;
        self.height = height;
        self.update_transform();
    }

    /// Replace the axes.
    pub fn set_axes(&mut self, length_axis: Vec3, width_axis: Vec3, height_axis: Vec3) {
        self.length_axis = length_axis;
        self.width_axis = width_axis;
        self.height_axis = height_axis;
        self.update_transform();
    }

    /// Move the cylinder.
    pub fn translate(&mut self, trans: &Vec3) {
        self.center += *trans;
        self.update_transform();
    }

    /// Rotate the cylinder about its center.
    pub fn rotate(&mut self, d: f64, axis: Axis) {
        let m = axis_rotation(d, axis);
        self.length_axis = m * self.length_axis;
        self.width_axis = m * self.width_axis;
        self.height_axis = m * self.height_axis;
        self.update_transform();
    }
}

/// A cone: the affine image of the canonical unit cone (apex at local
/// (0,0,1), base circle of radius 1 at z=0).
///
/// Same column construction as [`Cylinder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cone {
    center: Point3,
    length_axis: Vec3,
    width_axis: Vec3,
    height_axis: Vec3,
    length: f64,
    width: f64,
    height: f64,
    affine: Affine,
}

impl Cone {
    /// Create a cone from its center, three axes, and their extents.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        center: Point3,
        length_axis: Vec3,
        width_axis: Vec3,
        height_axis: Vec3,
        length: f64,
        width: f64,
        height: f64,
    ) -> Self {
        let mut cone = Self {
            center,
            length_axis,
            width_axis,
            height_axis,
            length,
            width,
            height,
            affine: Affine::identity(),
        };
        cone.update_transform();
        cone
    }

    fn update_transform(&mut self) {
        self.affine = Affine::from_columns(
            self.length_axis * (self.length / 2.0),
            self.width_axis * (self.width / 2.0),
            self.height_axis * self.height,
            self.center.coords,
        );
    }

    /// Center of the cone (image of the canonical base center).
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// The forward/inverse transform pair.
    pub fn affine(&self) -> &Affine {
        &self.affine
    }

    /// Replace the center.
    pub fn set_center(&mut self, center: Point3) {
        self.center = center;
        self.update_transform();
    }

    /// Replace the extents.
    pub fn set_extents(&mut self, length: f64, width: f64, height: f64) {
        self.length = length;
        self.width = width;
        self.height = height;
        self.update_transform();
    }

    /// Replace the axes.
    pub fn set_axes(&mut self, length_axis: Vec3, width_axis: Vec3, height_axis: Vec3) {
        self.length_axis = length_axis;
        self.width_axis = width_axis;
        self.height_axis = height_axis;
        self.update_transform();
    }

    /// Move the cone.
    pub fn translate(&mut self, trans: &Vec3) {
        self.center += *trans;
        self.update_transform();
    }

    /// Rotate the cone about its center.
    pub fn rotate(&mut self, d: f64, axis: Axis) {
        let m = axis_rotation(d, axis);
        self.length_axis = m * self.length_axis;
        self.width_axis = m * self.width_axis;
        self.height_axis = m * self.height_axis;
        self.update_transform();
    }
}

/// A shape in the scene: a closed sum over the five supported kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A sphere.
    Sphere(Sphere),
    /// A box.
    Cuboid(Cuboid),
    /// An ellipsoid.
    Ellipsoid(Ellipsoid),
    /// A capped cylinder.
    Cylinder(Cylinder),
    /// A cone with a base disk.
    Cone(Cone),
}

impl Shape {
    /// The kind of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere(_) => ShapeKind::Sphere,
            Shape::Cuboid(_) => ShapeKind::Cuboid,
            Shape::Ellipsoid(_) => ShapeKind::Ellipsoid,
            Shape::Cylinder(_) => ShapeKind::Cylinder,
            Shape::Cone(_) => ShapeKind::Cone,
        }
    }

    /// Move the shape.
    pub fn translate(&mut self, trans: &Vec3) {
        match self {
            Shape::Sphere(s) => s.translate(trans),
            Shape::Cuboid(s) => s.translate(trans),
            Shape::Ellipsoid(s) => s.translate(trans),
            Shape::Cylinder(s) => s.translate(trans),
            Shape::Cone(s) => s.translate(trans),
        }
    }

    /// Rotate the shape about its center by `d` radians around a principal
    /// axis.
    pub fn rotate(&mut self, d: f64, axis: Axis) {
        match self {
            Shape::Sphere(s) => s.rotate(d, axis),
            Shape::Cuboid(s) => s.rotate(d, axis),
            Shape::Ellipsoid(s) => s.rotate(d, axis),
            Shape::Cylinder(s) => s.rotate(d, axis),
            Shape::Cone(s) => s.rotate(d, axis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Mat4;

    fn forward_inverse_consistent(affine: &Affine) -> bool {
        match affine.inverse() {
            Some(inv) => (affine.forward() * inv - Mat4::identity()).norm() < 1e-9,
            None => false,
        }
    }

    #[test]
    fn test_cuboid_center_derived() {
        let c = Cuboid::new(
            Point3::origin(),
            Vec3::x(),
            Vec3::y(),
            Vec3::z(),
            2.0,
            4.0,
            6.0,
        );
        assert!((c.center() - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
        assert!(forward_inverse_consistent(c.affine()));
    }

    #[test]
    fn test_cuboid_transform_maps_unit_cube() {
        let c = Cuboid::new(
            Point3::new(1.0, 1.0, 1.0),
            Vec3::x(),
            Vec3::y(),
            Vec3::z(),
            2.0,
            2.0,
            2.0,
        );
        let far = glint_math::transform_point(c.affine().forward(), &Point3::new(1.0, 1.0, 1.0));
        assert!((far - Point3::new(3.0, 3.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_mutation_keeps_pair_in_sync() {
        let mut e = Ellipsoid::new(
            Point3::origin(),
            Vec3::x(),
            Vec3::y(),
            Vec3::z(),
            1.0,
            2.0,
            3.0,
        );
        assert!(forward_inverse_consistent(e.affine()));

        e.translate(&Vec3::new(5.0, 0.0, 0.0));
        assert!(forward_inverse_consistent(e.affine()));
        assert!((e.center() - Point3::new(5.0, 0.0, 0.0)).norm() < 1e-12);

        e.rotate(std::f64::consts::FRAC_PI_2, Axis::Z);
        assert!(forward_inverse_consistent(e.affine()));

        e.set_extents(4.0, 4.0, 4.0);
        assert!(forward_inverse_consistent(e.affine()));
    }

    #[test]
    fn test_cuboid_rotation_orbits_corner() {
        let mut c = Cuboid::new(
            Point3::origin(),
            Vec3::x(),
            Vec3::y(),
            Vec3::z(),
            2.0,
            2.0,
            2.0,
        );
        let center_before = c.center();
        c.rotate(std::f64::consts::PI, Axis::Z);
        // A half turn about the center through z sends the corner to the
        // opposite side in x/y; z is unchanged.
        assert!((c.center() - center_before).norm() < 1e-9);
        assert!((c.corner() - Point3::new(2.0, 2.0, 0.0)).norm() < 1e-9);
        assert!(forward_inverse_consistent(c.affine()));
    }

    #[test]
    fn test_degenerate_extents_lose_inverse() {
        let c = Cylinder::new(
            Point3::origin(),
            Vec3::x(),
            Vec3::y(),
            Vec3::z(),
            0.0,
            1.0,
            1.0,
        );
        assert!(c.affine().inverse().is_none());
    }
}
