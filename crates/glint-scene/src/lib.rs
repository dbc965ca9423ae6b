#![warn(missing_docs)]

//! Scene model for the glint ray tracer.
//!
//! A scene is an ordered list of [`Shape`]s, a shape-to-[`Material`]
//! association, and an ordered list of point [`Light`]s. Shapes are a closed
//! sum type over the five supported kinds; every kind other than the sphere
//! carries a forward/inverse affine transform pair mapping its canonical
//! unit form into world space, rebuilt atomically on every parameter
//! mutation.
//!
//! Persistence is handled by [`doc`]: a purely declarative serde document,
//! converted to and from the live types so a deserialized shape can never
//! hold an inconsistent transform.

mod color;
pub mod doc;
mod error;
mod light;
mod material;
mod scene;
mod shape;

pub use color::Color;
pub use error::{Result, SceneError};
pub use light::Light;
pub use material::Material;
pub use scene::{Scene, ShapeId};
pub use shape::{Cone, Cuboid, Cylinder, Ellipsoid, Shape, ShapeKind, Sphere};
