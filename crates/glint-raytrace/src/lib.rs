#![warn(missing_docs)]

//! Recursive Whitted ray tracing for glint scenes.
//!
//! This crate traces scenes of implicit quadric-family shapes under affine
//! transforms: per-shape canonical-space intersection, recursive shading
//! with Phong illumination, transparency-attenuated shadows, reflection and
//! refraction, and an incremental pixel-fill frame driver.
//!
//! # Architecture
//!
//! - [`intersect`] - Ray-shape intersection algorithms for each shape kind
//! - [`HitRecord`] - Intersection result with ray parameter and normal
//! - [`Tracer`] - The recursive shader over a validated scene snapshot
//! - [`FrameRenderer`] - Incremental row-major pixel-fill driver
//!
//! # Example
//!
//! ```ignore
//! use glint_raytrace::{FrameRenderer, Tracer, Viewport};
//!
//! let tracer = Tracer::new(&scene)?;
//! let mut frame = FrameRenderer::new();
//! frame.begin_frame(&view, &proj, Viewport { x: 0, y: 0, width: 800, height: 600 })?;
//! while !frame.advance(&tracer, 30_000) {
//!     // redraw partial progress
//! }
//! ```

pub mod intersect;
mod frame;
mod tracer;

pub use frame::{FrameError, FrameRenderer, Viewport};
pub use intersect::HitRecord;
pub use tracer::{Tracer, MAX_DEPTH, SHADOW_MIN_T};
