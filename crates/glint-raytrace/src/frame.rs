//! Incremental frame rendering: unprojection, pixel buffer, progress cursor.

use crate::tracer::Tracer;
use glint_math::{transform_point, Mat4, Point3, Ray};
use thiserror::Error;

/// Errors raised when starting a frame.
#[derive(Error, Debug)]
pub enum FrameError {
    /// The combined view-projection matrix cannot be inverted.
    #[error("view-projection matrix is not invertible")]
    SingularViewProjection,
}

/// The target viewport rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Left edge of the viewport.
    pub x: i32,
    /// Bottom edge of the viewport.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Incremental row-major pixel-fill driver.
///
/// [`FrameRenderer::begin_frame`] fixes the camera and (re)allocates the
/// RGBA f32 buffer; [`FrameRenderer::advance`] then traces a bounded number
/// of pixels per call so a caller can interleave rendering with display
/// refreshes. Channel values are stored unclamped; alpha is fixed at 1.
pub struct FrameRenderer {
    viewport: Viewport,
    inv_view_proj: Mat4,
    pixels: Vec<f32>,
    cursor: usize,
}

impl FrameRenderer {
    /// Create a renderer with no allocated frame.
    pub fn new() -> Self {
        Self {
            viewport: Viewport {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            },
            inv_view_proj: Mat4::identity(),
            pixels: Vec::new(),
            cursor: 0,
        }
    }

    /// Start a frame for the given camera and viewport.
    ///
    /// The pixel buffer is reallocated when the viewport size changed; the
    /// progress cursor rewinds to the first pixel either way.
    pub fn begin_frame(
        &mut self,
        view: &Mat4,
        proj: &Mat4,
        viewport: Viewport,
    ) -> Result<(), FrameError> {
        let combined = proj * view;
        self.inv_view_proj = combined
            .try_inverse()
            .ok_or(FrameError::SingularViewProjection)?;

        let len = viewport.width as usize * viewport.height as usize * 4;
        if self.pixels.len() != len {
            self.pixels = vec![0.0; len];
        }
        self.viewport = viewport;
        self.cursor = 0;
        log::debug!(
            "beginning {}x{} frame",
            viewport.width,
            viewport.height
        );
        Ok(())
    }

    /// Map a pixel coordinate and a depth parameter in [0, 1] to the world
    /// point on the corresponding camera ray.
    pub fn unproject(&self, px: f64, py: f64, depth: f64) -> Point3 {
        let ndc = Point3::new(
            (px - self.viewport.x as f64) / self.viewport.width as f64 * 2.0 - 1.0,
            (py - self.viewport.y as f64) / self.viewport.height as f64 * 2.0 - 1.0,
            depth * 2.0 - 1.0,
        );
        transform_point(&self.inv_view_proj, &ndc)
    }

    /// The primary ray through a pixel: origin on the near plane, unit
    /// direction toward the far plane.
    pub fn primary_ray(&self, px: f64, py: f64) -> Ray {
        let origin = self.unproject(px, py, 0.0);
        let through = self.unproject(px, py, 1.0);
        Ray::new(origin, (through - origin).normalize())
    }

    /// Trace up to `step` pixels in row-major order from the cursor.
    ///
    /// Returns true once the frame is complete. Tracing a pixel runs to
    /// completion; only the boundary between pixels is interruptible.
    pub fn advance(&mut self, tracer: &Tracer, step: usize) -> bool {
        let width = self.viewport.width as usize;
        let size = width * self.viewport.height as usize;
        let end = size.min(self.cursor + step);

        for j in self.cursor..end {
            let x = j % width;
            let y = j / width;

            let ray = self.primary_ray(x as f64, y as f64);
            let color = tracer.trace(&ray, 0, 1.0);

            let offset = j * 4;
            self.pixels[offset] = color.r as f32;
            self.pixels[offset + 1] = color.g as f32;
            self.pixels[offset + 2] = color.b as f32;
            self.pixels[offset + 3] = 1.0;
        }

        self.cursor = end;
        self.cursor >= size
    }

    /// The row-major RGBA pixel buffer.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Number of pixels traced so far this frame.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.viewport.height
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}
