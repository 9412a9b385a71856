//! Orthographic viewport mapping for wireframe drawing

use crate::geometry::Vertex;

/// Terminal cells are roughly twice as tall as they are wide
pub const DEFAULT_ASPECT: f64 = 2.0;

/// Share of the smaller half-extent an auto-fitted shape occupies
const FIT_FILL: f64 = 0.8;

/// Maps rotated vertices onto a character grid by dropping the z coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Grid rows per world unit
    pub scale: f64,
    /// Horizontal stretch applied on top of `scale`
    pub aspect: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale: f64, aspect: f64) -> Self {
        Self {
            width,
            height,
            scale,
            aspect,
        }
    }

    /// Pick a scale so that a shape of the given bounding radius fills most of
    /// the grid without leaving it at any rotation.
    pub fn fitting(width: u32, height: u32, radius: f64, aspect: f64) -> Self {
        let half_height = height as f64 / 2.0;
        let half_width = width as f64 / 2.0 / aspect;
        let scale = if radius > 0.0 {
            FIT_FILL * half_height.min(half_width) / radius
        } else {
            1.0
        };

        Self::new(width, height, scale, aspect)
    }

    /// Grid cell `(column, row)` of a vertex; may lie outside the grid
    pub fn fit(&self, vertex: &Vertex) -> (i32, i32) {
        let column = self.scale * self.aspect * vertex.x() + self.width as f64 / 2.0;
        let row = self.scale * vertex.y() + self.height as f64 / 2.0;
        (column.round() as i32, row.round() as i32)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24, 10.0, DEFAULT_ASPECT)
    }
}
