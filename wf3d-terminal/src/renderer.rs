//! Character-grid line renderer for terminal output

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

/// Glyph ramp for depth shading (farthest to nearest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Draws line segments into a character buffer, keeping the nearest glyph
/// where segments cross
pub struct LineRenderer {
    width: usize,
    height: usize,
    near: f64,
    far: f64,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            near: -1.0,
            far: 1.0,
            depth_buffer: vec![f64::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        let size = width * height;
        self.width = width;
        self.height = height;
        self.depth_buffer = vec![f64::INFINITY; size];
        self.char_buffer = vec![' '; size];
    }

    /// Depth values mapped to the brightest and dimmest glyphs.
    /// Smaller depth is nearer to the viewer.
    pub fn set_depth_range(&mut self, near: f64, far: f64) {
        self.near = near;
        self.far = far;
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Rasterize a segment between two grid cells, interpolating depth
    /// linearly from `depth.0` to `depth.1`.
    ///
    /// The segment is clipped to the grid first, so far off-grid endpoints
    /// cost no more than on-grid ones.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), depth: (f64, f64)) {
        let start = (from.0 as f64, from.1 as f64);
        let end = (to.0 as f64, to.1 as f64);
        let Some((t0, t1)) = self.clip(start, end) else {
            return;
        };

        let point_at = |t: f64| {
            (
                (start.0 + (end.0 - start.0) * t).round() as i32,
                (start.1 + (end.1 - start.1) * t).round() as i32,
            )
        };
        let depth_at = |t: f64| depth.0 + (depth.1 - depth.0) * t;
        let (from, to) = (point_at(t0), point_at(t1));
        let depth = (depth_at(t0), depth_at(t1));

        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let steps = dx.max(-dy);
        let mut err = dx + dy;
        let mut step = 0;

        loop {
            let t = if steps == 0 {
                0.0
            } else {
                step as f64 / steps as f64
            };
            self.plot(x, y, depth.0 + (depth.1 - depth.0) * t);

            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step += 1;
        }
    }

    /// Liang-Barsky clip against the cell centers of the grid. Returns the
    /// parameter range of the visible part, or `None` when nothing is visible.
    fn clip(&self, start: (f64, f64), end: (f64, f64)) -> Option<(f64, f64)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        let x_max = self.width as f64 - 1.0;
        let y_max = self.height as f64 - 1.0;
        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;

        for (p, q) in [
            (-dx, start.0),
            (dx, x_max - start.0),
            (-dy, start.1),
            (dy, y_max - start.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((t0, t1))
    }

    fn plot(&mut self, x: i32, y: i32, depth: f64) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }

        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = self.glyph(depth);
        }
    }

    fn glyph(&self, depth: f64) -> char {
        let span = self.far - self.near;
        let t = if span.abs() < f64::EPSILON {
            0.0
        } else {
            ((depth - self.near) / span).clamp(0.0, 1.0)
        };
        let brightness = 1.0 - t;
        let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
        LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
    }

    pub fn cell(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> String {
        self.char_buffer[y * self.width..(y + 1) * self.width]
            .iter()
            .collect()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let c = self.cell(x, y);

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkRed,
                    '-' | '=' => Color::Red,
                    '+' | '*' => Color::Magenta,
                    '#' | '%' | '@' => Color::White,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_cells(renderer: &LineRenderer) -> usize {
        (0..renderer.height())
            .map(|y| renderer.row(y).chars().filter(|&c| c != ' ').count())
            .sum()
    }

    #[test]
    fn test_horizontal_line() {
        let mut renderer = LineRenderer::new(10, 3);
        renderer.draw_line((1, 1), (8, 1), (0.0, 0.0));
        // Mid-range depth gets a mid-ramp glyph
        assert_eq!(renderer.row(1), " ++++++++ ");
        assert_eq!(renderer.row(0), "          ");
    }

    #[test]
    fn test_diagonal_line_is_connected() {
        let mut renderer = LineRenderer::new(6, 6);
        renderer.draw_line((5, 0), (0, 5), (0.0, 0.0));
        for i in 0..6 {
            assert_ne!(renderer.cell(5 - i, i), ' ');
        }
        assert_eq!(lit_cells(&renderer), 6);
    }

    #[test]
    fn test_single_point_line() {
        let mut renderer = LineRenderer::new(4, 4);
        renderer.draw_line((2, 2), (2, 2), (0.0, 0.0));
        assert_eq!(lit_cells(&renderer), 1);
    }

    #[test]
    fn test_clips_to_grid() {
        let mut renderer = LineRenderer::new(5, 3);
        renderer.draw_line((-10, 1), (20, 1), (0.0, 0.0));
        assert_eq!(renderer.row(1).trim().len(), 5);

        renderer.clear();
        renderer.draw_line((-10, -1), (-2, 2), (0.0, 0.0));
        assert_eq!(lit_cells(&renderer), 0);
    }

    #[test]
    fn test_huge_coordinates_are_clipped() {
        let mut renderer = LineRenderer::new(80, 24);
        renderer.draw_line((-2_000_000_000, 12), (2_000_000_000, 12), (0.0, 0.0));
        assert_eq!(renderer.row(12).chars().filter(|&c| c != ' ').count(), 80);

        renderer.clear();
        renderer.draw_line((i32::MIN, i32::MIN), (i32::MAX, i32::MAX), (0.0, 0.0));
        assert!(lit_cells(&renderer) > 0);
        assert!(lit_cells(&renderer) <= 80 + 24);
    }

    #[test]
    fn test_clipped_line_keeps_depth_along_segment() {
        let mut renderer = LineRenderer::new(5, 1);
        renderer.set_depth_range(-1.0, 1.0);
        // Only the middle fifth of the segment is visible, at depth close to 0
        renderer.draw_line((-10, 0), (14, 0), (-1.0, 1.0));
        assert_eq!(renderer.cell(2, 0), '+');
    }

    #[test]
    fn test_depth_shading_and_occlusion() {
        let mut renderer = LineRenderer::new(5, 5);
        renderer.set_depth_range(-1.0, 1.0);

        renderer.draw_line((0, 2), (4, 2), (1.0, 1.0));
        assert_eq!(renderer.cell(2, 2), '.');

        // A nearer crossing segment wins the shared cell
        renderer.draw_line((2, 0), (2, 4), (-1.0, -1.0));
        assert_eq!(renderer.cell(2, 2), '@');

        // A farther one does not
        renderer.draw_line((0, 2), (4, 2), (0.5, 0.5));
        assert_eq!(renderer.cell(2, 2), '@');
        assert_ne!(renderer.cell(0, 2), '.');
    }

    #[test]
    fn test_resize_clears() {
        let mut renderer = LineRenderer::new(4, 4);
        renderer.draw_line((0, 0), (3, 3), (0.0, 0.0));
        renderer.resize(8, 2);
        assert_eq!(renderer.width(), 8);
        assert_eq!(renderer.row(1), "        ");
    }

    #[test]
    fn test_draw_queues_every_row() {
        let mut renderer = LineRenderer::new(3, 2);
        renderer.draw_line((0, 1), (2, 1), (-1.0, -1.0));
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches('@').count(), 3);
    }
}
