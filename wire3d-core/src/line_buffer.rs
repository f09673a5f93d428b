/// Per-frame list of projected line vertices handed to the renderer
use nalgebra::Point2;

use crate::error::{Error, Result};
use crate::geometry::Rgb;

/// Default vertex capacity, enough for 500 segments per frame
pub const MAX_VERTICES: usize = 1000;

/// Fixed-capacity vertex store rebuilt every frame
///
/// Positions and colors are allocated once up front. A cursor counts the
/// vertices written this frame; every consecutive pair forms one line.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    positions: Vec<Point2<f32>>,
    colors: Vec<Rgb>,
    len: usize,
    current_color: Rgb,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_VERTICES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: vec![Point2::origin(); capacity],
            colors: vec![Rgb::default(); capacity],
            len: 0,
            current_color: Rgb::default(),
        }
    }

    /// Forget last frame's vertices; capacity is kept
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Color used by subsequent [`push_line`](Self::push_line) calls
    pub fn set_color(&mut self, color: Rgb) {
        self.current_color = color;
    }

    /// Append one segment in the current color
    ///
    /// Fails without writing anything if both endpoints do not fit.
    pub fn push_line(&mut self, start: Point2<f32>, end: Point2<f32>) -> Result<()> {
        if self.len + 2 > self.capacity() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        for point in [start, end] {
            self.positions[self.len] = point;
            self.colors[self.len] = self.current_color;
            self.len += 1;
        }
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Number of vertices written this frame (always even)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn positions(&self) -> &[Point2<f32>] {
        &self.positions[..self.len]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors[..self.len]
    }

    /// This frame's vertices in order; each consecutive pair is a line
    pub fn vertices(&self) -> impl Iterator<Item = (Point2<f32>, Rgb)> + '_ {
        self.positions().iter().copied().zip(self.colors().iter().copied())
    }

    /// This frame's vertices grouped into `(start, end, color)` lines
    pub fn lines(&self) -> impl Iterator<Item = (Point2<f32>, Point2<f32>, Rgb)> + '_ {
        self.positions()
            .chunks_exact(2)
            .zip(self.colors().chunks_exact(2))
            .map(|(p, c)| (p[0], p[1], c[0]))
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BLACK, RED};

    #[test]
    fn test_push_and_read_back() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.capacity(), MAX_VERTICES);
        assert!(buffer.is_empty());

        buffer.set_color(RED);
        buffer.push_line(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)).unwrap();
        buffer.set_color(BLACK);
        buffer.push_line(Point2::new(-1.0, 0.5), Point2::new(0.25, -0.5)).unwrap();

        assert_eq!(buffer.len(), 4);
        let vertices: Vec<_> = buffer.vertices().collect();
        assert_eq!(vertices[0], (Point2::new(0.0, 0.0), RED));
        assert_eq!(vertices[1], (Point2::new(1.0, 1.0), RED));
        assert_eq!(vertices[3], (Point2::new(0.25, -0.5), BLACK));

        let lines: Vec<_> = buffer.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].2, BLACK);
    }

    #[test]
    fn test_reset_rewinds_cursor() {
        let mut buffer = LineBuffer::with_capacity(4);
        buffer.push_line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap();
        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(buffer.positions().len(), 0);
        assert_eq!(buffer.capacity(), 4);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut buffer = LineBuffer::with_capacity(4);
        let p = Point2::new(0.0, 0.0);
        buffer.push_line(p, p).unwrap();
        buffer.push_line(p, p).unwrap();

        let err = buffer.push_line(p, p).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { capacity: 4 }));
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_odd_capacity_never_half_writes() {
        let mut buffer = LineBuffer::with_capacity(3);
        let p = Point2::new(0.0, 0.0);
        buffer.push_line(p, p).unwrap();
        assert!(buffer.push_line(p, p).is_err());
        assert_eq!(buffer.len(), 2);
    }
}
