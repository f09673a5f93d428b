/// Character-cell line rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use std::io::Write;
use wire3d_core::{LineBuffer, Rgb};

/// Backdrop the wireframe is drawn over
const BACKGROUND: Color = Color::Rgb { r: 77, g: 128, b: 179 };

/// A cell that has been drawn into
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stroke {
    glyph: char,
    color: Rgb,
}

/// Renderer that rasterizes projected line segments into terminal cells
pub struct LineRenderer {
    width: usize,
    height: usize,
    cells: Vec<Option<Stroke>>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Rasterize every line of the frame; later lines overwrite earlier ones
    pub fn render_lines(&mut self, buffer: &LineBuffer) {
        for (start, end, color) in buffer.lines() {
            self.render_line(start, end, color);
        }
    }

    /// Rasterize one segment given in device coordinates
    ///
    /// Segments with a non-finite endpoint are skipped; the rest are cut
    /// to the [-1, 1] square first.
    pub fn render_line(&mut self, start: Point2<f32>, end: Point2<f32>, color: Rgb) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let Some((start, end)) = clip_to_viewport(start, end) else {
            return;
        };

        let (x0, y0) = self.to_cell(start);
        let (x1, y1) = self.to_cell(end);
        let glyph = glyph_for(x1 - x0, y1 - y0);

        for (x, y) in bresenham(x0, y0, x1, y1) {
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = Some(Stroke { glyph, color });
            }
        }
    }

    /// Device x grows right and y grows up; rows grow down.
    fn to_cell(&self, p: Point2<f32>) -> (i32, i32) {
        let x = (p.x + 1.0) * 0.5 * (self.width - 1) as f32;
        let y = (1.0 - p.y) * 0.5 * (self.height - 1) as f32;
        (x.round() as i32, y.round() as i32)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Glyph at a cell, or a space if nothing was drawn there
    pub fn glyph_at(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x].map_or(' ', |s| s.glyph)
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(BACKGROUND))?;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                match self.cells[y * self.width + x] {
                    Some(stroke) => {
                        writer.queue(SetForegroundColor(to_terminal_color(stroke.color)))?;
                        writer.queue(Print(stroke.glyph))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_terminal_color(color: Rgb) -> Color {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// Pick a glyph that follows the direction of a line in cell space
fn glyph_for(dx: i32, dy: i32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax == 0 && ay == 0 {
        '+'
    } else if ay * 2 < ax {
        '-'
    } else if ax * 2 < ay {
        '|'
    } else if (dx > 0) == (dy > 0) {
        // Rows grow downward, so a down-right line leans like a backslash.
        '\\'
    } else {
        '/'
    }
}

/// Cut a device-space segment to the [-1, 1] square (Liang-Barsky)
pub fn clip_to_viewport(start: Point2<f32>, end: Point2<f32>) -> Option<(Point2<f32>, Point2<f32>)> {
    if !(start.x.is_finite() && start.y.is_finite() && end.x.is_finite() && end.y.is_finite()) {
        return None;
    }

    let d = end - start;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    let edges = [
        (-d.x, start.x + 1.0),
        (d.x, 1.0 - start.x),
        (-d.y, start.y + 1.0),
        (d.y, 1.0 - start.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((start + d * t0, start + d * t1))
}

/// Integer cells along a line, endpoints included
fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut points = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;

    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
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
    }
    points
}
