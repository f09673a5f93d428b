/// Line-segment geometry for the wireframe scene
use nalgebra::Point3;

use crate::transform::Axis;

/// Linear RGB color, each channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
pub const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);
pub const YELLOW: Rgb = Rgb::new(1.0, 1.0, 0.0);
pub const MAGENTA: Rgb = Rgb::new(1.0, 0.0, 1.0);
pub const CYAN: Rgb = Rgb::new(0.0, 1.0, 1.0);

/// A colored line segment between two object-space points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
    pub color: Rgb,
}

impl Segment {
    pub fn new(start: Point3<f32>, end: Point3<f32>, color: Rgb) -> Self {
        Self { start, end, color }
    }
}

/// Which transform stack a group of segments is drawn under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// Camera and lens only
    World,
    /// Model, model scale, camera and lens
    Object,
}

/// The 12 edges of the cube with corners at (±1, ±1, ±1)
pub fn cube_edges() -> [Segment; 12] {
    let c = |x: f32, y: f32, z: f32| Point3::new(x, y, z);
    let edge = |a, b| Segment::new(a, b, BLACK);

    [
        // Front face (z = +1)
        edge(c(1.0, 1.0, 1.0), c(-1.0, 1.0, 1.0)),
        edge(c(-1.0, 1.0, 1.0), c(-1.0, -1.0, 1.0)),
        edge(c(-1.0, -1.0, 1.0), c(1.0, -1.0, 1.0)),
        edge(c(1.0, -1.0, 1.0), c(1.0, 1.0, 1.0)),
        // Connecting edges
        edge(c(1.0, 1.0, 1.0), c(1.0, 1.0, -1.0)),
        edge(c(-1.0, 1.0, 1.0), c(-1.0, 1.0, -1.0)),
        edge(c(-1.0, -1.0, 1.0), c(-1.0, -1.0, -1.0)),
        edge(c(1.0, -1.0, 1.0), c(1.0, -1.0, -1.0)),
        // Back face (z = -1)
        edge(c(1.0, 1.0, -1.0), c(-1.0, 1.0, -1.0)),
        edge(c(-1.0, 1.0, -1.0), c(-1.0, -1.0, -1.0)),
        edge(c(-1.0, -1.0, -1.0), c(1.0, -1.0, -1.0)),
        edge(c(1.0, -1.0, -1.0), c(1.0, 1.0, -1.0)),
    ]
}

/// The 8 corners of the cube, in no particular order
pub fn cube_corners() -> [Point3<f32>; 8] {
    let mut corners = [Point3::origin(); 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let sign = |bit: usize| -> f32 { if i & bit == 0 { -1.0 } else { 1.0 } };
        *corner = Point3::new(sign(1), sign(2), sign(4));
    }
    corners
}

/// Three segments from the origin along +x, +y and +z
///
/// The world gizmo is half a unit long in red, green and blue; the object
/// gizmo is a quarter unit in yellow, magenta and cyan.
pub fn axis_gizmo(space: Space) -> [Segment; 3] {
    let (length, colors) = match space {
        Space::World => (0.5, [RED, GREEN, BLUE]),
        Space::Object => (0.25, [YELLOW, MAGENTA, CYAN]),
    };

    Axis::ALL.map(|axis| {
        let color = colors[axis as usize];
        Segment::new(Point3::origin(), Point3::from(axis.unit() * length), color)
    })
}
