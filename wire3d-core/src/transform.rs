/// Hand-built homogeneous transformation matrices
///
/// Every matrix here is written out entry by entry rather than taken from
/// nalgebra's constructors, and all of them act on column vectors
/// (`M * p`), so composed stacks read right to left.
use nalgebra::{Matrix4, Point3, Vector3};

/// Coordinate axis selected by a mouse button during a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Unit vector along this axis
    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

#[rustfmt::skip]
impl Transform {
    /// Create a translation matrix
    pub fn translation(dx: f32, dy: f32, dz: f32) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, dx,
            0.0, 1.0, 0.0, dy,
            0.0, 0.0, 1.0, dz,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a rotation of `degrees` around a single coordinate axis
    pub fn rotation(axis: Axis, degrees: f32) -> Matrix4<f32> {
        let (s, c) = degrees.to_radians().sin_cos();
        match axis {
            Axis::X => Matrix4::new(
                1.0, 0.0, 0.0, 0.0,
                0.0, c,   -s,  0.0,
                0.0, s,   c,   0.0,
                0.0, 0.0, 0.0, 1.0,
            ),
            Axis::Y => Matrix4::new(
                c,   0.0, s,   0.0,
                0.0, 1.0, 0.0, 0.0,
                -s,  0.0, c,   0.0,
                0.0, 0.0, 0.0, 1.0,
            ),
            Axis::Z => Matrix4::new(
                c,   -s,  0.0, 0.0,
                s,   c,   0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ),
        }
    }

    /// Create a non-uniform scale matrix
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new(
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, sz,  0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create the world-to-camera matrix for a camera at `look_from`
    /// aimed at `look_at`.
    ///
    /// Camera space has the eye at the origin looking down +z, with +x to
    /// the right and +y up. `up` must not be parallel to the view
    /// direction; if it is, the basis is degenerate and the result is NaN.
    pub fn look_at(look_at: &Point3<f32>, look_from: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let forward = (look_at - look_from).normalize();
        let right = up.cross(&forward).normalize();
        let true_up = forward.cross(&right);

        let rotation = Matrix4::new(
            right.x,   right.y,   right.z,   0.0,
            true_up.x, true_up.y, true_up.z, 0.0,
            forward.x, forward.y, forward.z, 0.0,
            0.0,       0.0,       0.0,       1.0,
        );

        rotation * Self::translation(-look_from.x, -look_from.y, -look_from.z)
    }

    /// Create a perspective projection matrix
    ///
    /// The bottom row copies camera-space z into w, so the divide by w
    /// that follows maps z = `near` to -1 and z = `far` to +1.
    /// `far == near` divides by zero.
    pub fn perspective(fov_degrees: f32, near: f32, far: f32, aspect: f32) -> Matrix4<f32> {
        let cot = 1.0 / (fov_degrees / 2.0).to_radians().tan();
        let depth = far - near;

        Matrix4::new(
            cot / aspect, 0.0, 0.0,                  0.0,
            0.0,          cot, 0.0,                  0.0,
            0.0,          0.0, (far + near) / depth, -2.0 * far * near / depth,
            0.0,          0.0, 1.0,                  0.0,
        )
    }

    /// Create a model-view-projection matrix
    ///
    /// The model rotation/translation is applied first, then the
    /// separately accumulated scale, then the camera and lens.
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        model_scale: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model_scale * model
    }
}
