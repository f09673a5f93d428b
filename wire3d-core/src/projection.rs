/// Lens parameters, the perspective divide and segment clipping
use nalgebra::{Matrix4, Point2, Vector4};

use crate::transform::Transform;

/// Narrowest field of view the lens accepts, in degrees
pub const MIN_FOV_DEGREES: f32 = 5.0;
/// Widest field of view the lens accepts, in degrees
pub const MAX_FOV_DEGREES: f32 = 160.0;

/// The four scalars the projection matrix is rebuilt from
///
/// The field of view is always held inside
/// [`MIN_FOV_DEGREES`, `MAX_FOV_DEGREES`]. Near and far are left alone;
/// keeping them distinct is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    fov_degrees: f32,
    near: f32,
    far: f32,
    aspect: f32,
}

impl ProjectionParams {
    pub fn new(fov_degrees: f32, near: f32, far: f32, aspect: f32) -> Self {
        Self {
            fov_degrees: clamp_fov(fov_degrees),
            near,
            far,
            aspect,
        }
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Widen or narrow the field of view, saturating at the limits
    pub fn adjust_fov(&mut self, delta_degrees: f32) {
        self.fov_degrees = clamp_fov(self.fov_degrees + delta_degrees);
    }

    pub fn adjust_near(&mut self, delta: f32) {
        self.near += delta;
    }

    pub fn adjust_far(&mut self, delta: f32) {
        self.far += delta;
    }

    /// Whether the depth range can produce a finite matrix
    pub fn has_depth_range(&self) -> bool {
        self.far != self.near
    }

    /// Create the projection matrix
    pub fn matrix(&self) -> Matrix4<f32> {
        Transform::perspective(self.fov_degrees, self.near, self.far, self.aspect)
    }
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self::new(60.0, -2.0, 8.0, 1.0)
    }
}

fn clamp_fov(fov_degrees: f32) -> f32 {
    fov_degrees.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES)
}

/// Divide a clip-space point by its w and keep x and y
///
/// A zero w yields infinities or NaN; nothing guards against it.
pub fn perspective_divide(clip: &Vector4<f32>) -> Point2<f32> {
    Point2::new(clip.x / clip.w, clip.y / clip.w)
}

/// Near/far test applied to each segment in camera space, before the
/// projection matrix
///
/// Implementations may move either endpoint onto a clip plane. Returning
/// `false` drops the segment.
pub trait Clipper {
    fn clip(&self, a: &mut Vector4<f32>, b: &mut Vector4<f32>, params: &ProjectionParams) -> bool;
}

/// Keeps every segment untouched
///
/// Geometry behind the camera or beyond the far plane is still projected
/// and can come out inverted or stretched.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl Clipper for KeepAll {
    fn clip(&self, _a: &mut Vector4<f32>, _b: &mut Vector4<f32>, _params: &ProjectionParams) -> bool {
        true
    }
}

/// Trims segments to the camera-space slab between the near and far planes
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthClipper;

impl Clipper for DepthClipper {
    fn clip(&self, a: &mut Vector4<f32>, b: &mut Vector4<f32>, params: &ProjectionParams) -> bool {
        let lo = params.near().min(params.far());
        let hi = params.near().max(params.far());

        clip_against(a, b, |p| p.z - lo) && clip_against(a, b, |p| hi - p.z)
    }
}

/// Clip a segment against one plane given its signed distance function
/// (non-negative means inside).
fn clip_against<F>(a: &mut Vector4<f32>, b: &mut Vector4<f32>, distance: F) -> bool
where
    F: Fn(&Vector4<f32>) -> f32,
{
    let da = distance(a);
    let db = distance(b);

    match (da >= 0.0, db >= 0.0) {
        (true, true) => true,
        (false, false) => false,
        (false, true) => {
            *a += (*b - *a) * (da / (da - db));
            true
        }
        (true, false) => {
            *b += (*a - *b) * (db / (db - da));
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params() -> ProjectionParams {
        ProjectionParams::new(60.0, 2.0, 20.0, 1.0)
    }

    #[test]
    fn test_default_params() {
        let p = ProjectionParams::default();
        assert_eq!(p.fov_degrees(), 60.0);
        assert_eq!(p.near(), -2.0);
        assert_eq!(p.far(), 8.0);
        assert_eq!(p.aspect(), 1.0);
        assert!(p.has_depth_range());
    }

    #[test]
    fn test_constructor_clamps_fov() {
        assert_eq!(ProjectionParams::new(1.0, 1.0, 2.0, 1.0).fov_degrees(), MIN_FOV_DEGREES);
        assert_eq!(ProjectionParams::new(400.0, 1.0, 2.0, 1.0).fov_degrees(), MAX_FOV_DEGREES);
    }

    #[test]
    fn test_near_far_unclamped() {
        let mut p = params();
        p.adjust_near(-50.0);
        p.adjust_far(1000.0);
        assert_eq!(p.near(), -48.0);
        assert_eq!(p.far(), 1020.0);

        p.adjust_near(1068.0);
        assert!(!p.has_depth_range());
    }

    #[test]
    fn test_near_plane_maps_to_minus_one() {
        let clip = params().matrix() * Vector4::new(0.0, 0.0, 2.0, 1.0);
        assert!((clip.z / clip.w + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_perspective_divide() {
        let p = perspective_divide(&Vector4::new(2.0, -4.0, 7.0, 2.0));
        assert_eq!(p, Point2::new(1.0, -2.0));
    }

    #[test]
    fn test_perspective_divide_zero_w() {
        let p = perspective_divide(&Vector4::new(1.0, 0.0, 0.0, 0.0));
        assert!(p.x.is_infinite());
        assert!(p.y.is_nan());
    }

    #[test]
    fn test_keep_all_leaves_points_untouched() {
        let mut a = Vector4::new(0.0, 0.0, -100.0, 1.0);
        let mut b = Vector4::new(0.0, 0.0, 500.0, 1.0);
        assert!(KeepAll.clip(&mut a, &mut b, &params()));
        assert_eq!(a.z, -100.0);
        assert_eq!(b.z, 500.0);
    }

    #[test]
    fn test_depth_clipper_rejects_outside() {
        let mut a = Vector4::new(0.0, 0.0, 0.5, 1.0);
        let mut b = Vector4::new(1.0, 0.0, 1.5, 1.0);
        assert!(!DepthClipper.clip(&mut a, &mut b, &params()));

        let mut a = Vector4::new(0.0, 0.0, 25.0, 1.0);
        let mut b = Vector4::new(1.0, 0.0, 30.0, 1.0);
        assert!(!DepthClipper.clip(&mut a, &mut b, &params()));
    }

    #[test]
    fn test_depth_clipper_trims_crossing_segment() {
        let mut a = Vector4::new(0.0, 0.0, 0.0, 1.0);
        let mut b = Vector4::new(4.0, 0.0, 4.0, 1.0);
        assert!(DepthClipper.clip(&mut a, &mut b, &params()));
        assert!((a.z - 2.0).abs() < 1e-6);
        assert!((a.x - 2.0).abs() < 1e-6);
        assert_eq!(b, Vector4::new(4.0, 0.0, 4.0, 1.0));

        let mut a = Vector4::new(0.0, 0.0, 10.0, 1.0);
        let mut b = Vector4::new(0.0, 3.0, 40.0, 1.0);
        assert!(DepthClipper.clip(&mut a, &mut b, &params()));
        assert!((b.z - 20.0).abs() < 1e-5);
        assert!((b.y - 1.0).abs() < 1e-5);
        assert!((b.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_depth_clipper_spanning_both_planes() {
        let mut a = Vector4::new(0.0, 0.0, -10.0, 1.0);
        let mut b = Vector4::new(0.0, 0.0, 30.0, 1.0);
        assert!(DepthClipper.clip(&mut a, &mut b, &params()));
        assert!((a.z - 2.0).abs() < 1e-5);
        assert!((b.z - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_depth_clipper_reversed_planes() {
        let reversed = ProjectionParams::new(60.0, 20.0, 2.0, 1.0);

        let mut a = Vector4::new(0.0, 0.0, -10.0, 1.0);
        let mut b = Vector4::new(0.0, 0.0, 30.0, 1.0);
        assert!(DepthClipper.clip(&mut a, &mut b, &reversed));
        assert!((a.z - 2.0).abs() < 1e-5);
        assert!((b.z - 20.0).abs() < 1e-5);

        let mut a = Vector4::new(0.0, 0.0, 25.0, 1.0);
        let mut b = Vector4::new(1.0, 0.0, 30.0, 1.0);
        assert!(!DepthClipper.clip(&mut a, &mut b, &reversed));

        let mut a = Vector4::new(0.0, 0.0, 5.0, 1.0);
        let mut b = Vector4::new(1.0, 0.0, 15.0, 1.0);
        assert!(DepthClipper.clip(&mut a, &mut b, &reversed));
        assert_eq!(a.z, 5.0);
        assert_eq!(b.z, 15.0);
    }

    proptest! {
        #[test]
        fn prop_fov_stays_in_range(steps in proptest::collection::vec(-500.0f32..500.0, 1..50)) {
            let mut p = ProjectionParams::default();
            for step in steps {
                p.adjust_fov(step);
                prop_assert!(p.fov_degrees() >= MIN_FOV_DEGREES);
                prop_assert!(p.fov_degrees() <= MAX_FOV_DEGREES);
            }
        }
    }
}
