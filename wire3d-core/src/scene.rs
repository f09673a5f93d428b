/// The persistent transform stack shared by every frame
use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};
use tracing::{trace, warn};

use crate::geometry::Space;
use crate::projection::{perspective_divide, ProjectionParams};
use crate::transform::Transform;

/// Where the camera sits before any interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPlacement {
    pub look_at: Point3<f32>,
    pub look_from: Point3<f32>,
    pub up: Vector3<f32>,
}

impl CameraPlacement {
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Transform::look_at(&self.look_at, &self.look_from, &self.up)
    }
}

impl Default for CameraPlacement {
    fn default() -> Self {
        Self {
            look_at: Point3::origin(),
            look_from: Point3::new(-2.0, -4.0, -4.0),
            up: Vector3::y(),
        }
    }
}

/// View, model, model scale and projection, owned together
///
/// Each of view, model and model scale only ever changes by having a new
/// step transform multiplied onto its left. The projection matrix is never
/// edited directly: it is rebuilt from [`ProjectionParams`] whenever they
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTransforms {
    view: Matrix4<f32>,
    model: Matrix4<f32>,
    model_scale: Matrix4<f32>,
    params: ProjectionParams,
    proj: Matrix4<f32>,
}

impl SceneTransforms {
    pub fn new(camera: &CameraPlacement, params: ProjectionParams) -> Self {
        Self {
            view: camera.view_matrix(),
            model: Matrix4::identity(),
            model_scale: Matrix4::identity(),
            params,
            proj: params.matrix(),
        }
    }

    pub fn view(&self) -> &Matrix4<f32> {
        &self.view
    }

    pub fn model(&self) -> &Matrix4<f32> {
        &self.model
    }

    pub fn model_scale(&self) -> &Matrix4<f32> {
        &self.model_scale
    }

    pub fn proj(&self) -> &Matrix4<f32> {
        &self.proj
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Apply `step` after everything already accumulated on the camera
    pub fn premultiply_view(&mut self, step: &Matrix4<f32>) {
        self.view = step * self.view;
    }

    pub fn premultiply_model(&mut self, step: &Matrix4<f32>) {
        self.model = step * self.model;
    }

    pub fn premultiply_model_scale(&mut self, step: &Matrix4<f32>) {
        self.model_scale = step * self.model_scale;
    }

    /// Replace the lens parameters and rebuild the projection matrix
    pub fn set_projection(&mut self, params: ProjectionParams) {
        if !params.has_depth_range() {
            warn!(
                near = params.near(),
                far = params.far(),
                "near and far planes coincide; projection is not finite"
            );
        }
        trace!(
            fov = params.fov_degrees(),
            near = params.near(),
            far = params.far(),
            aspect = params.aspect(),
            "rebuilding projection"
        );
        self.params = params;
        self.proj = params.matrix();
    }

    /// Object-to-camera matrix for segments drawn in `space`
    pub fn model_view(&self, space: Space) -> Matrix4<f32> {
        match space {
            Space::World => self.view,
            Space::Object => self.view * self.model_scale * self.model,
        }
    }

    /// Take a point from `space` into camera space
    pub fn to_camera(&self, space: Space, point: &Point3<f32>) -> Vector4<f32> {
        self.model_view(space) * point.to_homogeneous()
    }

    /// Take a camera-space point to 2D device coordinates
    pub fn camera_to_device(&self, camera: &Vector4<f32>) -> Point2<f32> {
        perspective_divide(&(self.proj * camera))
    }

    /// Project an object-space point through the full stack
    ///
    /// `proj · view · model_scale · model · p`, then divide by w.
    pub fn project_point(&self, point: &Point3<f32>) -> Point2<f32> {
        self.project(Space::Object, point)
    }

    pub fn project(&self, space: Space, point: &Point3<f32>) -> Point2<f32> {
        self.camera_to_device(&self.to_camera(space, point))
    }
}

impl Default for SceneTransforms {
    fn default() -> Self {
        Self::new(&CameraPlacement::default(), ProjectionParams::default())
    }
}
