//! Viewer configuration
//!
//! Everything has a default matching the built-in scene, so a config file
//! only needs the values it changes:
//!
//! ```toml
//! [projection]
//! fov_degrees = 45.0
//!
//! [camera]
//! look_from = [0.0, 2.0, -6.0]
//!
//! [scene]
//! world_gizmo = false
//! ```

use std::path::Path;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::interaction::DragGains;
use crate::line_buffer::MAX_VERTICES;
use crate::projection::ProjectionParams;
use crate::scene::CameraPlacement;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial lens parameters
    pub projection: ProjectionConfig,

    /// Initial camera placement
    pub camera: CameraConfig,

    /// Drag sensitivity
    pub interaction: DragGains,

    /// What gets drawn each frame
    pub scene: SceneConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub look_at: [f32; 3],
    pub look_from: [f32; 3],
    pub up: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Draw the red/green/blue world axes
    pub world_gizmo: bool,
    /// Draw the yellow/magenta/cyan object axes
    pub object_gizmo: bool,
    /// Vertex capacity of the per-frame line buffer
    pub max_vertices: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        let params = ProjectionParams::default();
        Self {
            fov_degrees: params.fov_degrees(),
            near: params.near(),
            far: params.far(),
            aspect: params.aspect(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = CameraPlacement::default();
        Self {
            look_at: camera.look_at.coords.into(),
            look_from: camera.look_from.coords.into(),
            up: camera.up.into(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            world_gizmo: true,
            object_gizmo: true,
            max_vertices: MAX_VERTICES,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse and range-check a configuration
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.interaction.validate()?;
        Ok(config)
    }

    /// Lens parameters; the field of view is clamped on the way in
    pub fn projection_params(&self) -> ProjectionParams {
        let p = &self.projection;
        ProjectionParams::new(p.fov_degrees, p.near, p.far, p.aspect)
    }

    pub fn camera_placement(&self) -> CameraPlacement {
        let c = &self.camera;
        CameraPlacement {
            look_at: Point3::from(c.look_at),
            look_from: Point3::from(c.look_from),
            up: Vector3::from(c.up),
        }
    }
}

/// Load configuration from file or use defaults
pub fn load_config_or_default(path: Option<&Path>) -> Config {
    match path {
        Some(path) => match Config::from_file(path) {
            Ok(config) => {
                info!("Loaded configuration from: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load config from {}: {}. Using defaults.", path.display(), e);
                Config::default()
            }
        },
        None => {
            info!("No config file specified, using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::interaction::{Button, InputEvent, Mode};
    use crate::viewer::Viewer;
    use nalgebra::Matrix4;

    #[test]
    fn test_defaults_match_scene_defaults() {
        let config = Config::default();
        assert_eq!(config.projection_params(), ProjectionParams::default());
        assert_eq!(config.camera_placement(), CameraPlacement::default());
        assert_eq!(config.interaction, DragGains::default());
        assert_eq!(config.scene.max_vertices, MAX_VERTICES);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml_str(
            r#"
            [projection]
            fov_degrees = 200.0
            near = 1.0

            [camera]
            look_from = [0.0, 0.0, -5.0]

            [interaction]
            rotate = 2.5

            [scene]
            world_gizmo = false
            "#,
        )
        .unwrap();

        let params = config.projection_params();
        assert_eq!(params.fov_degrees(), 160.0);
        assert_eq!(params.near(), 1.0);
        assert_eq!(params.far(), 8.0);
        assert_eq!(config.camera_placement().look_from, Point3::new(0.0, 0.0, -5.0));
        assert_eq!(config.camera_placement().up, Vector3::y());
        assert_eq!(config.interaction.rotate, 2.5);
        assert_eq!(config.interaction.scale_divisor, 8.0);
        assert!(!config.scene.world_gizmo);
        assert!(config.scene.object_gizmo);
    }

    #[test]
    fn test_sample_config_spells_out_defaults() {
        let config = Config::from_toml_str(include_str!("../../wire3d.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[projection]\nnear = \"close\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_unusable_drag_gains() {
        for text in [
            "[interaction]\nscale_divisor = 0.0",
            "[interaction]\nscale_divisor = -8.0",
            "[interaction]\nscale_divisor = nan",
            "[interaction]\nrotate = inf",
        ] {
            let err = Config::from_toml_str(text).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig { .. }), "{text}");
        }
    }

    #[test]
    fn test_zero_scale_divisor_falls_back_to_default() {
        let path = std::env::temp_dir().join(format!("wire3d-zero-divisor-{}.toml", std::process::id()));
        std::fs::write(&path, "[interaction]\nscale_divisor = 0.0\n").unwrap();
        let config = load_config_or_default(Some(&path));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.interaction, DragGains::default());

        // A vertical-only move while scaling leaves the model untouched.
        let mut viewer = Viewer::new(&config);
        viewer.handle_event(InputEvent::SelectMode(Mode::ScaleObject));
        viewer.handle_event(InputEvent::ButtonDown(Button::Left));
        viewer.handle_event(InputEvent::PointerMoved { x: 0.0, y: 3.0 });
        assert_eq!(*viewer.scene().model_scale(), Matrix4::identity());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = load_config_or_default(Some(Path::new("/nonexistent/wire3d.toml")));
        assert_eq!(config, Config::default());
    }
}
