/// wire3d Core Library - Transform pipeline for an interactive wireframe viewer
///
/// This library builds view and projection matrices by hand, projects a
/// wireframe cube and axis gizmos to 2D device coordinates, and turns
/// mode-dependent mouse drags into camera, object and lens changes.
/// Windowing and drawing are left to the front end.

pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod line_buffer;
pub mod projection;
pub mod scene;
pub mod script;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use geometry::{Rgb, Segment, Space};
pub use interaction::{Button, DragTarget, InputEvent, Mode};
pub use line_buffer::{LineBuffer, MAX_VERTICES};
pub use projection::{Clipper, DepthClipper, KeepAll, ProjectionParams};
pub use scene::{CameraPlacement, SceneTransforms};
pub use transform::{Axis, Transform};
pub use viewer::Viewer;
