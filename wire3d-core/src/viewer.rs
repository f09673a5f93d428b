/// Frame loop glue: input in, projected line list out
use tracing::warn;

use crate::config::{Config, SceneConfig};
use crate::error::Result;
use crate::geometry::{axis_gizmo, cube_edges, Segment, Space};
use crate::interaction::{InputEvent, Interaction, Mode};
use crate::line_buffer::LineBuffer;
use crate::projection::{Clipper, KeepAll};
use crate::scene::SceneTransforms;
use crate::script::ScriptCommand;

/// Owns all viewer state
///
/// Events mutate the transforms between frames; [`tick`](Self::tick)
/// regenerates the line buffer from scratch using whatever the transforms
/// hold at that moment.
pub struct Viewer {
    scene: SceneTransforms,
    interaction: Interaction,
    buffer: LineBuffer,
    clipper: Box<dyn Clipper>,
    options: SceneConfig,
}

impl Viewer {
    pub fn new(config: &Config) -> Self {
        Self {
            scene: SceneTransforms::new(&config.camera_placement(), config.projection_params()),
            interaction: Interaction::new(config.interaction),
            buffer: LineBuffer::with_capacity(config.scene.max_vertices),
            clipper: Box::new(KeepAll),
            options: config.scene.clone(),
        }
    }

    /// Swap the per-segment clip strategy
    pub fn with_clipper(mut self, clipper: impl Clipper + 'static) -> Self {
        self.clipper = Box::new(clipper);
        self
    }

    pub fn scene(&self) -> &SceneTransforms {
        &self.scene
    }

    pub fn mode(&self) -> Mode {
        self.interaction.mode()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// The most recent frame's vertices
    pub fn line_buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        self.interaction.handle(event, &mut self.scene)
    }

    /// Rebuild the line buffer for one frame
    ///
    /// If the buffer fills up, the segments that fit are kept, the rest of
    /// the frame is dropped and the overflow is returned as an error.
    pub fn tick(&mut self) -> Result<()> {
        self.buffer.reset();

        self.draw_segments(Space::Object, &cube_edges())?;
        if self.options.world_gizmo {
            self.draw_segments(Space::World, &axis_gizmo(Space::World))?;
        }
        if self.options.object_gizmo {
            self.draw_segments(Space::Object, &axis_gizmo(Space::Object))?;
        }
        Ok(())
    }

    fn draw_segments(&mut self, space: Space, segments: &[Segment]) -> Result<()> {
        for segment in segments {
            let mut a = self.scene.to_camera(space, &segment.start);
            let mut b = self.scene.to_camera(space, &segment.end);
            if !self.clipper.clip(&mut a, &mut b, self.scene.params()) {
                continue;
            }

            self.buffer.set_color(segment.color);
            let pushed = self
                .buffer
                .push_line(self.scene.camera_to_device(&a), self.scene.camera_to_device(&b));
            if let Err(e) = pushed {
                warn!("dropping rest of frame: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Replay a parsed script, calling `on_tick` after every `tick` line
    /// with the frame number (from 1) and that frame's buffer
    ///
    /// A frame that overflows the buffer is still handed to `on_tick` with
    /// the segments that fit, then the overflow error ends the replay.
    pub fn run_script<F>(&mut self, commands: &[ScriptCommand], mut on_tick: F) -> Result<()>
    where
        F: FnMut(usize, &LineBuffer),
    {
        let mut frame = 0;
        for command in commands {
            match command {
                ScriptCommand::Event(event) => {
                    self.handle_event(*event);
                }
                ScriptCommand::Tick => {
                    let ticked = self.tick();
                    frame += 1;
                    on_tick(frame, &self.buffer);
                    ticked?;
                }
            }
        }
        Ok(())
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
