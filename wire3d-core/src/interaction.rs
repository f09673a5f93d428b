/// Mode-driven mapping from mouse drags to transform updates
///
/// One [`Mode`] is active at a time and decides which part of the
/// [`SceneTransforms`] a drag edits. Only horizontal pointer motion is
/// used. Each held button picks an axis (left → x, middle → y,
/// right → z) and every held button contributes its own step, applied in
/// that order.
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::scene::SceneTransforms;
use crate::transform::{Axis, Transform};

/// Floor for the per-event scale factor; keeps the scale matrix invertible
pub const MIN_SCALE_STEP: f32 = 1e-3;

/// Interaction modes, one per mode key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Rotate the camera about its own axes (O)
    #[default]
    OrbitCamera,
    /// Translate the camera along its own axes (N)
    TruckCamera,
    /// Change field of view, near and far (P)
    AdjustProjection,
    /// Rotate the object (R)
    RotateObject,
    /// Translate the object (T)
    TranslateObject,
    /// Scale the object (S)
    ScaleObject,
    /// Selectable but inert (V)
    Reserved,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::OrbitCamera,
        Mode::TruckCamera,
        Mode::AdjustProjection,
        Mode::RotateObject,
        Mode::TranslateObject,
        Mode::ScaleObject,
        Mode::Reserved,
    ];

    /// Key that selects this mode
    pub fn key(self) -> char {
        match self {
            Mode::OrbitCamera => 'o',
            Mode::TruckCamera => 'n',
            Mode::AdjustProjection => 'p',
            Mode::RotateObject => 'r',
            Mode::TranslateObject => 't',
            Mode::ScaleObject => 's',
            Mode::Reserved => 'v',
        }
    }

    pub fn from_key(key: char) -> Option<Mode> {
        let key = key.to_ascii_lowercase();
        Mode::ALL.into_iter().find(|mode| mode.key() == key)
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::OrbitCamera => "orbit",
            Mode::TruckCamera => "truck",
            Mode::AdjustProjection => "projection",
            Mode::RotateObject => "rotate",
            Mode::TranslateObject => "translate",
            Mode::ScaleObject => "scale",
            Mode::Reserved => "reserved",
        }
    }

    pub fn from_name(name: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|mode| mode.name() == name)
    }

    /// What a drag edits in this mode; `None` for [`Mode::Reserved`]
    pub fn target(self) -> Option<DragTarget> {
        match self {
            Mode::OrbitCamera => Some(DragTarget::View(Motion::Rotate)),
            Mode::TruckCamera => Some(DragTarget::View(Motion::Translate)),
            Mode::AdjustProjection => Some(DragTarget::Projection),
            Mode::RotateObject => Some(DragTarget::Model(Motion::Rotate)),
            Mode::TranslateObject => Some(DragTarget::Model(Motion::Translate)),
            Mode::ScaleObject => Some(DragTarget::ModelScale),
            Mode::Reserved => None,
        }
    }
}

/// Mouse buttons that gate drags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Middle,
    Right,
}

impl Button {
    /// Order in which held buttons apply their steps
    pub const ALL: [Button; 3] = [Button::Left, Button::Middle, Button::Right];

    pub fn axis(self) -> Axis {
        match self {
            Button::Left => Axis::X,
            Button::Middle => Axis::Y,
            Button::Right => Axis::Z,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Middle => "middle",
            Button::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Button> {
        Button::ALL.into_iter().find(|button| button.name() == name)
    }
}

/// Rigid motion kinds for the view and model targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Rotate,
    Translate,
}

/// The part of the scene transform state a drag edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// The camera; drag direction is inverted so the scene follows the
    /// pointer
    View(Motion),
    Model(Motion),
    ModelScale,
    /// The lens scalars; the projection matrix is rebuilt, not multiplied
    Projection,
}

/// How far a one-unit horizontal drag moves each kind of target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragGains {
    /// Degrees per unit, for rotations and field of view
    pub rotate: f32,
    /// Distance per unit, for translations and near/far
    pub translate: f32,
    /// Units of drag per unit of scale change
    pub scale_divisor: f32,
}

impl Default for DragGains {
    fn default() -> Self {
        Self {
            rotate: 5.0,
            translate: 1.0,
            scale_divisor: 8.0,
        }
    }
}

impl DragGains {
    /// Gains must be finite, and the scale divisor positive, or a single
    /// drag turns the accumulated matrices into NaN or infinity.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("interaction.rotate", self.rotate, self.rotate.is_finite()),
            ("interaction.translate", self.translate, self.translate.is_finite()),
            (
                "interaction.scale_divisor",
                self.scale_divisor,
                self.scale_divisor.is_finite() && self.scale_divisor > 0.0,
            ),
        ];
        match checks.into_iter().find(|(_, _, ok)| !ok) {
            Some((field, value, _)) => Err(Error::InvalidConfig {
                field,
                message: format!("{} is out of range", value),
            }),
            None => Ok(()),
        }
    }
}

impl DragTarget {
    /// The step transform one drag of `dx` along `axis` produces
    ///
    /// Pure; returns `None` for [`DragTarget::Projection`], which edits
    /// scalars instead.
    pub fn step(self, axis: Axis, dx: f32, gains: &DragGains) -> Option<Matrix4<f32>> {
        let rigid = |motion: Motion, dx: f32| match motion {
            Motion::Rotate => Transform::rotation(axis, dx * gains.rotate),
            Motion::Translate => {
                let v = axis.unit() * (dx * gains.translate);
                Transform::translation(v.x, v.y, v.z)
            }
        };

        match self {
            DragTarget::View(motion) => Some(rigid(motion, -dx)),
            DragTarget::Model(motion) => Some(rigid(motion, dx)),
            DragTarget::ModelScale => {
                let factor = (1.0 + dx / gains.scale_divisor).max(MIN_SCALE_STEP);
                let mut s = [1.0; 3];
                s[axis as usize] = factor;
                Some(Transform::scale(s[0], s[1], s[2]))
            }
            DragTarget::Projection => None,
        }
    }

    /// Apply one drag step to the scene
    pub fn apply(self, axis: Axis, dx: f32, gains: &DragGains, scene: &mut SceneTransforms) {
        match (self, self.step(axis, dx, gains)) {
            (DragTarget::View(_), Some(step)) => scene.premultiply_view(&step),
            (DragTarget::Model(_), Some(step)) => scene.premultiply_model(&step),
            (DragTarget::ModelScale, Some(step)) => scene.premultiply_model_scale(&step),
            (DragTarget::Projection, _) => {
                let mut params = *scene.params();
                match axis {
                    Axis::X => params.adjust_fov(dx * gains.rotate),
                    Axis::Y => params.adjust_near(dx * gains.translate),
                    Axis::Z => params.adjust_far(dx * gains.translate),
                }
                scene.set_projection(params);
            }
            (_, None) => {}
        }
    }
}

/// Raw input the core reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mode key was pressed
    SelectMode(Mode),
    ButtonDown(Button),
    ButtonUp(Button),
    /// Absolute pointer position; only `x` is used
    PointerMoved { x: f64, y: f64 },
}

/// Last pointer x and which buttons are held
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub last_x: f64,
    held: [bool; 3],
}

impl PointerState {
    pub fn is_held(&self, button: Button) -> bool {
        self.held[button as usize]
    }

    pub fn set_held(&mut self, button: Button, held: bool) {
        self.held[button as usize] = held;
    }

    /// Record a new x and return the horizontal delta since the last one
    pub fn advance(&mut self, x: f64) -> f64 {
        let dx = x - self.last_x;
        self.last_x = x;
        dx
    }

    /// Held buttons in application order
    pub fn held_buttons(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(move |b| self.is_held(*b))
    }
}

/// The interaction state machine: active mode, pointer and gains
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    mode: Mode,
    pointer: PointerState,
    gains: DragGains,
}

impl Interaction {
    pub fn new(gains: DragGains) -> Self {
        Self {
            mode: Mode::default(),
            pointer: PointerState::default(),
            gains,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Feed one event through the state machine
    ///
    /// Returns whether the event was consumed. Pointer motion always
    /// updates the stored x, even when the mode ignores it.
    pub fn handle(&mut self, event: InputEvent, scene: &mut SceneTransforms) -> bool {
        match event {
            InputEvent::SelectMode(mode) => {
                if mode != self.mode {
                    debug!(from = self.mode.name(), to = mode.name(), "mode changed");
                }
                self.mode = mode;
                true
            }
            InputEvent::ButtonDown(button) => {
                self.pointer.set_held(button, true);
                true
            }
            InputEvent::ButtonUp(button) => {
                self.pointer.set_held(button, false);
                true
            }
            InputEvent::PointerMoved { x, .. } => {
                let dx = self.pointer.advance(x) as f32;
                let Some(target) = self.mode.target() else {
                    return false;
                };
                for button in self.pointer.held_buttons() {
                    target.apply(button.axis(), dx, &self.gains, scene);
                }
                true
            }
        }
    }
}
