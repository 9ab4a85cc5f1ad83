//! Maps raw key and mouse events to viewer actions, and turns held keys into
//! once-per-press edges at each frame boundary.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use winit::{
    event::{ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{camera::Movement, clock::AnimationCommand};

/// Pixels per scroll line for touchpads that report pixel deltas
const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewerAction {
    Move(Movement),
    Boost,
    TogglePause,
    SpeedUp,
    SlowDown,
    ResetAnimation,
    Quit,
}

impl ViewerAction {
    pub fn animation_command(self) -> Option<AnimationCommand> {
        match self {
            ViewerAction::TogglePause => Some(AnimationCommand::TogglePause),
            ViewerAction::SpeedUp => Some(AnimationCommand::SpeedUp),
            ViewerAction::SlowDown => Some(AnimationCommand::SlowDown),
            ViewerAction::ResetAnimation => Some(AnimationCommand::Reset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, ViewerAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyCode::KeyW, ViewerAction::Move(Movement::Forward)),
            (KeyCode::KeyS, ViewerAction::Move(Movement::Backward)),
            (KeyCode::KeyA, ViewerAction::Move(Movement::Left)),
            (KeyCode::KeyD, ViewerAction::Move(Movement::Right)),
            (KeyCode::KeyE, ViewerAction::Move(Movement::Up)),
            (KeyCode::KeyQ, ViewerAction::Move(Movement::Down)),
            (KeyCode::ShiftLeft, ViewerAction::Boost),
            (KeyCode::Space, ViewerAction::TogglePause),
            (KeyCode::ArrowUp, ViewerAction::SpeedUp),
            (KeyCode::ArrowDown, ViewerAction::SlowDown),
            (KeyCode::KeyR, ViewerAction::ResetAnimation),
            (KeyCode::Escape, ViewerAction::Quit),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    pub fn action(&self, key: KeyCode) -> Option<ViewerAction> {
        self.bindings.get(&key).copied()
    }
}

#[cfg(test)]
impl KeyBindings {
    pub fn bind(&mut self, key: KeyCode, action: ViewerAction) {
        self.bindings.insert(key, action);
    }
}

/// Input for a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Actions held during this frame
    pub held: HashSet<ViewerAction>,
    /// Actions held now but not on the previous frame
    pub pressed: Vec<ViewerAction>,
    /// Mouse motion in pixels, y growing downwards
    pub mouse_delta: Vec2,
    /// Scroll in lines, positive away from the user
    pub scroll_delta: f32,
}

impl FrameInput {
    pub fn is_held(&self, action: ViewerAction) -> bool {
        self.held.contains(&action)
    }
}

#[cfg(test)]
impl FrameInput {
    pub fn was_pressed(&self, action: ViewerAction) -> bool {
        self.pressed.contains(&action)
    }
}

/// Continuous key state accumulated between frames.
#[derive(Debug, Default)]
pub struct InputState {
    bindings: KeyBindings,
    held: HashSet<ViewerAction>,
    held_last_frame: HashSet<ViewerAction>,
    mouse_delta: Vec2,
    scroll_delta: f32,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn process_key(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key) = event.physical_key {
            self.set_key(key, event.state == ElementState::Pressed);
        }
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        let Some(action) = self.bindings.action(key) else {
            return;
        };
        if pressed {
            self.held.insert(action);
        } else {
            self.held.remove(&action);
        }
    }

    pub fn process_mouse_motion(&mut self, (dx, dy): (f64, f64)) {
        #[allow(clippy::cast_possible_truncation)]
        let delta = Vec2::new(dx as f32, dy as f32);
        self.mouse_delta += delta;
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        self.scroll_delta += match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            #[allow(clippy::cast_possible_truncation)]
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
        };
    }

    /// Drop everything held, e.g. when the window loses focus and releases go unseen
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Snapshot this frame's input, deriving press edges against the previous frame,
    /// and reset the per-frame deltas.
    pub fn begin_frame(&mut self) -> FrameInput {
        let mut pressed: Vec<ViewerAction> = self
            .held
            .difference(&self.held_last_frame)
            .copied()
            .collect();
        pressed.sort_unstable();
        self.held_last_frame.clone_from(&self.held);

        FrameInput {
            held: self.held.clone(),
            pressed,
            mouse_delta: std::mem::take(&mut self.mouse_delta),
            scroll_delta: std::mem::take(&mut self.scroll_delta),
        }
    }
}
