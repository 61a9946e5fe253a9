//! Per-frame input snapshot and the two control schemes sharing it

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Radians of look per pointer count
pub const POINTER_SENSITIVITY: f32 = 0.0022;
/// Key-driven look speed (radians per second)
pub const KEY_LOOK_SPEED: f32 = 2.2;

/// Keys the simulation binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    W,
    A,
    S,
    D,
    R,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    I,
    J,
    K,
    L,
    Enter,
    Slash,
    Period,
}

/// Bound pointer buttons, as indices into the three-button state.
/// The middle button (index 1) is tracked but unbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary = 0,
    Secondary = 2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub down: bool,
    pub pressed: bool,
    pub released: bool,
}

/// Shared pointer device (relative motion is only meaningful while locked)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub dx: f32,
    pub dy: f32,
    pub locked: bool,
    pub buttons: [ButtonState; 3],
}

impl PointerState {
    pub fn button(&self, button: PointerButton) -> ButtonState {
        self.buttons[button as usize]
    }
}

/// Read-only input for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub keys_down: HashSet<Key>,
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
    pub pointer: PointerState,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn was_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn key(&self, key: Key) -> ButtonState {
        ButtonState {
            down: self.is_down(key),
            pressed: self.was_pressed(key),
            released: self.was_released(key),
        }
    }

    /// Hold a key (no edge)
    pub fn hold(mut self, key: Key) -> Self {
        self.keys_down.insert(key);
        self
    }

    /// Key went down this frame
    pub fn press(mut self, key: Key) -> Self {
        self.keys_down.insert(key);
        self.keys_pressed.insert(key);
        self
    }

    /// Key went up this frame
    pub fn release(mut self, key: Key) -> Self {
        self.keys_down.remove(&key);
        self.keys_released.insert(key);
        self
    }

    /// Pointer button went down this frame
    pub fn press_button(mut self, button: PointerButton) -> Self {
        let b = &mut self.pointer.buttons[button as usize];
        b.down = true;
        b.pressed = true;
        self
    }

    pub fn hold_button(mut self, button: PointerButton) -> Self {
        self.pointer.buttons[button as usize].down = true;
        self
    }

    pub fn release_button(mut self, button: PointerButton) -> Self {
        let b = &mut self.pointer.buttons[button as usize];
        b.down = false;
        b.released = true;
        self
    }

    pub fn pointer_motion(mut self, dx: f32, dy: f32) -> Self {
        self.pointer.locked = true;
        self.pointer.dx += dx;
        self.pointer.dy += dy;
        self
    }
}

/// What one player wants to do this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    /// -1 (left) ..= 1 (right)
    pub strafe: f32,
    /// -1 (back) ..= 1 (forward)
    pub forward: f32,
    /// Yaw change in radians (positive turns left)
    pub look_yaw: f32,
    /// Pitch change in radians (positive looks up)
    pub look_pitch: f32,
    pub fire: ButtonState,
    pub reload: bool,
    pub jump: bool,
}

/// Input binding sets. One player owns the pointer, the other is keys-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    /// WASD + pointer look, primary button fires, Space jumps, R reloads
    Pointer,
    /// Arrows move, IJKL look, Slash fires, Period reloads
    Keys,
}

impl ControlScheme {
    /// Only the pointer scheme binds a jump
    pub fn can_jump(self) -> bool {
        matches!(self, Self::Pointer)
    }

    pub fn read(self, input: &InputSnapshot, dt: f32) -> PlayerIntent {
        match self {
            Self::Pointer => {
                let (look_yaw, look_pitch) = if input.pointer.locked {
                    (
                        -input.pointer.dx * POINTER_SENSITIVITY,
                        -input.pointer.dy * POINTER_SENSITIVITY,
                    )
                } else {
                    (0.0, 0.0)
                };
                PlayerIntent {
                    strafe: axis(input, Key::D, Key::A),
                    forward: axis(input, Key::W, Key::S),
                    look_yaw,
                    look_pitch,
                    fire: input.pointer.button(PointerButton::Primary),
                    reload: input.was_pressed(Key::R)
                        || input.pointer.button(PointerButton::Secondary).pressed,
                    jump: input.was_pressed(Key::Space),
                }
            }
            Self::Keys => PlayerIntent {
                strafe: axis(input, Key::ArrowRight, Key::ArrowLeft),
                forward: axis(input, Key::ArrowUp, Key::ArrowDown),
                look_yaw: axis(input, Key::J, Key::L) * KEY_LOOK_SPEED * dt,
                look_pitch: axis(input, Key::I, Key::K) * KEY_LOOK_SPEED * dt,
                fire: input.key(Key::Slash),
                reload: input.was_pressed(Key::Period),
                jump: false,
            },
        }
    }
}

fn axis(input: &InputSnapshot, positive: Key, negative: Key) -> f32 {
    let mut v = 0.0;
    if input.is_down(positive) {
        v += 1.0;
    }
    if input.is_down(negative) {
        v -= 1.0;
    }
    v
}
