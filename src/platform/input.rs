//! Input sampler
//!
//! Host events are written into an [`InputState`] as they arrive. Once per
//! tick the active game samples it: held keys are read as-is, while presses,
//! clicks, pointer edges, and mouse-look deltas are consumed so they apply to
//! exactly one tick.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::pacsnake::{Direction, PacSnakeInput};
use crate::sim::voxel::{MoveKeys, VoxelInput};
use crate::sim::{FlappyInput, Flappy3dInput};

/// A recognized control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    /// Space bar: flap or jump
    Space,
    /// Number keys 1..=9
    Digit(u8),
    ToggleHud,
    Respawn,
}

impl Key {
    /// Map a `KeyboardEvent.code` or `KeyboardEvent.key` string
    pub fn from_code(code: &str) -> Option<Self> {
        let key = match code {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "KeyW" | "w" | "W" => Key::Forward,
            "KeyS" | "s" | "S" => Key::Back,
            "KeyA" | "a" | "A" => Key::StrafeLeft,
            "KeyD" | "d" | "D" => Key::StrafeRight,
            "Space" | " " => Key::Space,
            "KeyH" | "h" | "H" => Key::ToggleHud,
            "KeyR" | "r" | "R" => Key::Respawn,
            _ => {
                let digit = code.strip_prefix("Digit").unwrap_or(code);
                match digit.parse::<u8>() {
                    Ok(n @ 1..=9) if digit.len() == 1 => Key::Digit(n),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Snake heading for an arrow key
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Raw control state shared by every game
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    /// Keys that went down since the last sample, oldest first
    pressed: Vec<Key>,
    pointer_down: Option<Vec2>,
    pointer_move: Option<Vec2>,
    pointer_up: bool,
    look: Vec2,
    primary_click: bool,
    secondary_click: bool,
    start: bool,
    clock_request: Option<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false for keys no game uses
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(key) = Key::from_code(code) else {
            log::trace!("input: ignoring key {code:?}");
            return false;
        };
        if self.held.insert(key) {
            self.pressed.push(key);
        }
        true
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.held.remove(&key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn pointer_pressed(&mut self, pos: Vec2) {
        self.pointer_down = Some(pos);
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer_move = Some(pos);
    }

    pub fn pointer_released(&mut self) {
        self.pointer_up = true;
    }

    /// Accumulate a relative mouse-look movement in pixels
    pub fn mouse_moved(&mut self, delta: Vec2) {
        self.look += delta;
    }

    pub fn click(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.primary_click = true,
            PointerButton::Secondary => self.secondary_click = true,
        }
    }

    /// The start button
    pub fn request_start(&mut self) {
        self.start = true;
    }

    /// A time-of-day button (`HH:MM`)
    pub fn select_time(&mut self, text: impl Into<String>) {
        self.clock_request = Some(text.into());
    }

    /// Forget every edge and held key
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn take_pressed(&mut self) -> Vec<Key> {
        std::mem::take(&mut self.pressed)
    }

    pub fn sample_flappy(&mut self) -> FlappyInput {
        let pressed = self.take_pressed();
        FlappyInput {
            start: std::mem::take(&mut self.start),
            flap: pressed.contains(&Key::Space),
            pointer_down: self.pointer_down.take(),
            pointer_move: self.pointer_move.take(),
            pointer_up: std::mem::take(&mut self.pointer_up),
        }
    }

    /// Space or a primary click flaps
    pub fn sample_flappy3d(&mut self) -> Flappy3dInput {
        let pressed = self.take_pressed();
        let clicked = std::mem::take(&mut self.primary_click);
        self.secondary_click = false;
        Flappy3dInput {
            start: std::mem::take(&mut self.start),
            flap: clicked || pressed.contains(&Key::Space),
        }
    }

    pub fn sample_voxel(&mut self) -> VoxelInput {
        let pressed = self.take_pressed();
        let select_slot = pressed.iter().rev().find_map(|key| match key {
            Key::Digit(n) => Some(usize::from(*n) - 1),
            _ => None,
        });
        let hud_presses = pressed.iter().filter(|&&k| k == Key::ToggleHud).count();
        self.start = false;
        VoxelInput {
            keys: MoveKeys {
                forward: self.is_held(Key::Forward),
                back: self.is_held(Key::Back),
                left: self.is_held(Key::StrafeLeft),
                right: self.is_held(Key::StrafeRight),
                jump: self.is_held(Key::Space),
            },
            look: std::mem::take(&mut self.look),
            break_block: std::mem::take(&mut self.primary_click),
            place_block: std::mem::take(&mut self.secondary_click),
            select_slot,
            respawn: pressed.contains(&Key::Respawn),
            toggle_hud: hud_presses % 2 == 1,
            set_clock: self.clock_request.take(),
        }
    }

    /// The last arrow pressed since the previous sample wins, skipping
    /// arrows that would reverse `heading`
    pub fn sample_pacsnake(&mut self, heading: Direction) -> PacSnakeInput {
        let pressed = self.take_pressed();
        PacSnakeInput {
            start: std::mem::take(&mut self.start),
            turn: pressed
                .iter()
                .rev()
                .filter_map(|key| key.direction())
                .find(|&dir| dir != heading.opposite()),
        }
    }
}
