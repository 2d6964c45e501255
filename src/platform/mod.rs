//! Platform abstraction layer
//!
//! Translates raw host events (browser key codes, pointer and mouse-look
//! events, UI buttons) into the per-tick input structs each game consumes.

pub mod input;

pub use input::{InputState, Key, PointerButton};
