//! Grid snake with ghosts and a power pellet
//!
//! The board is a 30x30 torus stepped every 100 ms. Eating food grows the
//! snake; the pellet makes ghosts edible for a fixed number of ticks.

pub mod state;
pub mod tick;

pub use state::{Direction, Ghost, GhostName, PacSnakeState};
pub use tick::{PacSnakeInput, tick};
