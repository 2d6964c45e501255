//! 2D bird game: gravity flight, slingshot launch, scrolling platforms
//!
//! Screen space, y grows downward. The bird scores by landing on platforms
//! that drift down the canvas and recycle at the top once they scroll off.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{lands_on, resolve_floor, resolve_walls};
pub use state::{Bird, FlappyState, Particle, Platform, Slingshot};
pub use tick::{FlappyInput, tick};
