//! Game simulations
//!
//! One state struct and one `tick` per game. Ticks take a fixed timestep and
//! draw randomness only from the RNG seeded into the state, so a seed plus an
//! input script always replays the same run. Nothing here knows about
//! rendering or the host.

pub mod common;
pub mod flappy;
pub mod flappy3d;
pub mod pacsnake;
pub mod voxel;

pub use common::{GamePhase, Score};
pub use flappy::{FlappyInput, FlappyState};
pub use flappy3d::{Flappy3dInput, Flappy3dState};
pub use pacsnake::{Direction, GhostName, PacSnakeInput, PacSnakeState};
pub use voxel::{BlockKind, VoxelInput, VoxelState};
