//! First-person voxel sandbox
//!
//! A flat terrain of unit cubes the player can walk on, break, and build
//! over. Y is up and the camera looks down -Z at zero yaw.

pub mod block;
pub mod clock;
pub mod player;
pub mod state;
pub mod tick;
pub mod world;

pub use block::{Block, BlockKind, HOTBAR_KINDS};
pub use clock::{DayClock, DayPhase, Lighting};
pub use player::{MoveKeys, Player};
pub use state::{Cloud, Hotbar, LoggedEvent, VoxelState, WorldEvent};
pub use tick::{VoxelInput, tick};
pub use world::{Face, RayHit, World};
