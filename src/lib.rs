//! Arcade Loops - four small arcade games as deterministic fixed-step simulations
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, scoring) per game
//! - `renderer`: Frame descriptions handed to an external drawing backend
//! - `platform`: Input sampling (held keys, pointer, mouse look)
//! - `persistence`: Voxel world text snapshots
//! - `runner`: Fixed-step loop driver shared by every game
//! - `settings`: Data-driven tuning

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;

pub use runner::{Game, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Frame-locked timestep for the canvas and scene games (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Interval timer period for the grid game (100 ms)
    pub const GRID_DT: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    // === 2D bird (pixels, y down) ===
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    pub const BIRD_START_X: f32 = 100.0;
    pub const BIRD_WIDTH: f32 = 40.0;
    pub const BIRD_HEIGHT: f32 = 30.0;
    /// 0.5 px/frame² at 60 Hz
    pub const BIRD_GRAVITY: f32 = 1800.0;
    /// -10 px/frame at 60 Hz
    pub const BIRD_LIFT: f32 = -600.0;
    pub const PLATFORM_BOUNCE: f32 = -600.0;
    pub const WALL_RESTITUTION: f32 = 0.8;
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const PLATFORM_COUNT: usize = 5;
    pub const PLATFORM_SPACING: f32 = 120.0;
    /// 1 px/frame at 60 Hz
    pub const PLATFORM_SCROLL_SPEED: f32 = 60.0;
    pub const SLINGSHOT_X: f32 = 50.0;
    /// Slingshot top sits this far above the canvas bottom
    pub const SLINGSHOT_RISE: f32 = 100.0;
    pub const SLINGSHOT_WIDTH: f32 = 20.0;
    pub const SLINGSHOT_HEIGHT: f32 = 80.0;
    /// Launch speed (px/s) per pixel of pull: (distance / 10) px/frame
    pub const SLINGSHOT_POWER: f32 = 6.0;
    pub const PARTICLE_COUNT: usize = 10;
    pub const PARTICLE_LIFE_TICKS: u32 = 30;
    pub const PARTICLE_GRAVITY: f32 = 360.0;

    // === 3D bird (world units, y up) ===
    pub const BIRD3D_START: [f32; 3] = [0.0, 0.0, -5.0];
    pub const BIRD3D_RADIUS: f32 = 0.5;
    pub const BIRD3D_GRAVITY: f32 = -6.0;
    pub const BIRD3D_LIFT: f32 = 4.0;
    /// Pitch spin while gliding (0.05 rad/frame)
    pub const BIRD3D_SPIN: f32 = 3.0;
    pub const BIRD3D_FLAP_PITCH: f32 = -0.5;
    pub const PLATFORM3D_SIZE: [f32; 3] = [3.0, 0.5, 2.0];
    pub const PLATFORM3D_COUNT: usize = 5;
    /// 0.1 units/frame toward the camera
    pub const PLATFORM3D_SPEED: f32 = 6.0;
    pub const PLATFORM3D_DESPAWN_Z: f32 = 5.0;
    pub const CONTACT_DISTANCE: f32 = 1.5;
    pub const CONTACT_LIFT: f32 = 1.0;
    pub const DEATH_PLANE_Y: f32 = -10.0;
    pub const CAMERA3D_Z: f32 = 5.0;

    // === Voxel sandbox ===
    pub const PLAYER_HEIGHT: f32 = 1.8;
    pub const PLAYER_RADIUS: f32 = 0.3;
    pub const PLAYER_SPAWN: [f32; 3] = [0.0, 1.0, 0.0];
    /// 0.1 units/frame
    pub const MOVE_SPEED: f32 = 6.0;
    pub const WORLD_GRAVITY: f32 = -9.8;
    pub const JUMP_SPEED: f32 = 5.0;
    pub const BLOCK_HALF: f32 = 0.5;
    pub const GROUND_PROBE: f32 = 0.1;
    /// Terrain spans [-25, 25) on x and z
    pub const TERRAIN_HALF_EXTENT: i32 = 25;
    pub const TERRAIN_Y: f32 = -0.5;
    pub const LOOK_SENSITIVITY: f32 = 0.002;
    pub const REACH: f32 = 500.0;
    pub const EVENT_LOG_LEN: usize = 10;
    pub const HOTBAR_SLOTS: usize = 9;
    pub const CLOUD_COUNT: usize = 20;
    /// 0.01 units/frame
    pub const CLOUD_DRIFT: f32 = 0.6;
    pub const CLOUD_BOUND: f32 = 50.0;
    pub const DAY_MINUTES: f32 = 24.0 * 60.0;
    pub const DAY_START_MINUTES: f32 = 6.5 * 60.0;
    /// Game minutes per real second
    pub const DAY_TIME_SCALE: f32 = 2.2;
    pub const SUN_DISTANCE: f32 = 100.0;

    // === Grid snake ===
    pub const GRID_SIZE: i32 = 30;
    pub const SNAKE_START: [i32; 2] = [10, 10];
    pub const FOOD_SCORE: u64 = 10;
    pub const GHOST_CAPTURE_SCORE: u64 = 200;
    pub const POWER_DURATION_SECS: f32 = 10.0;
    pub const GHOST_TURN_CHANCE: f64 = 0.2;
}
