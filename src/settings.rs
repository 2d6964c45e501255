//! Game settings and tuning
//!
//! Every gameplay constant a run depends on is grouped here per game so a
//! JSON document can override any subset of them. Missing fields fall back
//! to the defaults in [`crate::consts`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// 2D bird tuning (pixels and seconds, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlappyTuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub bird_start_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    pub gravity: f32,
    pub lift: f32,
    pub bounce: f32,
    pub wall_restitution: f32,
    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_count: usize,
    pub platform_spacing: f32,
    pub platform_scroll_speed: f32,
    pub slingshot_power: f32,
    /// Touching the canvas floor ends the run
    pub floor_is_lethal: bool,
}

impl Default for FlappyTuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            bird_start_x: BIRD_START_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: BIRD_GRAVITY,
            lift: BIRD_LIFT,
            bounce: PLATFORM_BOUNCE,
            wall_restitution: WALL_RESTITUTION,
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            platform_count: PLATFORM_COUNT,
            platform_spacing: PLATFORM_SPACING,
            platform_scroll_speed: PLATFORM_SCROLL_SPEED,
            slingshot_power: SLINGSHOT_POWER,
            floor_is_lethal: false,
        }
    }
}

/// 3D bird tuning (world units, y up, camera looks down -Z)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flappy3dTuning {
    pub bird_start: Vec3,
    pub bird_radius: f32,
    pub gravity: f32,
    pub lift: f32,
    pub spin: f32,
    pub flap_pitch: f32,
    pub platform_size: Vec3,
    pub platform_count: usize,
    pub platform_speed: f32,
    pub despawn_z: f32,
    pub contact_distance: f32,
    pub contact_lift: f32,
    pub death_plane_y: f32,
}

impl Default for Flappy3dTuning {
    fn default() -> Self {
        Self {
            bird_start: Vec3::from_array(BIRD3D_START),
            bird_radius: BIRD3D_RADIUS,
            gravity: BIRD3D_GRAVITY,
            lift: BIRD3D_LIFT,
            spin: BIRD3D_SPIN,
            flap_pitch: BIRD3D_FLAP_PITCH,
            platform_size: Vec3::from_array(PLATFORM3D_SIZE),
            platform_count: PLATFORM3D_COUNT,
            platform_speed: PLATFORM3D_SPEED,
            despawn_z: PLATFORM3D_DESPAWN_Z,
            contact_distance: CONTACT_DISTANCE,
            contact_lift: CONTACT_LIFT,
            death_plane_y: DEATH_PLANE_Y,
        }
    }
}

/// Voxel sandbox tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxelTuning {
    pub player_height: f32,
    pub player_radius: f32,
    pub spawn: Vec3,
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    pub ground_probe: f32,
    pub terrain_half_extent: i32,
    pub terrain_y: f32,
    pub look_sensitivity: f32,
    pub reach: f32,
    pub day_start_minutes: f32,
    pub day_time_scale: f32,
    pub cloud_count: usize,
    pub cloud_drift: f32,
}

impl Default for VoxelTuning {
    fn default() -> Self {
        Self {
            player_height: PLAYER_HEIGHT,
            player_radius: PLAYER_RADIUS,
            spawn: Vec3::from_array(PLAYER_SPAWN),
            move_speed: MOVE_SPEED,
            gravity: WORLD_GRAVITY,
            jump_speed: JUMP_SPEED,
            ground_probe: GROUND_PROBE,
            terrain_half_extent: TERRAIN_HALF_EXTENT,
            terrain_y: TERRAIN_Y,
            look_sensitivity: LOOK_SENSITIVITY,
            reach: REACH,
            day_start_minutes: DAY_START_MINUTES,
            day_time_scale: DAY_TIME_SCALE,
            cloud_count: CLOUD_COUNT,
            cloud_drift: CLOUD_DRIFT,
        }
    }
}

/// Grid snake tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacSnakeTuning {
    pub grid_size: i32,
    pub tick_secs: f32,
    pub food_score: u64,
    pub capture_score: u64,
    pub power_duration_secs: f32,
    pub ghost_turn_chance: f64,
}

impl Default for PacSnakeTuning {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            tick_secs: GRID_DT,
            food_score: FOOD_SCORE,
            capture_score: GHOST_CAPTURE_SCORE,
            power_duration_secs: POWER_DURATION_SECS,
            ghost_turn_chance: GHOST_TURN_CHANCE,
        }
    }
}

impl PacSnakeTuning {
    /// Replace values the game loop cannot run with: the grid needs at least
    /// one cell and the step must be a positive duration
    pub fn sanitized(mut self) -> Self {
        if self.grid_size < 1 {
            log::warn!("pacsnake: grid_size {} raised to 1", self.grid_size);
            self.grid_size = 1;
        }
        if !(self.tick_secs.is_finite() && self.tick_secs > 0.0) {
            log::warn!("pacsnake: tick_secs {} replaced with {GRID_DT}", self.tick_secs);
            self.tick_secs = GRID_DT;
        }
        self
    }

    /// Power state length in whole ticks
    pub fn power_ticks(&self) -> u64 {
        if self.tick_secs <= 0.0 {
            return 0;
        }
        (self.power_duration_secs / self.tick_secs).round().max(0.0) as u64
    }
}

/// Top-level settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Log frames-per-second while running
    pub show_fps: bool,
    pub flappy: FlappyTuning,
    pub flappy3d: Flappy3dTuning,
    pub voxel: VoxelTuning,
    pub pacsnake: PacSnakeTuning,
}

impl Settings {
    /// Parse settings from JSON, filling gaps with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.pacsnake = settings.pacsnake.sanitized();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Settings file path (native only)
    const SETTINGS_FILE: &'static str = "arcade-loops.json";

    /// Load settings from the working directory, falling back to defaults
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::SETTINGS_FILE) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::SETTINGS_FILE);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed {}: {}", Self::SETTINGS_FILE, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Seed for a new run
    pub fn run_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
