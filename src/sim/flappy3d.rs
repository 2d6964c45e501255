//! 3D bird game
//!
//! The bird hovers in front of the camera while platforms stream toward it
//! along +Z. Contact is a plain centre-distance test with no sweep, so a
//! fast enough bird can pass through a platform between ticks.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::settings::Flappy3dTuning;
use crate::sim::common::{GamePhase, Score, seeded_rng};

/// The bird sphere
#[derive(Debug, Clone, Serialize)]
pub struct Bird3d {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Rotation about X used by the renderer
    pub pitch: f32,
    pub radius: f32,
}

/// A box platform, `pos` is its centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Platform3d {
    pub pos: Vec3,
    pub size: Vec3,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct Flappy3dInput {
    pub start: bool,
    pub flap: bool,
}

/// Complete 3D bird game state
#[derive(Debug, Clone, Serialize)]
pub struct Flappy3dState {
    pub tuning: Flappy3dTuning,
    pub phase: GamePhase,
    pub score: Score,
    pub time_ticks: u64,
    pub bird: Bird3d,
    pub platforms: Vec<Platform3d>,
    #[serde(skip)]
    rng: Pcg32,
}

impl Flappy3dState {
    pub fn new(seed: u64, tuning: Flappy3dTuning) -> Self {
        let mut state = Self {
            tuning,
            phase: GamePhase::Ready,
            score: Score::default(),
            time_ticks: 0,
            bird: Bird3d {
                pos: tuning.bird_start,
                vel: Vec3::ZERO,
                pitch: 0.0,
                radius: tuning.bird_radius,
            },
            platforms: Vec::with_capacity(tuning.platform_count),
            rng: seeded_rng(seed),
        };
        state.reset();
        state
    }

    pub fn reset(&mut self) {
        self.bird.pos = self.tuning.bird_start;
        self.bird.vel = Vec3::ZERO;
        self.bird.pitch = 0.0;
        self.score.reset();
        self.time_ticks = 0;
        self.platforms.clear();
        for _ in 0..self.tuning.platform_count {
            let platform = self.random_platform();
            self.platforms.push(platform);
        }
    }

    /// A platform somewhere in x,y in [-5, 5), z in (-20, -10]
    pub fn random_platform(&mut self) -> Platform3d {
        let pos = Vec3::new(
            self.rng.random_range(-5.0..5.0),
            self.rng.random_range(-5.0..5.0),
            -self.rng.random_range(10.0f32..20.0),
        );
        Platform3d {
            pos,
            size: self.tuning.platform_size,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut Flappy3dState, input: &Flappy3dInput, dt: f32) {
    if input.start && state.phase != GamePhase::Playing {
        state.reset();
        state.phase = GamePhase::Playing;
        log::info!("flappy3d: run started");
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let tuning = state.tuning;

    let bird = &mut state.bird;
    if input.flap {
        bird.vel.y = tuning.lift;
        bird.pitch = tuning.flap_pitch;
    } else {
        bird.vel.y += tuning.gravity * dt;
        bird.pitch += tuning.spin * dt;
    }
    bird.pos += bird.vel * dt;

    for i in 0..state.platforms.len() {
        state.platforms[i].pos.z += tuning.platform_speed * dt;
        if state.platforms[i].pos.z > tuning.despawn_z {
            let fresh = state.random_platform();
            state.platforms[i] = fresh;
            continue;
        }

        let platform = state.platforms[i];
        if state.bird.pos.distance(platform.pos) < tuning.contact_distance {
            state.bird.pos.y = platform.pos.y + tuning.contact_lift;
            state.bird.vel.y = state.bird.vel.y.max(0.0);
            state.score.add(1);
            log::trace!("flappy3d: contact, score {}", state.score.value());
        }
    }

    if state.bird.pos.y < tuning.death_plane_y {
        state.phase = GamePhase::GameOver;
        log::info!("flappy3d: game over, score {}", state.score.value());
    }
}
