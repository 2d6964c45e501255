//! 2D bird game state

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{
    PARTICLE_COUNT, PARTICLE_LIFE_TICKS, SLINGSHOT_HEIGHT, SLINGSHOT_RISE, SLINGSHOT_WIDTH,
    SLINGSHOT_X,
};
use crate::settings::FlappyTuning;
use crate::sim::common::{GamePhase, Score, seeded_rng};

/// The bird. `pos` is the centre of its bounding box.
#[derive(Debug, Clone, Serialize)]
pub struct Bird {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Bird {
    pub fn new(tuning: &FlappyTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_start_x, tuning.canvas_height / 2.0),
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.bird_width, tuning.bird_height),
        }
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Leading edge while falling
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// A platform. `pos` is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Aim-and-launch slingshot anchored near the bottom-left corner
#[derive(Debug, Clone, Serialize)]
pub struct Slingshot {
    /// Top-left corner; also the launch origin
    pub pos: Vec2,
    pub size: Vec2,
    /// Pull point while armed
    pub pull: Option<Vec2>,
}

impl Slingshot {
    pub fn new(tuning: &FlappyTuning) -> Self {
        Self {
            pos: Vec2::new(SLINGSHOT_X, tuning.canvas_height - SLINGSHOT_RISE),
            size: Vec2::new(SLINGSHOT_WIDTH, SLINGSHOT_HEIGHT),
            pull: None,
        }
    }

    /// Strict containment, edges excluded
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.size.x
            && point.y > self.pos.y
            && point.y < self.pos.y + self.size.y
    }

    pub fn is_armed(&self) -> bool {
        self.pull.is_some()
    }

    /// Launch velocity toward the pull point, proportional to pull distance
    pub fn launch_velocity(&self, pull: Vec2, power: f32) -> Vec2 {
        let offset = pull - self.pos;
        let speed = offset.length() * power;
        let angle = offset.y.atan2(offset.x);
        Vec2::new(angle.cos(), angle.sin()) * speed
    }
}

/// Cosmetic spark emitted on landing
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Hue in degrees (cyan to blue)
    pub hue: f32,
    pub life: u32,
}

/// Complete 2D bird game state
#[derive(Debug, Clone, Serialize)]
pub struct FlappyState {
    pub tuning: FlappyTuning,
    pub phase: GamePhase,
    pub score: Score,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub bird: Bird,
    pub platforms: Vec<Platform>,
    pub slingshot: Slingshot,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    #[serde(skip)]
    rng: Pcg32,
}

impl FlappyState {
    /// Create a new game waiting for its start action
    pub fn new(seed: u64, tuning: FlappyTuning) -> Self {
        let mut state = Self {
            tuning,
            phase: GamePhase::Ready,
            score: Score::default(),
            time_ticks: 0,
            bird: Bird::new(&tuning),
            platforms: Vec::with_capacity(tuning.platform_count),
            slingshot: Slingshot::new(&tuning),
            particles: Vec::new(),
            rng: seeded_rng(seed),
        };
        state.reset();
        state
    }

    /// Put every entity back at its starting place and zero the score
    pub fn reset(&mut self) {
        self.bird = Bird::new(&self.tuning);
        self.slingshot = Slingshot::new(&self.tuning);
        self.score.reset();
        self.time_ticks = 0;
        self.particles.clear();
        self.platforms.clear();
        for i in 0..self.tuning.platform_count {
            let y = i as f32 * self.tuning.platform_spacing;
            let platform = self.random_platform(y);
            self.platforms.push(platform);
        }
    }

    /// A platform at height `y` with a random horizontal position
    pub fn random_platform(&mut self, y: f32) -> Platform {
        let span = (self.tuning.canvas_width - self.tuning.platform_width).max(0.0);
        let x = self.rng.random::<f32>() * span;
        Platform::new(
            Vec2::new(x, y),
            Vec2::new(self.tuning.platform_width, self.tuning.platform_height),
        )
    }

    /// Burst of sparks at `origin`
    pub fn spawn_particles(&mut self, origin: Vec2) {
        for _ in 0..PARTICLE_COUNT {
            let vel = Vec2::new(
                self.rng.random_range(-2.0..2.0),
                self.rng.random_range(-7.0..-2.0),
            ) * 60.0;
            let particle = Particle {
                pos: origin,
                vel,
                radius: self.rng.random_range(1.0..4.0),
                hue: self.rng.random_range(180.0..240.0),
                life: PARTICLE_LIFE_TICKS,
            };
            self.particles.push(particle);
        }
    }
}
