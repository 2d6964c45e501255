//! First-person walker with per-axis sliding

use glam::{EulerRot, Quat, Vec2, Vec3};
use serde::Serialize;

use super::world::World;
use crate::settings::VoxelTuning;

/// Slack so feet resting exactly `ground_probe` above a block still count
const PROBE_SKIN: f32 = 1e-3;

/// Held movement controls for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveKeys {
    /// Unnormalized local move direction (camera looks down -Z)
    pub fn local_direction(self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.back {
            dir.z += 1.0;
        }
        if self.forward {
            dir.z -= 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Centre of the collision box
    pub pos: Vec3,
    pub vel: Vec3,
    pub height: f32,
    pub radius: f32,
    pub on_ground: bool,
    /// Set on the tick a jump starts, cleared once airborne
    pub jumping: bool,
    pub yaw: f32,
    pub pitch: f32,
}

impl Player {
    pub fn new(tuning: &VoxelTuning) -> Self {
        Self {
            pos: tuning.spawn,
            vel: Vec3::ZERO,
            height: tuning.player_height,
            radius: tuning.player_radius,
            on_ground: false,
            jumping: false,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.radius, self.height / 2.0, self.radius)
    }

    /// Camera position
    pub fn eye(&self) -> Vec3 {
        self.pos + Vec3::Y * self.height
    }

    /// Unit view direction from yaw and pitch
    pub fn look_direction(&self) -> Vec3 {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0) * Vec3::NEG_Z
    }

    /// Apply a mouse-look delta in pixels
    pub fn look(&mut self, delta: Vec2, sensitivity: f32) {
        use std::f32::consts::FRAC_PI_2;
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn respawn(&mut self, spawn: Vec3) {
        self.pos = spawn;
        self.vel = Vec3::ZERO;
        self.jumping = false;
    }

    fn collides(&self, world: &World, center: Vec3) -> bool {
        world.overlaps(center, self.half_extents())
    }

    /// Thin slab from the feet down to `depth` below them
    fn probe_ground(&self, world: &World, depth: f32) -> bool {
        let center = self.pos - Vec3::Y * (self.height / 2.0 + depth / 2.0);
        let half = Vec3::new(self.radius, depth / 2.0 + PROBE_SKIN, self.radius);
        world.overlaps(center, half)
    }

    /// Advance one tick: gravity, ground probe, jump, walk, then collide
    pub fn step(&mut self, world: &World, keys: MoveKeys, tuning: &VoxelTuning, dt: f32) {
        self.vel.y += tuning.gravity * dt;

        self.on_ground = self.probe_ground(world, tuning.ground_probe);

        if self.on_ground {
            self.vel.y = self.vel.y.max(0.0);
            if keys.jump && !self.jumping {
                self.vel.y = tuning.jump_speed;
                self.jumping = true;
            }
        } else {
            self.jumping = false;
        }

        let walk = Quat::from_rotation_y(self.yaw)
            * (keys.local_direction().normalize_or_zero() * tuning.move_speed * dt);
        let target = self.pos + walk + self.vel * dt;

        if !self.collides(world, target) {
            self.pos = target;
            return;
        }

        // Slide: try each axis on its own from the partially moved position
        let candidate = Vec3::new(target.x, self.pos.y, self.pos.z);
        if !self.collides(world, candidate) {
            self.pos.x = target.x;
        }
        let candidate = Vec3::new(self.pos.x, target.y, self.pos.z);
        if !self.collides(world, candidate) {
            self.pos.y = target.y;
        }
        let candidate = Vec3::new(self.pos.x, self.pos.y, target.z);
        if !self.collides(world, candidate) {
            self.pos.z = target.z;
        }
    }
}
