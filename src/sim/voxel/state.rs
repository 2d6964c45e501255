//! Voxel sandbox state

use std::collections::VecDeque;
use std::fmt;

use glam::Vec3;
use rand::Rng;
use serde::Serialize;

use super::block::{BlockKind, HOTBAR_KINDS};
use super::clock::DayClock;
use super::player::Player;
use super::world::{RayHit, World};
use crate::consts::{CLOUD_BOUND, EVENT_LOG_LEN, HOTBAR_SLOTS};
use crate::settings::VoxelTuning;
use crate::sim::common::{GamePhase, seeded_rng};

/// Nine inventory slots; the first seven hold block kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Hotbar {
    active: usize,
}

impl Hotbar {
    pub fn active(&self) -> usize {
        self.active
    }

    /// Select a slot (0-based). Out of range slots are ignored.
    pub fn select(&mut self, slot: usize) {
        if slot < HOTBAR_SLOTS {
            self.active = slot;
        }
    }

    /// Kind in the active slot, if the slot holds one
    pub fn active_kind(&self) -> Option<BlockKind> {
        HOTBAR_KINDS.get(self.active).copied()
    }
}

/// A drifting cloud
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Cloud {
    pub pos: Vec3,
    pub scale: Vec3,
}

/// Something the player did to the world
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WorldEvent {
    BlockBroken { kind: BlockKind, pos: Vec3 },
    BlockPlaced { kind: BlockKind, pos: Vec3 },
    Respawned,
    WorldLoaded { loaded: usize, dropped: usize },
}

impl fmt::Display for WorldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldEvent::BlockBroken { pos, .. } => {
                write!(f, "Block broken at ({}, {}, {})", pos.x, pos.y, pos.z)
            }
            WorldEvent::BlockPlaced { kind, pos } => write!(
                f,
                "{} block placed at ({}, {}, {})",
                kind.name(),
                pos.x,
                pos.y,
                pos.z
            ),
            WorldEvent::Respawned => write!(f, "Player respawned at spawn"),
            WorldEvent::WorldLoaded { loaded, dropped } => {
                write!(f, "World loaded: {loaded} blocks, {dropped} records dropped")
            }
        }
    }
}

/// An event stamped with the tick it happened on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedEvent {
    pub tick: u64,
    pub event: WorldEvent,
}

/// Complete voxel sandbox state
#[derive(Debug, Clone, Serialize)]
pub struct VoxelState {
    pub tuning: VoxelTuning,
    /// Always `Playing`; the sandbox has no end state
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub world: World,
    pub player: Player,
    pub hotbar: Hotbar,
    pub clock: DayClock,
    /// Block under the crosshair after the last tick
    pub target: Option<RayHit>,
    pub hud_visible: bool,
    pub clouds: Vec<Cloud>,
    /// Most recent events, oldest first
    pub events: VecDeque<LoggedEvent>,
}

impl VoxelState {
    pub fn new(seed: u64, tuning: VoxelTuning) -> Self {
        let mut rng = seeded_rng(seed);
        let clouds = (0..tuning.cloud_count)
            .map(|_| Cloud {
                pos: Vec3::new(
                    rng.random_range(-CLOUD_BOUND..CLOUD_BOUND),
                    rng.random_range(20.0..30.0),
                    rng.random_range(-CLOUD_BOUND..CLOUD_BOUND),
                ),
                scale: Vec3::new(rng.random_range(1.0..2.0), 0.5, rng.random_range(1.0..2.0)),
            })
            .collect();

        Self {
            tuning,
            phase: GamePhase::Playing,
            time_ticks: 0,
            world: World::with_terrain(tuning.terrain_half_extent, tuning.terrain_y),
            player: Player::new(&tuning),
            hotbar: Hotbar::default(),
            clock: DayClock::new(tuning.day_start_minutes, tuning.day_time_scale),
            target: None,
            hud_visible: true,
            clouds,
            events: VecDeque::with_capacity(EVENT_LOG_LEN),
        }
    }

    /// Append to the bounded event log
    pub fn record(&mut self, event: WorldEvent) {
        log::info!("voxel: {event}");
        if self.events.len() == EVENT_LOG_LEN {
            self.events.pop_front();
        }
        self.events.push_back(LoggedEvent {
            tick: self.time_ticks,
            event,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotbar_selection() {
        let mut hotbar = Hotbar::default();
        assert_eq!(hotbar.active_kind(), Some(BlockKind::Grass));
        hotbar.select(6);
        assert_eq!(hotbar.active_kind(), Some(BlockKind::Torch));
        hotbar.select(8);
        assert_eq!(hotbar.active(), 8);
        assert_eq!(hotbar.active_kind(), None);
        hotbar.select(9);
        assert_eq!(hotbar.active(), 8);
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut state = VoxelState::new(1, VoxelTuning::default());
        for _ in 0..15 {
            state.record(WorldEvent::Respawned);
        }
        assert_eq!(state.events.len(), EVENT_LOG_LEN);
    }

    #[test]
    fn test_event_messages() {
        let event = WorldEvent::BlockPlaced {
            kind: BlockKind::Wood,
            pos: Vec3::new(1.0, 0.5, -2.0),
        };
        assert_eq!(event.to_string(), "Wood block placed at (1, 0.5, -2)");
    }

    #[test]
    fn test_new_world_has_terrain_and_clouds() {
        let state = VoxelState::new(3, VoxelTuning::default());
        assert_eq!(state.world.len(), 2500);
        assert_eq!(state.clouds.len(), 20);
        assert_eq!(state.clock.to_string(), "06:30");
    }
}
