//! Fixed timestep tick for the voxel sandbox

use glam::{Vec2, Vec3};

use super::block::Block;
use super::player::MoveKeys;
use super::state::{VoxelState, WorldEvent};
use crate::consts::CLOUD_BOUND;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct VoxelInput {
    /// Held movement keys
    pub keys: MoveKeys,
    /// Mouse-look movement in pixels since the last tick
    pub look: Vec2,
    /// Primary click: break the targeted block
    pub break_block: bool,
    /// Secondary click: place the active hotbar kind against the targeted face
    pub place_block: bool,
    /// Hotbar slot picked with the number keys (0-based)
    pub select_slot: Option<usize>,
    pub respawn: bool,
    pub toggle_hud: bool,
    /// Jump the day clock to an `HH:MM` time
    pub set_clock: Option<String>,
}

/// Advance the sandbox by one fixed timestep
pub fn tick(state: &mut VoxelState, input: &VoxelInput, dt: f32) {
    state.time_ticks += 1;
    let tuning = state.tuning;

    if let Some(slot) = input.select_slot {
        state.hotbar.select(slot);
    }
    if input.toggle_hud {
        state.hud_visible = !state.hud_visible;
    }
    if let Some(text) = &input.set_clock {
        if !state.clock.set_from_str(text) {
            log::debug!("voxel: ignoring clock request {text:?}");
        }
    }
    if input.respawn {
        state.player.respawn(tuning.spawn);
        state.record(WorldEvent::Respawned);
    }

    state.player.look(input.look, tuning.look_sensitivity);
    state.player.step(&state.world, input.keys, &tuning, dt);

    state.target = state.world.raycast(
        state.player.eye(),
        state.player.look_direction(),
        tuning.reach,
    );

    if input.break_block {
        break_target(state);
    } else if input.place_block {
        place_at_target(state);
    }

    state.clock.advance(dt);

    for cloud in &mut state.clouds {
        cloud.pos.x += tuning.cloud_drift * dt;
        if cloud.pos.x > CLOUD_BOUND {
            cloud.pos.x = -CLOUD_BOUND;
        }
    }
}

fn break_target(state: &mut VoxelState) {
    let Some(hit) = state.target.take() else {
        return;
    };
    if let Some(block) = state.world.remove_at(hit.block.pos) {
        state.record(WorldEvent::BlockBroken {
            kind: block.kind,
            pos: block.pos,
        });
    }
}

fn place_at_target(state: &mut VoxelState) {
    let Some(hit) = state.target else {
        return;
    };
    let Some(kind) = state.hotbar.active_kind() else {
        return;
    };
    let pos: Vec3 = hit.block.pos + hit.face.normal();
    if state.world.insert(Block::new(kind, pos)) {
        state.record(WorldEvent::BlockPlaced { kind, pos });
    }
}
