//! Block storage, overlap tests, and raycast targeting
//!
//! Blocks are kept in a flat list in insertion order. Every query is a
//! linear sweep; the world holds a few thousand cubes at most.

use glam::Vec3;
use serde::Serialize;

use super::block::{Block, BlockKind};
use crate::consts::BLOCK_HALF;

/// Positions closer than this on every axis are the same cell
const SAME_CELL_EPSILON: f32 = 1e-3;

/// Face of a block hit by a ray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Face {
    Top,
    Bottom,
    East,
    West,
    South,
    North,
}

impl Face {
    /// Outward unit normal
    pub fn normal(self) -> Vec3 {
        match self {
            Face::Top => Vec3::Y,
            Face::Bottom => Vec3::NEG_Y,
            Face::East => Vec3::X,
            Face::West => Vec3::NEG_X,
            Face::South => Vec3::Z,
            Face::North => Vec3::NEG_Z,
        }
    }
}

/// Nearest block along a ray
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RayHit {
    pub block: Block,
    pub face: Face,
    pub distance: f32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct World {
    blocks: Vec<Block>,
}

impl World {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Flat ground layer spanning `[-half_extent, half_extent)` on x and z
    pub fn with_terrain(half_extent: i32, y: f32) -> Self {
        let side = (2 * half_extent.max(0)) as usize;
        let mut blocks = Vec::with_capacity(side * side);
        for x in -half_extent..half_extent {
            for z in -half_extent..half_extent {
                blocks.push(Block::new(
                    BlockKind::Terrain,
                    Vec3::new(x as f32, y, z as f32),
                ));
            }
        }
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks that world snapshots carry
    pub fn placed(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.kind.is_saved())
    }

    pub fn block_at(&self, pos: Vec3) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.pos.abs_diff_eq(pos, SAME_CELL_EPSILON))
    }

    /// Add a block unless the cell is occupied
    pub fn insert(&mut self, block: Block) -> bool {
        if self.block_at(block.pos).is_some() {
            return false;
        }
        self.blocks.push(block);
        true
    }

    pub fn remove_at(&mut self, pos: Vec3) -> Option<Block> {
        let index = self
            .blocks
            .iter()
            .position(|b| b.pos.abs_diff_eq(pos, SAME_CELL_EPSILON))?;
        Some(self.blocks.remove(index))
    }

    /// Drop every saved block and add `blocks` in their place. Terrain stays.
    pub fn replace_placed(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.blocks.retain(|b| !b.kind.is_saved());
        self.blocks.extend(blocks);
    }

    /// Does a box centred at `center` with `half` extents overlap any block?
    pub fn overlaps(&self, center: Vec3, half: Vec3) -> bool {
        let reach = half + Vec3::splat(BLOCK_HALF);
        self.blocks.iter().any(|b| {
            let d = (center - b.pos).abs();
            d.x < reach.x && d.y < reach.y && d.z < reach.z
        })
    }

    /// Nearest block hit by a ray from `origin` along `dir` within `max_distance`
    ///
    /// Rays starting inside a block do not hit that block.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = dir.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        let mut best: Option<RayHit> = None;
        for block in &self.blocks {
            let Some((distance, face)) = ray_box_entry(origin, dir, block.pos, BLOCK_HALF) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if best.is_none_or(|hit| distance < hit.distance) {
                best = Some(RayHit {
                    block: *block,
                    face,
                    distance,
                });
            }
        }
        best
    }
}

/// Slab test against an axis-aligned cube. Returns the entry distance and
/// the face entered, or `None` when the ray misses or starts inside.
fn ray_box_entry(origin: Vec3, dir: Vec3, center: Vec3, half: f32) -> Option<(f32, Face)> {
    let min = center - Vec3::splat(half);
    let max = center + Vec3::splat(half);

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut face = Face::Top;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        if d.abs() < 1e-8 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let mut t0 = (min[axis] - o) / d;
        let mut t1 = (max[axis] - o) / d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            // Entering through the face that opposes the ray direction
            face = match (axis, d > 0.0) {
                (0, true) => Face::West,
                (0, false) => Face::East,
                (1, true) => Face::Bottom,
                (1, false) => Face::Top,
                (_, true) => Face::North,
                (_, false) => Face::South,
            };
        }
        t_exit = t_exit.min(t1);
    }

    if t_enter > t_exit || t_enter < 0.0 {
        return None;
    }
    Some((t_enter, face))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_size() {
        let world = World::with_terrain(25, -0.5);
        assert_eq!(world.len(), 2500);
        assert_eq!(world.placed().count(), 0);
        assert!(world.block_at(Vec3::new(-25.0, -0.5, 24.0)).is_some());
        assert!(world.block_at(Vec3::new(25.0, -0.5, 0.0)).is_none());
    }

    #[test]
    fn test_insert_rejects_occupied_cell() {
        let mut world = World::new();
        assert!(world.insert(Block::new(BlockKind::Dirt, Vec3::new(1.0, 0.5, 1.0))));
        assert!(!world.insert(Block::new(BlockKind::Wool, Vec3::new(1.0, 0.5, 1.0))));
        assert_eq!(world.len(), 1);
        assert_eq!(
            world.remove_at(Vec3::new(1.0, 0.5, 1.0)).map(|b| b.kind),
            Some(BlockKind::Dirt)
        );
        assert!(world.is_empty());
    }

    #[test]
    fn test_replace_placed_keeps_terrain() {
        let mut world = World::with_terrain(2, -0.5);
        world.insert(Block::new(BlockKind::Wood, Vec3::new(0.0, 0.5, 0.0)));
        world.replace_placed([Block::new(BlockKind::Diamond, Vec3::new(1.0, 0.5, 1.0))]);
        assert_eq!(world.len(), 17);
        let placed: Vec<_> = world.placed().map(|b| b.kind).collect();
        assert_eq!(placed, vec![BlockKind::Diamond]);
    }

    #[test]
    fn test_overlap_uses_half_extents() {
        let mut world = World::new();
        world.insert(Block::new(BlockKind::Wood, Vec3::ZERO));
        let half = Vec3::new(0.3, 0.9, 0.3);
        assert!(world.overlaps(Vec3::new(0.79, 0.0, 0.0), half));
        assert!(!world.overlaps(Vec3::new(0.81, 0.0, 0.0), half));
        assert!(world.overlaps(Vec3::new(0.0, 1.39, 0.0), half));
        assert!(!world.overlaps(Vec3::new(0.0, 1.41, 0.0), half));
    }

    #[test]
    fn test_raycast_down_hits_top_face() {
        let world = World::with_terrain(3, -0.5);
        let hit = world
            .raycast(Vec3::new(0.2, 2.8, 0.1), Vec3::NEG_Y, 100.0)
            .expect("ground below");
        assert_eq!(hit.face, Face::Top);
        assert_eq!(hit.block.pos, Vec3::new(0.0, -0.5, 0.0));
        assert!((hit.distance - 2.8).abs() < 1e-4);
    }

    #[test]
    fn test_raycast_picks_nearest_side_face() {
        let mut world = World::new();
        world.insert(Block::new(BlockKind::Wood, Vec3::new(0.0, 0.5, -3.0)));
        world.insert(Block::new(BlockKind::Dirt, Vec3::new(0.0, 0.5, -6.0)));
        let hit = world
            .raycast(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Z, 100.0)
            .expect("wood ahead");
        assert_eq!(hit.block.kind, BlockKind::Wood);
        assert_eq!(hit.face, Face::South);
        assert_eq!(hit.face.normal(), Vec3::Z);
    }

    #[test]
    fn test_raycast_respects_reach() {
        let mut world = World::new();
        world.insert(Block::new(BlockKind::Wood, Vec3::new(10.0, 0.0, 0.0)));
        assert!(world.raycast(Vec3::ZERO, Vec3::X, 5.0).is_none());
        let hit = world.raycast(Vec3::ZERO, Vec3::X, 50.0).unwrap();
        assert_eq!(hit.face, Face::West);
    }
}
