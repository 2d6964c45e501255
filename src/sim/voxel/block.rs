//! Block kinds and placed blocks

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Every kind of block in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Generated ground; never saved
    Terrain,
    Grass,
    Dirt,
    Wood,
    Cobblestone,
    Diamond,
    Wool,
    /// Light source
    Torch,
}

/// Hotbar order, slot 0 first
pub const HOTBAR_KINDS: [BlockKind; 7] = [
    BlockKind::Grass,
    BlockKind::Dirt,
    BlockKind::Wood,
    BlockKind::Cobblestone,
    BlockKind::Diamond,
    BlockKind::Wool,
    BlockKind::Torch,
];

impl BlockKind {
    /// Save-file type id; terrain has none
    pub fn id(self) -> Option<u8> {
        match self {
            BlockKind::Terrain => None,
            BlockKind::Grass => Some(1),
            BlockKind::Dirt => Some(2),
            BlockKind::Wood => Some(3),
            BlockKind::Cobblestone => Some(4),
            BlockKind::Diamond => Some(5),
            BlockKind::Wool => Some(6),
            BlockKind::Torch => Some(7),
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        HOTBAR_KINDS.iter().copied().find(|kind| kind.id() == Some(id))
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Terrain => "Terrain",
            BlockKind::Grass => "Grass",
            BlockKind::Dirt => "Dirt",
            BlockKind::Wood => "Wood",
            BlockKind::Cobblestone => "Cobblestone",
            BlockKind::Diamond => "Diamond",
            BlockKind::Wool => "Wool",
            BlockKind::Torch => "Torch",
        }
    }

    pub fn color(self) -> u32 {
        match self {
            BlockKind::Terrain | BlockKind::Grass => 0x3cb80b,
            BlockKind::Dirt => 0x59311a,
            BlockKind::Wood => 0x876958,
            BlockKind::Cobblestone => 0x5c5c5c,
            BlockKind::Diamond => 0x47fff9,
            BlockKind::Wool => 0xd4d6d6,
            BlockKind::Torch => 0xffa500,
        }
    }

    pub fn emits_light(self) -> bool {
        matches!(self, BlockKind::Torch)
    }

    /// Whether world snapshots include this kind
    pub fn is_saved(self) -> bool {
        self.id().is_some()
    }
}

/// A unit cube; `pos` is its centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub pos: Vec3,
}

impl Block {
    pub fn new(kind: BlockKind, pos: Vec3) -> Self {
        Self { kind, pos }
    }
}
