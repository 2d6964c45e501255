//! Text codec for placed blocks

use std::path::Path;

use glam::Vec3;
use serde::Serialize;

use crate::sim::voxel::{Block, BlockKind, VoxelState, World, WorldEvent};

const RECORD_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = ',';

/// Outcome of a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub dropped: usize,
}

/// Serialize every non-terrain block, in world order
pub fn save_world(world: &World) -> String {
    let mut out = String::new();
    for block in world.placed() {
        let Some(id) = block.kind.id() else {
            continue;
        };
        if !out.is_empty() {
            out.push(RECORD_SEPARATOR);
        }
        out.push_str(&format!(
            "{id}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            block.pos.x, block.pos.y, block.pos.z
        ));
    }
    out
}

/// Parse one `typeId,x,y,z` record
///
/// Returns `None` for the wrong number of fields, a non-numeric or
/// non-finite coordinate, or a type id with no block kind.
pub fn parse_record(record: &str) -> Option<Block> {
    let mut fields = record.split(FIELD_SEPARATOR).map(str::trim);
    let id: u8 = fields.next()?.parse().ok()?;
    let mut coord = || -> Option<f32> {
        let value: f32 = fields.next()?.parse().ok()?;
        value.is_finite().then_some(value)
    };
    let pos = Vec3::new(coord()?, coord()?, coord()?);
    if fields.next().is_some() {
        return None;
    }
    let kind = BlockKind::from_id(id)?;
    Some(Block::new(kind, pos))
}

/// Parse a whole snapshot. Blank segments are skipped without counting.
pub fn parse_world(text: &str) -> (Vec<Block>, LoadReport) {
    let mut blocks = Vec::new();
    let mut report = LoadReport::default();
    for record in text.split(RECORD_SEPARATOR) {
        if record.trim().is_empty() {
            continue;
        }
        match parse_record(record) {
            Some(block) => {
                blocks.push(block);
                report.loaded += 1;
            }
            None => {
                log::debug!("persistence: dropping record {record:?}");
                report.dropped += 1;
            }
        }
    }
    (blocks, report)
}

/// Replace every placed block with the snapshot's. Terrain is kept.
pub fn load_world(world: &mut World, text: &str) -> LoadReport {
    let (blocks, report) = parse_world(text);
    world.replace_placed(blocks);
    report
}

impl VoxelState {
    pub fn save_text(&self) -> String {
        save_world(&self.world)
    }

    /// Load a snapshot into the live world and log it
    pub fn load_text(&mut self, text: &str) -> LoadReport {
        let report = load_world(&mut self.world, text);
        self.target = None;
        self.record(WorldEvent::WorldLoaded {
            loaded: report.loaded,
            dropped: report.dropped,
        });
        report
    }

    /// Write the snapshot to a file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path.as_ref(), self.save_text())?;
        log::info!("World saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Read a snapshot file into the world
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<LoadReport> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(self.load_text(&text))
    }
}
