//! Voxel world snapshots
//!
//! Worlds are saved as plain text, one `typeId,x,y,z` record per placed
//! block, joined by `;`. Loading is lenient: bad records are counted and
//! skipped, never fatal.

pub mod world_text;

pub use world_text::{LoadReport, load_world, parse_record, parse_world, save_world};
