//! Storage layer: index snapshot persistence.
//!
//! The index lives fully in memory; disk access is confined to saving and
//! loading one bincode snapshot (CRC32 + atomic temp-file + rename).

/// Disk persistence: snapshot save/load with atomic writes.
pub mod persistence;

pub use persistence::{load_index, save_index, snapshot_path};
