//! Snapshot data types
//!
//! Everything here is plain serde data written to JSON by the
//! [`SnapshotStore`](super::SnapshotStore).

use std::time::SystemTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::inventory::HybridMode;
use crate::item::ItemStack;
use crate::resource::{KindTable, ResourceStack};

/// Current snapshot file version
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// The root snapshot file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub version: u32,
    pub timestamp: SystemTime,
    pub metadata: SnapshotMetadata,
    pub tank: SaveData,
    pub slots: Vec<SlotSaveData>,
}

/// Metadata about the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub machine_name: String,
    pub crate_version: String,

    /// Ticks the machine had run when the snapshot was taken
    pub tick: u64,
    pub snapshot_type: SnapshotType,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotType {
    Manual,
    Auto,
}

/// State of one hybrid slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSaveData {
    pub mode: HybridMode,
    pub stack: ItemStack,
    pub draining: bool,
    pub filling: bool,
}

/// Merged tank state: capacities plus whatever the active sub-tank holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankSaveData {
    pub capacities: KindTable<u64>,
    pub contents: Option<ResourceStack>,
}

/// Generic wrapper for saveable data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub data_type: String,
    pub json_data: String,
}

/// Error types for snapshot operations
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported snapshot version: {0}")]
    InvalidVersion(u32),

    #[error("corrupted snapshot data: {0}")]
    CorruptedData(String),

    #[error("'{0}' is not a plain file name")]
    InvalidName(String),
}
