//! Snapshot system for machine state
//!
//! This module provides JSON snapshots of a machine's merged tank and
//! hybrid slots:
//! - `types`: snapshot data structures and error types
//! - `manager`: SnapshotStore for file operations
//! - `saveable`: Saveable trait plus slot capture/restore helpers
//!
//! # Example Usage
//!
//! ```ignore
//! let store = SnapshotStore::new(SnapshotStore::default_directory().unwrap())?;
//! let snapshot = MachineSnapshot::capture(metadata, &tank.borrow(), &[&input, &output])?;
//! store.save(&snapshot)?;
//!
//! let loaded = store.latest("gas_burning_generator")?;
//! ```

pub mod manager;
pub mod saveable;
pub mod types;

// Re-export commonly used types
pub use manager::{SnapshotInfo, SnapshotStore};
pub use saveable::{Saveable, capture_slot, restore_slot};
pub use types::*;
