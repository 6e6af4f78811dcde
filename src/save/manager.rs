//! Snapshot store for writing and reading machine snapshots
//!
//! This module provides the SnapshotStore struct which handles:
//! - Writing snapshots to timestamped JSON files
//! - Loading snapshots with a version check
//! - Listing and pruning old snapshots

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use crate::config::is_plain_file_name;
use super::types::*;

pub struct SnapshotStore {
    directory: PathBuf,
}

impl SnapshotStore {
    /// Opens a store in the given directory
    ///
    /// The directory will be created if it doesn't exist.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            fs::create_dir_all(&directory)?;
        }

        Ok(SnapshotStore { directory })
    }

    /// Per-user default location, None when the platform has no data directory
    pub fn default_directory() -> Option<PathBuf> {
        dirs::data_dir().map(|path| path.join("hybrid-slots").join("snapshots"))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Writes a snapshot and returns the file it went to
    pub fn save(&self, snapshot: &MachineSnapshot) -> Result<PathBuf, SaveError> {
        check_name(&snapshot.metadata.machine_name)?;
        let filepath = self.next_free_path(&snapshot.metadata);

        // Pretty format keeps snapshots readable
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&filepath, json)?;

        log::info!("snapshot saved to: {}", filepath.display());

        Ok(filepath)
    }

    /// Loads a snapshot by filename
    pub fn load(&self, filename: &str) -> Result<MachineSnapshot, SaveError> {
        check_name(filename)?;
        let filepath = self.directory.join(filename);

        if !filepath.exists() {
            return Err(SaveError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("snapshot not found: {}", filename),
            )));
        }

        let json = fs::read_to_string(&filepath)?;
        let snapshot: MachineSnapshot = serde_json::from_str(&json)?;

        if snapshot.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(snapshot.version));
        }

        Ok(snapshot)
    }

    /// Lists all readable snapshots, newest first
    ///
    /// Files that fail to load are skipped with a warning.
    pub fn list(&self) -> Result<Vec<SnapshotInfo>, SaveError> {
        let mut snapshots = Vec::new();

        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|f| f.to_str()) else {
                continue;
            };

            match self.load(filename) {
                Ok(snapshot) => snapshots.push(SnapshotInfo {
                    filename: filename.to_string(),
                    timestamp: snapshot.timestamp,
                    metadata: snapshot.metadata,
                }),
                Err(error) => log::warn!("skipping snapshot {}: {}", filename, error),
            }
        }

        snapshots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(snapshots)
    }

    /// Newest snapshot of the named machine
    pub fn latest(&self, machine_name: &str) -> Result<Option<MachineSnapshot>, SaveError> {
        let newest = self
            .list()?
            .into_iter()
            .find(|info| info.metadata.machine_name == machine_name);

        match newest {
            Some(info) => self.load(&info.filename).map(Some),
            None => Ok(None),
        }
    }

    /// Deletes old snapshots of the named machine, keeping the `keep_count`
    /// most recent
    ///
    /// Returns the number of files removed.
    pub fn prune(&self, machine_name: &str, keep_count: usize) -> Result<usize, SaveError> {
        let stale: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|info| info.metadata.machine_name == machine_name)
            .skip(keep_count)
            .collect();

        for info in &stale {
            fs::remove_file(self.directory.join(&info.filename))?;
        }

        if !stale.is_empty() {
            log::info!("pruned {} old snapshot(s) of {}", stale.len(), machine_name);
        }

        Ok(stale.len())
    }

    fn next_free_path(&self, metadata: &SnapshotMetadata) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let prefix = match metadata.snapshot_type {
            SnapshotType::Manual => "snapshot",
            SnapshotType::Auto => "autosave",
        };
        let stem = format!("{}_{}_{}", metadata.machine_name, prefix, timestamp);

        let mut filepath = self.directory.join(format!("{}.json", stem));
        let mut counter = 1;
        while filepath.exists() {
            filepath = self.directory.join(format!("{}_{}.json", stem, counter));
            counter += 1;
        }
        filepath
    }
}

/// Names must stay inside the store's directory
fn check_name(name: &str) -> Result<(), SaveError> {
    if is_plain_file_name(name) {
        Ok(())
    } else {
        Err(SaveError::InvalidName(name.to_string()))
    }
}

pub struct SnapshotInfo {
    pub filename: String,
    pub timestamp: SystemTime,
    pub metadata: SnapshotMetadata,
}
