//! Machine configuration loaded from JSON

use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::item::{ItemDefinition, ItemRegistry, RegistryError};
use crate::resource::{KindTable, MergedTank, ResourceKind};

/// Errors that can occur while loading a machine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Layout of one machine: its merged tank and its item slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub name: String,

    /// Item limit of each hybrid slot
    pub slot_limit: u32,

    /// Capacity of each merged-tank sub-tank
    pub tanks: KindTable<u64>,

    /// Item definitions registered on top of the built-in ones
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

impl MachineConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses and validates a config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MachineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_limit == 0 {
            return Err(ConfigError::Invalid("slot_limit must be at least 1".to_string()));
        }
        for (kind, capacity) in self.tanks.iter() {
            if *capacity == 0 {
                return Err(ConfigError::Invalid(format!("{} tank capacity must be at least 1", kind)));
            }
        }
        if !is_plain_file_name(&self.name) {
            return Err(ConfigError::Invalid(format!(
                "machine name '{}' must be non-empty with no path separators",
                self.name
            )));
        }
        for item in &self.items {
            if item.max_stack_size == 0 {
                return Err(ConfigError::Invalid(format!(
                    "item '{}' has a max stack size of 0",
                    item.id
                )));
            }
            if item.is_container() && item.max_stack_size > 1 {
                return Err(ConfigError::Invalid(format!(
                    "container item '{}' must have a max stack size of 1",
                    item.id
                )));
            }
        }
        Ok(())
    }

    /// Empty merged tank with the configured capacities
    pub fn build_tank(&self) -> MergedTank {
        MergedTank::new(&self.tanks)
    }

    /// Built-in items plus the configured ones
    pub fn build_registry(&self) -> Result<ItemRegistry, RegistryError> {
        let mut registry = ItemRegistry::create_default();
        for item in &self.items {
            registry.register(item.clone())?;
        }
        Ok(registry)
    }
}

/// Name usable as a single file name component
pub(crate) fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            name: "gas_burning_generator".to_string(),
            slot_limit: 1,
            tanks: KindTable::from_fn(|kind| match kind {
                ResourceKind::Fluid => 10_000,
                _ => 18_000,
            }),
            items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use crate::item::{HandlerSpec, ItemProperties};

    #[test]
    fn test_default_is_valid() {
        let config = MachineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.build_tank().gas_tank().capacity(), 18_000);
        assert_eq!(config.build_tank().fluid_tank().capacity(), 10_000);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "name": "pigment_mixer",
            "slot_limit": 1,
            "tanks": { "fluid": 1000, "gas": 2000, "infusion": 3000, "pigment": 4000, "slurry": 5000 },
            "items": [
                {
                    "id": "pigment_jar",
                    "name": "Pigment Jar",
                    "max_stack_size": 1,
                    "properties": { "Container": { "handlers": [ { "kind": "pigment", "capacity": 500 } ] } }
                }
            ]
        }"#;

        let config = MachineConfig::from_json(json).unwrap();
        assert_eq!(config.name, "pigment_mixer");
        assert_eq!(config.build_tank().pigment_tank().capacity(), 4000);

        let registry = config.build_registry().unwrap();
        let jar = registry.create_stack("pigment_jar", 1).unwrap();
        assert!(jar.has_handler(ResourceKind::Pigment));
        assert!(registry.exists("bucket"));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let mut config = MachineConfig::default();
        config.tanks.slurry = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_slot_limit() {
        let mut config = MachineConfig::default();
        config.slot_limit = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_stackable_container() {
        let mut config = MachineConfig::default();
        config.items.push(ItemDefinition::new(
            "pigment_jar",
            "Pigment Jar",
            "",
            16,
            ItemProperties::Container {
                handlers: vec![HandlerSpec::new(ResourceKind::Pigment, 500)],
            },
        ));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_path_like_name() {
        for name in ["", "../escape", "a/b", "a\\b", ".."] {
            let mut config = MachineConfig::default();
            config.name = name.to_string();
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))), "{:?} accepted", name);
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(MachineConfig::from_json("{ not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_duplicate_item_fails_registry() {
        let mut config = MachineConfig::default();
        config.items.push(ItemDefinition::new(
            "bucket",
            "Bucket",
            "",
            1,
            ItemProperties::Container {
                handlers: vec![HandlerSpec::new(ResourceKind::Fluid, 1000)],
            },
        ));
        assert_eq!(
            config.build_registry().unwrap_err(),
            RegistryError::DuplicateItem("bucket".to_string())
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&MachineConfig::default()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = MachineConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config, MachineConfig::default());

        let missing = MachineConfig::load_from_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
