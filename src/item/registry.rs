use std::collections::HashMap;
use crate::action::Action;
use crate::resource::{ResourceKind, ResourceStack};
use super::definition::ItemDefinition;
use super::error::RegistryError;
use super::properties::*;
use super::stack::ItemStack;

/// Central registry of all item definitions
///
/// Stacks created through the registry get their max stack size and
/// resource containers from the item's definition.
#[derive(Debug, Clone)]
pub struct ItemRegistry {
    items: HashMap<String, ItemDefinition>,
}

impl ItemRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        ItemRegistry {
            items: HashMap::new(),
        }
    }

    /// Creates a registry with all built-in items pre-registered
    pub fn create_default() -> Self {
        let mut registry = Self::new();
        registry.register_base_items();
        registry
    }

    /// Registers a new item definition
    ///
    /// Returns error if an item with this ID already exists.
    pub fn register(&mut self, item: ItemDefinition) -> Result<(), RegistryError> {
        if self.items.contains_key(&item.id) {
            return Err(RegistryError::DuplicateItem(item.id));
        }

        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Gets an item definition by ID
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// Returns true if an item with this ID exists
    pub fn exists(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Returns all item definitions
    pub fn all_items(&self) -> Vec<&ItemDefinition> {
        self.items.values().collect()
    }

    /// Creates a stack of a registered item with empty containers
    pub fn create_stack(&self, id: &str, quantity: u32) -> Result<ItemStack, RegistryError> {
        let definition = self
            .get(id)
            .ok_or_else(|| RegistryError::UnknownItem(id.to_string()))?;
        Ok(definition.instantiate(quantity))
    }

    /// Creates a single container item pre-filled with `contents`
    ///
    /// Contents beyond the container's capacity are dropped.
    pub fn create_filled(&self, id: &str, contents: &ResourceStack) -> Result<ItemStack, RegistryError> {
        let mut stack = self.create_stack(id, 1)?;
        let handler = stack
            .handler_mut(contents.kind)
            .ok_or_else(|| RegistryError::NotAContainer {
                item_id: id.to_string(),
                kind: contents.kind,
            })?;
        handler.insert(contents, Action::Execute);
        Ok(stack)
    }

    // ======================================================================
    // Item Registration - Built-in Items
    // ======================================================================

    fn register_base_items(&mut self) {
        let base_items = [
            ItemDefinition::new(
                "bucket",
                "Bucket",
                "Holds one bucket of any fluid.",
                1,
                ItemProperties::Container {
                    handlers: vec![HandlerSpec::new(ResourceKind::Fluid, 1_000)],
                },
            ),
            ItemDefinition::new(
                "chemical_tank",
                "Chemical Tank",
                "Portable tank for gases, infusions, pigments and slurries.",
                1,
                ItemProperties::Container {
                    handlers: vec![
                        HandlerSpec::new(ResourceKind::Gas, 8_000),
                        HandlerSpec::new(ResourceKind::Infusion, 8_000),
                        HandlerSpec::new(ResourceKind::Pigment, 8_000),
                        HandlerSpec::new(ResourceKind::Slurry, 8_000),
                    ],
                },
            ),
            ItemDefinition::new(
                "stone",
                "Stone",
                "Plain building material.",
                64,
                ItemProperties::Material,
            ),
        ];

        for item in base_items {
            if let Err(error) = self.register(item) {
                log::warn!("skipping built-in item: {}", error);
            }
        }
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::create_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_base_items() {
        let registry = ItemRegistry::create_default();
        assert!(registry.exists("bucket"));
        assert!(registry.exists("chemical_tank"));
        assert!(registry.exists("stone"));
        assert_eq!(registry.all_items().len(), 3);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = ItemRegistry::create_default();
        let duplicate = ItemDefinition::new("stone", "Stone", "", 64, ItemProperties::Material);

        assert_eq!(
            registry.register(duplicate),
            Err(RegistryError::DuplicateItem("stone".to_string()))
        );
    }

    #[test]
    fn test_create_stack_uses_definition() {
        let registry = ItemRegistry::create_default();
        let tank = registry.create_stack("chemical_tank", 1).unwrap();

        assert_eq!(tank.max_stack_size, 1);
        assert!(tank.has_handler(ResourceKind::Gas));
        assert!(tank.has_handler(ResourceKind::Slurry));
        assert!(!tank.has_handler(ResourceKind::Fluid));

        let stone = registry.create_stack("stone", 10).unwrap();
        assert!(!stone.is_hybrid_capable());

        assert!(matches!(
            registry.create_stack("missing", 1),
            Err(RegistryError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_create_filled() {
        let registry = ItemRegistry::create_default();
        let water = ResourceStack::new(ResourceKind::Fluid, "water", 5_000);
        let bucket = registry.create_filled("bucket", &water).unwrap();

        assert_eq!(bucket.handler(ResourceKind::Fluid).map(|h| h.amount()), Some(1_000));

        let hydrogen = ResourceStack::new(ResourceKind::Gas, "hydrogen", 10);
        assert!(matches!(
            registry.create_filled("bucket", &hydrogen),
            Err(RegistryError::NotAContainer { .. })
        ));
    }
}
