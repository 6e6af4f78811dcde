use serde::{Serialize, Deserialize};
use crate::resource::ResourceTank;
use super::properties::ItemProperties;
use super::stack::ItemStack;

/// The blueprint for an item type
///
/// This defines the static properties of an item that are shared
/// across all instances. Think of it as the "class" and ItemStack
/// as the "instance".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier (used for lookups and saves)
    pub id: String,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Maximum stack size (1 = non-stackable, 64 = typical)
    pub max_stack_size: u32,

    /// Item-specific properties
    pub properties: ItemProperties,
}

impl ItemDefinition {
    /// Creates a new item definition
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        max_stack_size: u32,
        properties: ItemProperties,
    ) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            max_stack_size,
            properties,
        }
    }

    /// Returns true if instances carry resource containers
    pub fn is_container(&self) -> bool {
        matches!(self.properties, ItemProperties::Container { .. })
    }

    /// Builds a stack of this item with empty containers
    pub fn instantiate(&self, quantity: u32) -> ItemStack {
        let mut stack = ItemStack::new(self.id.clone(), quantity)
            .with_max_stack_size(self.max_stack_size);

        if let ItemProperties::Container { handlers } = &self.properties {
            for spec in handlers {
                stack = stack.with_handler(ResourceTank::new(spec.kind, spec.capacity));
            }
        }

        stack
    }
}
