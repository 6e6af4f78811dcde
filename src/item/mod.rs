// Item system module
//
// This module provides the item side of slots, including:
// - Item definitions and properties
// - Item registry for centralized storage
// - Item stacks carrying resource containers (capabilities)

pub mod definition;
pub mod error;
pub mod properties;
pub mod registry;
pub mod stack;

// Re-export main types for convenient access
pub use definition::ItemDefinition;
pub use error::RegistryError;
pub use properties::{HandlerSpec, ItemProperties};
pub use registry::ItemRegistry;
pub use stack::ItemStack;
