use thiserror::Error;
use crate::resource::ResourceKind;

/// Errors that can occur during item registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An item with this ID is already registered
    #[error("item '{0}' already registered")]
    DuplicateItem(String),

    /// Item ID doesn't exist in registry
    #[error("unknown item ID: {0}")]
    UnknownItem(String),

    /// The item has no container for the requested resource kind
    #[error("item '{item_id}' has no {kind} container")]
    NotAContainer {
        item_id: String,
        kind: ResourceKind,
    },
}
