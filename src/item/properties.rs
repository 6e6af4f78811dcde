use serde::{Serialize, Deserialize};
use crate::resource::ResourceKind;

/// Different categories of items with type-specific data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemProperties {
    /// Basic material (no resource containers)
    Material,

    /// Item carrying one resource container per listed kind
    Container {
        handlers: Vec<HandlerSpec>,
    },
}

/// Shape of one container on a container item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerSpec {
    pub kind: ResourceKind,
    pub capacity: u64,
}

impl HandlerSpec {
    pub fn new(kind: ResourceKind, capacity: u64) -> Self {
        HandlerSpec { kind, capacity }
    }
}
