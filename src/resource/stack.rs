use serde::{Deserialize, Serialize};
use super::kind::ResourceKind;

/// An amount of one specific resource (e.g. 500 mB of water, 200 of hydrogen)
///
/// Resources only combine when both kind and resource id match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStack {
    /// Which of the five kinds this resource belongs to
    pub kind: ResourceKind,

    /// Resource identifier within the kind ("water", "hydrogen", ...)
    pub resource: String,

    /// Amount in the kind's base unit
    pub amount: u64,
}

impl ResourceStack {
    pub fn new(kind: ResourceKind, resource: impl Into<String>, amount: u64) -> Self {
        ResourceStack {
            kind,
            resource: resource.into(),
            amount,
        }
    }

    /// An empty stack of the given kind
    pub fn empty(kind: ResourceKind) -> Self {
        ResourceStack {
            kind,
            resource: String::new(),
            amount: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0 || self.resource.is_empty()
    }

    /// Returns true if both stacks hold the same resource of the same kind
    pub fn is_same_resource(&self, other: &ResourceStack) -> bool {
        self.kind == other.kind && self.resource == other.resource
    }

    /// Copy of this stack with a different amount (0 yields an empty stack)
    pub fn with_amount(&self, amount: u64) -> Self {
        if amount == 0 {
            return ResourceStack::empty(self.kind);
        }
        ResourceStack {
            kind: self.kind,
            resource: self.resource.clone(),
            amount,
        }
    }
}
