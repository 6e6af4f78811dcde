use serde::{Serialize, Deserialize};
use crate::resource::{ResourceKind, ResourceTank};

/// An instance of an item with quantity
///
/// This represents a specific amount of an item type, as stored in a slot.
/// A stack may carry resource containers ("handlers"), one per resource
/// kind; these are the capabilities hybrid slots look for.
///
/// Stacks are plain values: slots hand out `&ItemStack` or fresh copies,
/// never a handle into their own storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// ID of the item definition in ItemRegistry (empty for the empty stack)
    pub item_id: String,

    /// How many of this item
    pub quantity: u32,

    /// The item kind's own stack ceiling
    pub max_stack_size: u32,

    /// Resource containers carried by this item, at most one per kind
    #[serde(default)]
    pub handlers: Vec<ResourceTank>,
}

/// Stack size used when an item is created without a definition
pub const DEFAULT_MAX_STACK_SIZE: u32 = 64;

impl ItemStack {
    /// Creates a new item stack with the default max stack size
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        ItemStack {
            item_id: item_id.into(),
            quantity,
            max_stack_size: DEFAULT_MAX_STACK_SIZE,
            handlers: Vec::new(),
        }
    }

    /// The empty stack ("no item")
    pub fn empty() -> Self {
        ItemStack {
            item_id: String::new(),
            quantity: 0,
            max_stack_size: DEFAULT_MAX_STACK_SIZE,
            handlers: Vec::new(),
        }
    }

    /// Sets the max stack size
    pub fn with_max_stack_size(mut self, max_stack_size: u32) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }

    /// Attaches a resource container, replacing any of the same kind
    ///
    /// Container items never stack: the max stack size drops to 1.
    pub fn with_handler(mut self, handler: ResourceTank) -> Self {
        self.handlers.retain(|existing| existing.kind() != handler.kind());
        self.handlers.push(handler);
        self.max_stack_size = 1;
        self
    }

    /// Returns true if this stack is empty
    pub fn is_empty(&self) -> bool {
        self.quantity == 0 || self.item_id.is_empty()
    }

    /// Copy of this stack with a different quantity
    ///
    /// A quantity of 0 gives the empty stack.
    pub fn with_quantity(&self, quantity: u32) -> ItemStack {
        if quantity == 0 {
            return ItemStack::empty();
        }
        ItemStack {
            quantity,
            ..self.clone()
        }
    }

    /// Returns true if this stack can merge with another
    ///
    /// Stacks merge when they're the same item with identical contents.
    pub fn can_stack_with(&self, other: &ItemStack) -> bool {
        self.item_id == other.item_id
            && self.max_stack_size == other.max_stack_size
            && self.handlers == other.handlers
    }

    /// Capability lookup: the container for `kind`, if this item has one
    pub fn handler(&self, kind: ResourceKind) -> Option<&ResourceTank> {
        if self.is_empty() {
            return None;
        }
        self.handlers.iter().find(|handler| handler.kind() == kind)
    }

    pub fn handler_mut(&mut self, kind: ResourceKind) -> Option<&mut ResourceTank> {
        if self.is_empty() {
            return None;
        }
        self.handlers.iter_mut().find(|handler| handler.kind() == kind)
    }

    pub fn has_handler(&self, kind: ResourceKind) -> bool {
        self.handler(kind).is_some()
    }

    /// Returns true if the stack exposes a fluid handler or any of the
    /// four chemical handlers
    pub fn is_hybrid_capable(&self) -> bool {
        ResourceKind::ALL.iter().any(|kind| self.has_handler(*kind))
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}
