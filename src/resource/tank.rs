use serde::{Deserialize, Serialize};
use crate::action::Action;
use super::kind::ResourceKind;
use super::stack::ResourceStack;

/// A single-kind resource store with a fixed capacity
///
/// Holds at most one resource id at a time. The same type backs both the
/// sub-tanks of a merged tank and the containers carried by item stacks
/// (buckets, chemical tanks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTank {
    kind: ResourceKind,
    capacity: u64,
    stored: Option<ResourceStack>,
}

impl ResourceTank {
    /// Creates an empty tank
    pub fn new(kind: ResourceKind, capacity: u64) -> Self {
        ResourceTank {
            kind,
            capacity,
            stored: None,
        }
    }

    /// Creates a tank already holding `contents`, capped at capacity
    pub fn filled(capacity: u64, contents: ResourceStack) -> Self {
        let mut tank = ResourceTank::new(contents.kind, capacity);
        tank.insert(&contents, Action::Execute);
        tank
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Currently stored resource, None when empty
    pub fn stored(&self) -> Option<&ResourceStack> {
        self.stored.as_ref()
    }

    pub fn amount(&self) -> u64 {
        self.stored.as_ref().map_or(0, |stack| stack.amount)
    }

    /// Remaining room
    pub fn needed(&self) -> u64 {
        self.capacity.saturating_sub(self.amount())
    }

    pub fn is_empty(&self) -> bool {
        self.stored.is_none()
    }

    pub fn is_full(&self) -> bool {
        self.needed() == 0
    }

    /// Returns true if `stack` could ever be stored here
    ///
    /// Ignores fullness; only kind and resource compatibility count.
    pub fn is_valid(&self, stack: &ResourceStack) -> bool {
        if stack.kind != self.kind || stack.is_empty() {
            return false;
        }
        match &self.stored {
            Some(stored) => stored.is_same_resource(stack),
            None => true,
        }
    }

    /// How much of `stack` an insert would take right now
    pub fn accepts(&self, stack: &ResourceStack) -> u64 {
        if !self.is_valid(stack) {
            return 0;
        }
        stack.amount.min(self.needed())
    }

    /// Inserts as much of `stack` as fits
    ///
    /// Returns the remainder that did not fit. An incompatible stack is
    /// returned whole.
    pub fn insert(&mut self, stack: &ResourceStack, action: Action) -> ResourceStack {
        let accepted = self.accepts(stack);
        if accepted == 0 {
            return stack.clone();
        }

        if action.execute() {
            match &mut self.stored {
                Some(stored) => stored.amount += accepted,
                None => self.stored = Some(stack.with_amount(accepted)),
            }
        }

        stack.with_amount(stack.amount - accepted)
    }

    /// Extracts up to `amount`
    ///
    /// Returns what was (or would be) removed; empty when nothing is stored.
    pub fn extract(&mut self, amount: u64, action: Action) -> ResourceStack {
        let Some(stored) = &mut self.stored else {
            return ResourceStack::empty(self.kind);
        };

        let taken = amount.min(stored.amount);
        let extracted = stored.with_amount(taken);

        if action.execute() && taken > 0 {
            stored.amount -= taken;
            if stored.amount == 0 {
                self.stored = None;
            }
        }

        extracted
    }

    /// Overwrites the contents, used when restoring saved state
    ///
    /// Contents of another kind are dropped; amounts are capped at capacity.
    pub(crate) fn set_stored(&mut self, stored: Option<ResourceStack>) {
        let capacity = self.capacity;
        let kind = self.kind;
        self.stored = stored
            .filter(|stack| stack.kind == kind)
            .map(|stack| stack.with_amount(stack.amount.min(capacity)))
            .filter(|stack| !stack.is_empty());
    }
}
