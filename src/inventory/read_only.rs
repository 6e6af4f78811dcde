use crate::action::Action;
use crate::item::ItemStack;
use super::error::SlotError;
use super::slot::{AutomationType, InventorySlot};

/// Read-only view over another slot
///
/// Shows the wrapped slot's contents to consumers that must not change
/// them (e.g. a status display). Overwrites fail; inserts and extracts
/// move nothing.
#[derive(Debug)]
pub struct ReadOnlySlot<'s, S: InventorySlot> {
    inner: &'s S,
}

impl<'s, S: InventorySlot> ReadOnlySlot<'s, S> {
    pub fn new(inner: &'s S) -> Self {
        ReadOnlySlot { inner }
    }
}

impl<S: InventorySlot> InventorySlot for ReadOnlySlot<'_, S> {
    fn stack(&self) -> &ItemStack {
        self.inner.stack()
    }

    fn set_stack(&mut self, _stack: ItemStack) -> Result<(), SlotError> {
        Err(SlotError::UnsupportedOperation {
            operation: "set_stack on a read-only slot",
        })
    }

    fn insert_item(&mut self, stack: &ItemStack, _action: Action, _automation: AutomationType) -> ItemStack {
        stack.clone()
    }

    fn extract_item(&mut self, _amount: u32, _action: Action, _automation: AutomationType) -> ItemStack {
        ItemStack::empty()
    }

    fn limit(&self) -> u32 {
        self.inner.limit()
    }

    fn is_item_valid(&self, _stack: &ItemStack) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::BasicInventorySlot;

    #[test]
    fn test_read_only_view() {
        let mut slot = BasicInventorySlot::at(64, Box::new(|_: &ItemStack| true));
        slot.set_stack(ItemStack::new("stone", 8)).unwrap();

        let mut view = ReadOnlySlot::new(&slot);
        assert_eq!(view.stack().quantity, 8);
        assert_eq!(view.limit(), 64);

        let stone = ItemStack::new("stone", 1);
        assert_eq!(view.insert_item(&stone, Action::Execute, AutomationType::Manual), stone);
        assert!(view.extract_item(4, Action::Execute, AutomationType::Manual).is_empty());
        assert_eq!(view.stack().quantity, 8);
    }

    #[test]
    fn test_read_only_rejects_overwrite() {
        let slot = BasicInventorySlot::at(64, Box::new(|_: &ItemStack| true));
        let mut view = ReadOnlySlot::new(&slot);

        assert!(matches!(
            view.set_stack(ItemStack::new("stone", 1)),
            Err(SlotError::UnsupportedOperation { .. })
        ));

        // Size helpers go through set_stack, so they fail too
        let mut slot = BasicInventorySlot::at(64, Box::new(|_: &ItemStack| true));
        slot.set_stack(ItemStack::new("stone", 4)).unwrap();
        let mut view = ReadOnlySlot::new(&slot);
        assert!(view.grow_stack(1).is_err());
        assert!(view.set_stack_size(0).is_err());
    }
}
