use serde::{Serialize, Deserialize};
use crate::action::Action;
use crate::item::ItemStack;
use super::error::SlotError;

/// Who is asking to insert or extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutomationType {
    /// Pipes, hoppers and other machines outside the owner
    External,

    /// The owning machine moving items itself
    Internal,

    /// A player clicking in a GUI
    Manual,
}

impl AutomationType {
    pub fn is_manual(self) -> bool {
        self == AutomationType::Manual
    }

    pub fn is_internal(self) -> bool {
        self == AutomationType::Internal
    }
}

/// Effective ceiling for `stack` in a slot with `slot_limit`
///
/// Items carrying resource containers are capped at one per slot.
pub fn effective_limit(stack: &ItemStack, slot_limit: u32) -> u32 {
    let item_limit = if stack.handlers.is_empty() { stack.max_stack_size } else { 1 };
    item_limit.min(slot_limit)
}

/// Clamps a requested stack size into `[0, ceiling]`
pub fn clamp_stack_size(requested: i64, ceiling: u32) -> u32 {
    if requested <= 0 {
        0
    } else {
        requested.min(i64::from(ceiling)) as u32
    }
}

/// A single storage cell holding one item stack
///
/// Reading is done through `stack()`, which hands out a shared reference;
/// every change goes through `set_stack`, `insert_item` or `extract_item`.
/// The size helpers (`set_stack_size`, `grow_stack`, `shrink_stack`) are
/// written once here on top of those.
pub trait InventorySlot {
    /// Current contents (the empty stack when the slot is empty)
    ///
    /// The stored quantity may exceed the item's own max stack size.
    fn stack(&self) -> &ItemStack;

    /// Overwrites the contents
    ///
    /// Fails with [`SlotError::UnsupportedOperation`] on slots that cannot
    /// be overwritten directly.
    fn set_stack(&mut self, stack: ItemStack) -> Result<(), SlotError>;

    /// Inserts `stack` and returns what was not accepted
    ///
    /// The input is never modified. `Action::Simulate` leaves the slot
    /// untouched.
    fn insert_item(&mut self, stack: &ItemStack, action: Action, automation: AutomationType) -> ItemStack;

    /// Extracts up to `amount` and returns a fresh stack
    ///
    /// The result never exceeds `amount`, the stored quantity, or the
    /// stored item's max stack size. Empty if nothing can be extracted.
    fn extract_item(&mut self, amount: u32, action: Action, automation: AutomationType) -> ItemStack;

    /// Maximum quantity this slot holds, regardless of item
    fn limit(&self) -> u32;

    /// Static admissibility check, ignoring current contents
    ///
    /// `false` means `stack` can never go in this slot. `true` makes no
    /// promise; insertion still has to be simulated.
    fn is_item_valid(&self, stack: &ItemStack) -> bool;

    /// Sets the stored quantity, clamped to `min(max stack size, limit)`
    ///
    /// Amounts of zero or below empty the slot. Returns the size actually set.
    fn set_stack_size(&mut self, amount: i64) -> Result<u32, SlotError> {
        let current = self.stack();
        if current.is_empty() {
            return Ok(0);
        }
        if amount <= 0 {
            self.set_stack(ItemStack::empty())?;
            return Ok(0);
        }

        let size = clamp_stack_size(amount, effective_limit(current, self.limit()));
        if current.quantity == size {
            return Ok(size);
        }

        let resized = current.with_quantity(size);
        self.set_stack(resized)?;
        Ok(size)
    }

    /// Grows the stored quantity by `delta` (negative shrinks)
    ///
    /// Returns the change actually applied.
    fn grow_stack(&mut self, delta: i64) -> Result<i64, SlotError> {
        let current = i64::from(self.stack().quantity);
        let new_size = self.set_stack_size(current.saturating_add(delta))?;
        Ok(i64::from(new_size) - current)
    }

    /// Shrinks the stored quantity by `delta` (negative grows)
    ///
    /// Returns the change actually applied, as a positive number when the
    /// stack shrank.
    fn shrink_stack(&mut self, delta: i64) -> Result<i64, SlotError> {
        Ok(-self.grow_stack(delta.saturating_neg())?)
    }

    fn is_empty(&self) -> bool {
        self.stack().is_empty()
    }
}

/// Stored stack plus limit, with the insert/extract arithmetic shared by
/// every slot type
///
/// Permission checks are the caller's job; this only does capacity math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotContents {
    stack: ItemStack,
    limit: u32,
}

impl SlotContents {
    pub fn new(limit: u32) -> Self {
        SlotContents {
            stack: ItemStack::empty(),
            limit,
        }
    }

    pub fn stack(&self) -> &ItemStack {
        &self.stack
    }

    pub(crate) fn stack_mut(&mut self) -> &mut ItemStack {
        &mut self.stack
    }

    pub fn set(&mut self, stack: ItemStack) {
        self.stack = if stack.is_empty() { ItemStack::empty() } else { stack };
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Merges `stack` in up to the effective limit, returning the remainder
    pub fn insert(&mut self, stack: &ItemStack, action: Action) -> ItemStack {
        if stack.is_empty() {
            return stack.clone();
        }

        let same_type = !self.stack.is_empty() && self.stack.can_stack_with(stack);
        if !self.stack.is_empty() && !same_type {
            return stack.clone();
        }

        let needed = effective_limit(stack, self.limit).saturating_sub(self.stack.quantity);
        if needed == 0 {
            return stack.clone();
        }

        let to_add = stack.quantity.min(needed);
        if action.execute() {
            if same_type {
                self.stack.quantity += to_add;
            } else {
                self.stack = stack.with_quantity(to_add);
            }
        }

        stack.with_quantity(stack.quantity - to_add)
    }

    /// Removes up to `amount`, capped by the stored quantity and the
    /// stored item's max stack size
    pub fn extract(&mut self, amount: u32, action: Action) -> ItemStack {
        if self.stack.is_empty() || amount == 0 {
            return ItemStack::empty();
        }

        let available = self.stack.quantity.min(self.stack.max_stack_size);
        let taken = amount.min(available);
        let extracted = self.stack.with_quantity(taken);

        if action.execute() {
            self.stack.quantity -= taken;
            if self.stack.quantity == 0 {
                self.stack = ItemStack::empty();
            }
        }

        extracted
    }
}
