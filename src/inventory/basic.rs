use std::fmt;
use crate::action::Action;
use crate::item::ItemStack;
use super::error::SlotError;
use super::slot::{AutomationType, InventorySlot, SlotContents};

/// Insert/extract permission check: (stack, who is asking) -> allowed
pub type PermissionPredicate<'a> = Box<dyn Fn(&ItemStack, AutomationType) -> bool + 'a>;

/// Static validity check used by `is_item_valid`
pub type ValidityPredicate<'a> = Box<dyn Fn(&ItemStack) -> bool + 'a>;

/// General-purpose slot with caller-supplied predicates
pub struct BasicInventorySlot<'a> {
    contents: SlotContents,
    can_extract: PermissionPredicate<'a>,
    can_insert: PermissionPredicate<'a>,
    validator: ValidityPredicate<'a>,
}

impl<'a> BasicInventorySlot<'a> {
    pub fn new(
        limit: u32,
        can_extract: PermissionPredicate<'a>,
        can_insert: PermissionPredicate<'a>,
        validator: ValidityPredicate<'a>,
    ) -> Self {
        BasicInventorySlot {
            contents: SlotContents::new(limit),
            can_extract,
            can_insert,
            validator,
        }
    }

    /// Slot anyone may insert into or extract from, filtered by `validator`
    pub fn at(limit: u32, validator: ValidityPredicate<'a>) -> Self {
        Self::new(
            limit,
            Box::new(|_: &ItemStack, _: AutomationType| true),
            Box::new(|_: &ItemStack, _: AutomationType| true),
            validator,
        )
    }

    /// Input slot: anyone inserts, only the owner or a player extracts
    pub fn input(limit: u32, validator: ValidityPredicate<'a>) -> Self {
        Self::new(
            limit,
            Box::new(|_: &ItemStack, automation: AutomationType| automation != AutomationType::External),
            Box::new(|_: &ItemStack, _: AutomationType| true),
            validator,
        )
    }

    /// Output slot: only the owner inserts, anyone extracts
    pub fn output(limit: u32) -> Self {
        Self::new(
            limit,
            Box::new(|_: &ItemStack, _: AutomationType| true),
            Box::new(|_: &ItemStack, automation: AutomationType| automation.is_internal()),
            Box::new(|_: &ItemStack| true),
        )
    }
}

impl InventorySlot for BasicInventorySlot<'_> {
    fn stack(&self) -> &ItemStack {
        self.contents.stack()
    }

    fn set_stack(&mut self, stack: ItemStack) -> Result<(), SlotError> {
        self.contents.set(stack);
        Ok(())
    }

    fn insert_item(&mut self, stack: &ItemStack, action: Action, automation: AutomationType) -> ItemStack {
        if stack.is_empty() || !self.is_item_valid(stack) || !(self.can_insert)(stack, automation) {
            return stack.clone();
        }
        self.contents.insert(stack, action)
    }

    fn extract_item(&mut self, amount: u32, action: Action, automation: AutomationType) -> ItemStack {
        if self.contents.stack().is_empty() || !(self.can_extract)(self.contents.stack(), automation) {
            return ItemStack::empty();
        }
        self.contents.extract(amount, action)
    }

    fn limit(&self) -> u32 {
        self.contents.limit()
    }

    fn is_item_valid(&self, stack: &ItemStack) -> bool {
        (self.validator)(stack)
    }
}

impl fmt::Debug for BasicInventorySlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BasicInventorySlot")
            .field("contents", &self.contents)
            .finish_non_exhaustive()
    }
}
