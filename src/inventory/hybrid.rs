use std::cell::{Ref, RefCell};
use serde::{Serialize, Deserialize};
use crate::action::Action;
use crate::item::ItemStack;
use crate::resource::{ChemicalKind, MergedTank, ResourceKind, ResourceTank};
use super::error::SlotError;
use super::predicates::{can_drain_into, can_fill_from, is_fill_complete};
use super::slot::{AutomationType, InventorySlot, SlotContents};
use super::transfer::FluidHandlerSlot;

/// Which side of a merged tank a hybrid slot serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HybridMode {
    /// Accepts filled containers and empties them into the tank
    InputOrDrain,

    /// Accepts containers and fills them from the tank
    OutputOrFill,
}

/// Item slot bound to a merged tank, accepting containers of any of the
/// five resource kinds
///
/// Insert and extract permissions are worked out on every call from the
/// tank's current type. The slot borrows the tank, so it can never outlive
/// it; the tank is shared with other slots of the same machine through the
/// `RefCell`.
#[derive(Debug)]
pub struct HybridInventorySlot<'t> {
    contents: SlotContents,
    tank: &'t RefCell<MergedTank>,
    mode: HybridMode,
    draining: bool,
    filling: bool,
}

impl<'t> HybridInventorySlot<'t> {
    /// Slot for filled containers whose contents get drained into `tank`
    pub fn input_or_drain(tank: &'t RefCell<MergedTank>, limit: u32) -> Self {
        Self::new(tank, limit, HybridMode::InputOrDrain)
    }

    /// Slot for containers that get filled from `tank`
    pub fn output_or_fill(tank: &'t RefCell<MergedTank>, limit: u32) -> Self {
        Self::new(tank, limit, HybridMode::OutputOrFill)
    }

    fn new(tank: &'t RefCell<MergedTank>, limit: u32, mode: HybridMode) -> Self {
        HybridInventorySlot {
            contents: SlotContents::new(limit),
            tank,
            mode,
            draining: false,
            filling: false,
        }
    }

    pub fn mode(&self) -> HybridMode {
        self.mode
    }

    /// Insert permission for `stack` requested by `automation`
    pub fn can_insert(&self, stack: &ItemStack, automation: AutomationType) -> bool {
        let tank = self.tank.borrow();
        let allowed = match self.mode {
            HybridMode::InputOrDrain => drain_insert_allowed(&tank, stack),
            HybridMode::OutputOrFill => fill_insert_allowed(&tank, stack, automation),
        };
        log::trace!(
            "{:?} insert of {} by {:?} with {:?} active: {}",
            self.mode,
            stack.item_id,
            automation,
            tank.current_type(),
            allowed
        );
        allowed
    }

    /// Extract permission for `stack` requested by `automation`
    pub fn can_extract(&self, stack: &ItemStack, automation: AutomationType) -> bool {
        if automation.is_manual() {
            return true;
        }
        let tank = self.tank.borrow();
        match self.mode {
            // Automation may pull a container once it has nothing left to give
            HybridMode::InputOrDrain => !drain_insert_allowed(&tank, stack),
            HybridMode::OutputOrFill => fill_extract_allowed(&tank, stack),
        }
    }

    /// Returns true if the held item still holds a resource the tank is
    /// compatible with, whether or not there is room for it right now
    pub fn has_drainable_contents(&self) -> bool {
        let tank = self.tank.borrow();
        ResourceKind::ALL.iter().any(|kind| {
            tank.accepts_kind(*kind)
                && self
                    .stack()
                    .handler(*kind)
                    .and_then(|handler| handler.stored())
                    .is_some_and(|stored| tank.tank(*kind).is_valid(stored))
        })
    }

    /// Returns true if the held item has room for the tank's current contents
    pub fn has_fill_room(&self) -> bool {
        let tank = self.tank.borrow();
        let Some(kind) = tank.current_type() else {
            return false;
        };
        let Some(stored) = tank.tank(kind).stored() else {
            return false;
        };
        self.stack()
            .handler(kind)
            .is_some_and(|handler| handler.is_valid(stored) && !handler.is_full())
    }

    /// Empties the held item's fluid container into the fluid sub-tank
    pub fn drain_fluid_tank(&mut self) -> u64 {
        self.drain_kind(ResourceKind::Fluid)
    }

    /// Fills the held item's fluid container from the fluid sub-tank
    pub fn fill_fluid_tank(&mut self) -> u64 {
        self.fill_kind(ResourceKind::Fluid)
    }

    /// Empties the held item's container of `kind` into the matching
    /// sub-tank
    ///
    /// Bounded by the sub-tank's free room and what the item holds. Does
    /// nothing while another kind is active or when the item has no such
    /// container. Returns the amount moved.
    pub fn drain_chemical_tank(&mut self, kind: ChemicalKind) -> u64 {
        self.drain_kind(kind.into())
    }

    /// Tries gas, infusion, pigment, then slurry
    pub fn drain_chemical_tanks(&mut self) -> u64 {
        ChemicalKind::ALL
            .into_iter()
            .map(|kind| self.drain_chemical_tank(kind))
            .sum()
    }

    /// Moves the `kind` sub-tank's contents into the held item's container
    ///
    /// Does nothing unless `kind` is the tank's current type. Returns the
    /// amount moved.
    pub fn fill_chemical_tank(&mut self, kind: ChemicalKind) -> u64 {
        self.fill_kind(kind.into())
    }

    /// Tries gas, infusion, pigment, then slurry
    pub fn fill_chemical_tanks(&mut self) -> u64 {
        ChemicalKind::ALL
            .into_iter()
            .map(|kind| self.fill_chemical_tank(kind))
            .sum()
    }

    /// Transfers act on one container; a forced stack of several is left alone
    fn holds_single_item(&self) -> bool {
        let quantity = self.contents.stack().quantity;
        if quantity > 1 {
            log::warn!(
                "{} x{} holds more than one container, skipping transfer",
                self.contents.stack().item_id,
                quantity
            );
        }
        quantity == 1
    }

    fn drain_kind(&mut self, kind: ResourceKind) -> u64 {
        if !self.holds_single_item() {
            return 0;
        }
        let cell = self.tank;
        let Ok(mut tank) = cell.try_borrow_mut() else {
            log::warn!("merged tank is borrowed elsewhere, skipping drain of {}", kind);
            return 0;
        };
        if !tank.accepts_kind(kind) {
            return 0;
        }

        let Some(handler) = self.contents.stack_mut().handler_mut(kind) else {
            return 0;
        };
        let Some(offered) = handler.stored().cloned() else {
            return 0;
        };

        let movable = tank.tank(kind).accepts(&offered);
        if movable == 0 {
            return 0;
        }

        let drained = handler.extract(movable, Action::Execute);
        let leftover = tank.insert(&drained, Action::Execute);
        if !leftover.is_empty() {
            handler.insert(&leftover, Action::Execute);
        }

        let moved = drained.amount - leftover.amount;
        log::debug!(
            "drained {} {} ({}) from {} into merged tank",
            moved,
            drained.resource,
            kind,
            self.contents.stack().item_id
        );
        moved
    }

    fn fill_kind(&mut self, kind: ResourceKind) -> u64 {
        if !self.holds_single_item() {
            return 0;
        }
        let cell = self.tank;
        let Ok(mut tank) = cell.try_borrow_mut() else {
            log::warn!("merged tank is borrowed elsewhere, skipping fill of {}", kind);
            return 0;
        };
        if tank.current_type() != Some(kind) {
            return 0;
        }

        let Some(handler) = self.contents.stack_mut().handler_mut(kind) else {
            return 0;
        };
        let Some(stored) = tank.tank(kind).stored().cloned() else {
            return 0;
        };

        let movable = handler.accepts(&stored);
        if movable == 0 {
            return 0;
        }

        let extracted = tank.extract(kind, movable, Action::Execute);
        let leftover = handler.insert(&extracted, Action::Execute);
        if !leftover.is_empty() {
            tank.insert(&leftover, Action::Execute);
        }

        let moved = extracted.amount - leftover.amount;
        log::debug!(
            "filled {} with {} {} ({}) from merged tank",
            self.contents.stack().item_id,
            moved,
            extracted.resource,
            kind
        );
        moved
    }
}

/// Input side: the active kind decides; with an empty tank any kind may
/// claim the item
fn drain_insert_allowed(tank: &MergedTank, stack: &ItemStack) -> bool {
    match tank.current_type() {
        Some(kind) => can_drain_into(tank.tank(kind), stack),
        None => ResourceKind::ALL
            .iter()
            .any(|kind| can_drain_into(tank.tank(*kind), stack)),
    }
}

/// Output side insert
///
/// Fluid output only takes items the machine places itself. With an empty
/// tank the machine may place any fluid container; otherwise a chemical
/// container must be able to receive from its sub-tank.
fn fill_insert_allowed(tank: &MergedTank, stack: &ItemStack, automation: AutomationType) -> bool {
    match tank.current_type() {
        Some(ResourceKind::Fluid) => automation.is_internal(),
        Some(kind) => can_fill_from(tank.tank(kind), stack),
        None => {
            if automation.is_internal() && stack.has_handler(ResourceKind::Fluid) {
                return true;
            }
            ChemicalKind::ALL
                .iter()
                .any(|kind| can_fill_from(tank.tank((*kind).into()), stack))
        }
    }
}

/// Output side extract for non-manual actors
///
/// With an empty tank every chemical check must pass.
fn fill_extract_allowed(tank: &MergedTank, stack: &ItemStack) -> bool {
    match tank.current_type() {
        Some(ResourceKind::Fluid) => true,
        Some(kind) => is_fill_complete(tank.tank(kind), stack),
        None => ChemicalKind::ALL
            .iter()
            .all(|kind| is_fill_complete(tank.tank((*kind).into()), stack)),
    }
}

impl InventorySlot for HybridInventorySlot<'_> {
    fn stack(&self) -> &ItemStack {
        self.contents.stack()
    }

    fn set_stack(&mut self, stack: ItemStack) -> Result<(), SlotError> {
        self.contents.set(stack);
        Ok(())
    }

    fn insert_item(&mut self, stack: &ItemStack, action: Action, automation: AutomationType) -> ItemStack {
        if stack.is_empty() || !self.is_item_valid(stack) || !self.can_insert(stack, automation) {
            return stack.clone();
        }
        self.contents.insert(stack, action)
    }

    fn extract_item(&mut self, amount: u32, action: Action, automation: AutomationType) -> ItemStack {
        if self.contents.stack().is_empty() || !self.can_extract(self.contents.stack(), automation) {
            return ItemStack::empty();
        }
        self.contents.extract(amount, action)
    }

    fn limit(&self) -> u32 {
        self.contents.limit()
    }

    /// Any item with a fluid or chemical container, whatever the tank holds
    fn is_item_valid(&self, stack: &ItemStack) -> bool {
        stack.is_hybrid_capable()
    }
}

impl FluidHandlerSlot for HybridInventorySlot<'_> {
    fn fluid_tank(&self) -> Ref<'_, ResourceTank> {
        Ref::map(self.tank.borrow(), MergedTank::fluid_tank)
    }

    fn is_draining(&self) -> bool {
        self.draining
    }

    fn set_draining(&mut self, draining: bool) {
        self.draining = draining;
    }

    fn is_filling(&self) -> bool {
        self.filling
    }

    fn set_filling(&mut self, filling: bool) {
        self.filling = filling;
    }
}
