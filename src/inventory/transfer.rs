//! Per-tick transfer driver for hybrid slots
//!
//! A machine calls [`process_tick`] once per tick with its input and
//! output slot. The draining/filling flags keep a slot committed to one
//! direction while a container is part-way through.

use std::cell::Ref;
use crate::action::Action;
use crate::resource::ResourceTank;
use super::error::SlotError;
use super::hybrid::HybridInventorySlot;
use super::slot::{AutomationType, InventorySlot};

/// Slot linked to a fluid tank, with transfer-in-progress flags
pub trait FluidHandlerSlot: InventorySlot {
    /// The fluid tank this slot exchanges with
    ///
    /// The returned guard keeps the shared tank borrowed. Transfers on any
    /// slot of the same tank move nothing until it is dropped.
    fn fluid_tank(&self) -> Ref<'_, ResourceTank>;

    fn is_draining(&self) -> bool;

    fn set_draining(&mut self, draining: bool);

    fn is_filling(&self) -> bool;

    fn set_filling(&mut self, filling: bool);
}

/// What one tick moved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Resource moved from the input item into the tank
    pub drained: u64,

    /// Items moved from the input slot to the output slot
    pub moved: u32,

    /// Resource moved from the tank into the output item
    pub filled: u64,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        self.drained == 0 && self.moved == 0 && self.filled == 0
    }
}

/// Empties the slot's item into the tank (fluid first, then chemicals)
///
/// Skipped while the slot is filling. Once draining starts the flag stays
/// set until the item holds nothing the tank is compatible with, even on
/// ticks where the tank is full.
pub fn drain_into_tank(slot: &mut HybridInventorySlot<'_>) -> u64 {
    if slot.is_filling() {
        log::trace!("slot is filling, skipping drain");
        return 0;
    }
    if slot.is_empty() {
        slot.set_draining(false);
        return 0;
    }

    let moved = slot.drain_fluid_tank() + slot.drain_chemical_tanks();
    let draining = slot.has_drainable_contents() && (moved > 0 || slot.is_draining());
    slot.set_draining(draining);
    moved
}

/// Fills the slot's item from the tank
///
/// Skipped while the slot is draining. Once filling starts the flag stays
/// set until the item has no room left for the tank's contents.
pub fn fill_from_tank(slot: &mut HybridInventorySlot<'_>) -> u64 {
    if slot.is_draining() {
        log::trace!("slot is draining, skipping fill");
        return 0;
    }
    if slot.is_empty() {
        slot.set_filling(false);
        return 0;
    }

    let moved = slot.fill_fluid_tank() + slot.fill_chemical_tanks();
    let filling = slot.has_fill_room() && (moved > 0 || slot.is_filling());
    slot.set_filling(filling);
    moved
}

/// Moves whatever `from` lets the machine take out into `to`
///
/// Both sides are simulated first; nothing moves unless `to` accepts at
/// least one item. Returns the number of items moved.
pub fn move_to_output<F, T>(from: &mut F, to: &mut T) -> Result<u32, SlotError>
where
    F: InventorySlot,
    T: InventorySlot,
{
    let candidate = from.extract_item(from.limit(), Action::Simulate, AutomationType::Internal);
    if candidate.is_empty() {
        return Ok(0);
    }

    let remainder = to.insert_item(&candidate, Action::Simulate, AutomationType::Internal);
    let movable = candidate.quantity - remainder.quantity;
    if movable == 0 {
        return Ok(0);
    }

    let taken = from.extract_item(movable, Action::Execute, AutomationType::Internal);
    let leftover = to.insert_item(&taken, Action::Execute, AutomationType::Internal);
    if !leftover.is_empty() {
        log::warn!(
            "output refused {} {} after accepting them in simulation, putting them back",
            leftover.quantity,
            leftover.item_id
        );
        let restored = if from.is_empty() {
            leftover.clone()
        } else {
            from.stack().with_quantity(from.stack().quantity + leftover.quantity)
        };
        from.set_stack(restored)?;
    }

    let moved = taken.quantity - leftover.quantity;
    if moved > 0 {
        log::debug!("moved {} {} to output", moved, taken.item_id);
    }
    Ok(moved)
}

/// One machine tick: drain the input item, move finished items to the
/// output, then fill the output item
pub fn process_tick(
    input: &mut HybridInventorySlot<'_>,
    output: &mut HybridInventorySlot<'_>,
) -> Result<TickReport, SlotError> {
    let drained = drain_into_tank(input);
    let moved = if input.is_draining() {
        0
    } else {
        move_to_output(input, output)?
    };
    let filled = fill_from_tank(output);

    Ok(TickReport { drained, moved, filled })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use crate::inventory::BasicInventorySlot;
    use crate::item::ItemStack;
    use crate::resource::{ChemicalKind, KindTable, MergedTank, ResourceKind, ResourceStack};

    fn gas_canister(amount: u64) -> ItemStack {
        let handler = if amount == 0 {
            ResourceTank::new(ResourceKind::Gas, 100)
        } else {
            ResourceTank::filled(100, ResourceStack::new(ResourceKind::Gas, "hydrogen", amount))
        };
        ItemStack::new("gas_canister", 1).with_max_stack_size(1).with_handler(handler)
    }

    fn merged_tank(capacity: u64) -> RefCell<MergedTank> {
        RefCell::new(MergedTank::new(&KindTable::from_fn(|_| capacity)))
    }

    #[test]
    fn test_drain_sets_and_clears_flag() {
        let tank = merged_tank(150);
        let mut slot = HybridInventorySlot::input_or_drain(&tank, 1);

        slot.set_stack(gas_canister(100)).unwrap();
        assert_eq!(drain_into_tank(&mut slot), 100);
        // Canister is empty, nothing left to drain
        assert!(!slot.is_draining());

        slot.set_stack(gas_canister(100)).unwrap();
        assert_eq!(drain_into_tank(&mut slot), 50);
        assert!(slot.is_draining());

        // Tank full: the canister stays committed to draining
        assert_eq!(drain_into_tank(&mut slot), 0);
        assert!(slot.is_draining());

        tank.borrow_mut().extract(ResourceKind::Gas, 100, Action::Execute);
        assert_eq!(drain_into_tank(&mut slot), 50);
        assert!(!slot.is_draining());
    }

    #[test]
    fn test_half_drained_container_stays_in_input() {
        let tank = merged_tank(50);
        let mut input = HybridInventorySlot::input_or_drain(&tank, 1);
        let mut output = HybridInventorySlot::output_or_fill(&tank, 1);
        input.set_stack(gas_canister(100)).unwrap();

        let report = process_tick(&mut input, &mut output).unwrap();
        assert_eq!(report.drained, 50);
        assert_eq!(report.moved, 0);
        assert!(input.is_draining());
        assert!(output.is_empty());
    }

    #[test]
    fn test_draining_slot_does_not_fill() {
        let tank = merged_tank(1000);
        tank.borrow_mut()
            .insert(&ResourceStack::new(ResourceKind::Gas, "hydrogen", 500), Action::Execute);
        let mut slot = HybridInventorySlot::output_or_fill(&tank, 1);
        slot.set_stack(gas_canister(0)).unwrap();

        slot.set_draining(true);
        assert_eq!(fill_from_tank(&mut slot), 0);

        slot.set_draining(false);
        assert_eq!(fill_from_tank(&mut slot), 100);
        // Canister is full
        assert!(!slot.is_filling());
    }

    #[test]
    fn test_filling_slot_does_not_drain() {
        let tank = merged_tank(1000);
        let mut slot = HybridInventorySlot::input_or_drain(&tank, 1);
        slot.set_stack(gas_canister(100)).unwrap();

        slot.set_filling(true);
        assert_eq!(drain_into_tank(&mut slot), 0);
        assert!(tank.borrow().is_empty());
    }

    #[test]
    fn test_move_to_output_waits_for_empty_container() {
        let tank = merged_tank(1000);
        let mut input = HybridInventorySlot::input_or_drain(&tank, 1);
        let mut output = HybridInventorySlot::output_or_fill(&tank, 1);
        input.set_stack(gas_canister(100)).unwrap();

        assert_eq!(move_to_output(&mut input, &mut output), Ok(0));

        input.drain_chemical_tank(ChemicalKind::Gas);
        assert_eq!(move_to_output(&mut input, &mut output), Ok(1));
        assert!(input.is_empty());
        assert_eq!(output.stack().item_id, "gas_canister");
    }

    #[test]
    fn test_move_to_output_respects_full_output() {
        let mut from = BasicInventorySlot::at(64, Box::new(|_: &ItemStack| true));
        let mut to = BasicInventorySlot::output(4);
        from.set_stack(ItemStack::new("stone", 10)).unwrap();

        assert_eq!(move_to_output(&mut from, &mut to), Ok(4));
        assert_eq!(from.stack().quantity, 6);
        assert_eq!(move_to_output(&mut from, &mut to), Ok(0));
    }

    #[test]
    fn test_process_tick_until_idle() {
        let tank = merged_tank(1000);
        let mut input = HybridInventorySlot::input_or_drain(&tank, 1);
        let mut output = HybridInventorySlot::output_or_fill(&tank, 1);
        input.set_stack(gas_canister(80)).unwrap();

        let first = process_tick(&mut input, &mut output).unwrap();
        assert_eq!(first.drained, 80);
        assert_eq!(first.moved, 1);
        // The same canister gets refilled on the output side
        assert_eq!(first.filled, 80);

        let second = process_tick(&mut input, &mut output).unwrap();
        assert!(second.is_idle());
        assert!(tank.borrow().is_empty());
    }
}
