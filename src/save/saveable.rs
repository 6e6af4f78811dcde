//! Conversion of live machine state to and from snapshot data

use std::time::SystemTime;
use crate::inventory::{FluidHandlerSlot, HybridInventorySlot, InventorySlot, SlotError};
use crate::resource::MergedTank;
use super::types::*;

/// Trait for state that can be saved and loaded
pub trait Saveable {
    /// Convert to saveable data
    fn to_save_data(&self) -> Result<SaveData, SaveError>;

    /// Rebuild from saved data
    fn from_save_data(data: &SaveData) -> Result<Self, SaveError>
    where
        Self: Sized;
}

const MERGED_TANK_TYPE: &str = "merged_tank";

impl Saveable for MergedTank {
    fn to_save_data(&self) -> Result<SaveData, SaveError> {
        let state = TankSaveData {
            capacities: self.capacities(),
            contents: self
                .current_type()
                .and_then(|kind| self.tank(kind).stored().cloned()),
        };
        Ok(SaveData {
            data_type: MERGED_TANK_TYPE.to_string(),
            json_data: serde_json::to_string(&state)?,
        })
    }

    fn from_save_data(data: &SaveData) -> Result<Self, SaveError> {
        if data.data_type != MERGED_TANK_TYPE {
            return Err(SaveError::CorruptedData(format!(
                "expected {} data, found {}",
                MERGED_TANK_TYPE, data.data_type
            )));
        }

        let state: TankSaveData = serde_json::from_str(&data.json_data)?;
        let mut tank = MergedTank::new(&state.capacities);
        tank.restore(state.contents);
        Ok(tank)
    }
}

/// Copies a hybrid slot's stack and transfer flags
pub fn capture_slot(slot: &HybridInventorySlot<'_>) -> SlotSaveData {
    SlotSaveData {
        mode: slot.mode(),
        stack: slot.stack().clone(),
        draining: slot.is_draining(),
        filling: slot.is_filling(),
    }
}

/// Puts saved state back into a hybrid slot
///
/// The slot must have been built in the same mode it was saved in.
pub fn restore_slot(slot: &mut HybridInventorySlot<'_>, data: &SlotSaveData) -> Result<(), SaveError> {
    if slot.mode() != data.mode {
        return Err(SaveError::CorruptedData(format!(
            "slot saved as {:?} restored into {:?} slot",
            data.mode,
            slot.mode()
        )));
    }

    slot.set_stack(data.stack.clone())
        .map_err(|error: SlotError| SaveError::CorruptedData(error.to_string()))?;
    slot.set_draining(data.draining);
    slot.set_filling(data.filling);
    Ok(())
}

impl MachineSnapshot {
    /// Captures the tank and the given slots at the current time
    pub fn capture(
        metadata: SnapshotMetadata,
        tank: &MergedTank,
        slots: &[&HybridInventorySlot<'_>],
    ) -> Result<Self, SaveError> {
        Ok(MachineSnapshot {
            version: CURRENT_SAVE_VERSION,
            timestamp: SystemTime::now(),
            metadata,
            tank: tank.to_save_data()?,
            slots: slots.iter().map(|slot| capture_slot(slot)).collect(),
        })
    }

    /// Rebuilds the merged tank this snapshot was taken from
    pub fn restore_tank(&self) -> Result<MergedTank, SaveError> {
        MergedTank::from_save_data(&self.tank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use crate::action::Action;
    use crate::item::ItemStack;
    use crate::resource::{KindTable, ResourceKind, ResourceStack, ResourceTank};

    fn tank() -> MergedTank {
        MergedTank::new(&KindTable::from_fn(|kind| match kind {
            ResourceKind::Fluid => 500,
            _ => 2000,
        }))
    }

    #[test]
    fn test_merged_tank_round_trip() {
        let mut original = tank();
        original.insert(&ResourceStack::new(ResourceKind::Slurry, "dirty_iron", 750), Action::Execute);

        let data = original.to_save_data().unwrap();
        assert_eq!(data.data_type, "merged_tank");

        let restored = MergedTank::from_save_data(&data).unwrap();
        assert_eq!(restored, original);
        assert_eq!(restored.current_type(), Some(ResourceKind::Slurry));
        assert_eq!(restored.fluid_tank().capacity(), 500);
    }

    #[test]
    fn test_wrong_data_type_is_corrupted() {
        let data = SaveData {
            data_type: "player".to_string(),
            json_data: "{}".to_string(),
        };
        assert!(matches!(MergedTank::from_save_data(&data), Err(SaveError::CorruptedData(_))));
    }

    #[test]
    fn test_overfull_contents_are_capped() {
        let state = TankSaveData {
            capacities: KindTable::from_fn(|_| 100),
            contents: Some(ResourceStack::new(ResourceKind::Gas, "hydrogen", 900)),
        };
        let data = SaveData {
            data_type: "merged_tank".to_string(),
            json_data: serde_json::to_string(&state).unwrap(),
        };

        let restored = MergedTank::from_save_data(&data).unwrap();
        assert_eq!(restored.gas_tank().amount(), 100);
    }

    #[test]
    fn test_capture_and_restore_slot() {
        let merged = RefCell::new(tank());
        let canister = ItemStack::new("canister", 1)
            .with_max_stack_size(1)
            .with_handler(ResourceTank::new(ResourceKind::Gas, 100));

        let mut slot = HybridInventorySlot::output_or_fill(&merged, 1);
        slot.set_stack(canister.clone()).unwrap();
        slot.set_filling(true);
        let data = capture_slot(&slot);

        let mut fresh = HybridInventorySlot::output_or_fill(&merged, 1);
        restore_slot(&mut fresh, &data).unwrap();
        assert_eq!(fresh.stack(), &canister);
        assert!(fresh.is_filling());
        assert!(!fresh.is_draining());

        let mut wrong_mode = HybridInventorySlot::input_or_drain(&merged, 1);
        assert!(matches!(restore_slot(&mut wrong_mode, &data), Err(SaveError::CorruptedData(_))));
        assert!(wrong_mode.is_empty());
    }

    #[test]
    fn test_capture_snapshot() {
        let merged = RefCell::new(tank());
        merged
            .borrow_mut()
            .insert(&ResourceStack::new(ResourceKind::Fluid, "water", 300), Action::Execute);
        let input = HybridInventorySlot::input_or_drain(&merged, 1);
        let output = HybridInventorySlot::output_or_fill(&merged, 1);

        let metadata = SnapshotMetadata {
            machine_name: "generator".to_string(),
            crate_version: "test".to_string(),
            tick: 7,
            snapshot_type: SnapshotType::Auto,
        };
        let snapshot = MachineSnapshot::capture(metadata, &merged.borrow(), &[&input, &output]).unwrap();

        assert_eq!(snapshot.version, CURRENT_SAVE_VERSION);
        assert_eq!(snapshot.slots.len(), 2);
        assert_eq!(snapshot.slots[1].mode, crate::inventory::HybridMode::OutputOrFill);
        assert_eq!(snapshot.restore_tank().unwrap().fluid_tank().amount(), 300);
    }
}
