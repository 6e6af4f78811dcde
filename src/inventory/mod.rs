// Inventory slot module
//
// This module provides the item slots of a machine, including:
// - The slot contract shared by every slot type
// - Basic slots with caller-supplied permission predicates
// - Hybrid slots bound to a merged tank
// - Read-only views and the per-tick transfer driver

pub mod basic;
pub mod error;
pub mod hybrid;
pub mod predicates;
pub mod read_only;
pub mod slot;
pub mod transfer;

// Re-export main types
pub use basic::{BasicInventorySlot, PermissionPredicate, ValidityPredicate};
pub use error::SlotError;
pub use hybrid::{HybridInventorySlot, HybridMode};
pub use read_only::ReadOnlySlot;
pub use slot::{AutomationType, InventorySlot, SlotContents, clamp_stack_size, effective_limit};
pub use transfer::{FluidHandlerSlot, TickReport, drain_into_tank, fill_from_tank, move_to_output, process_tick};
