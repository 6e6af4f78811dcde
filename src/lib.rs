//! Hybrid inventory slots for machines with a merged resource tank
//!
//! A merged tank holds one of five resource kinds (fluid, gas, infusion,
//! pigment, slurry) at a time. Hybrid slots accept containers of any of
//! those kinds and move resources between the container and the tank.

pub mod action;
pub mod config;
pub mod inventory;
pub mod item;
pub mod resource;
pub mod save;

pub use action::Action;
pub use inventory::{AutomationType, HybridInventorySlot, InventorySlot};
pub use item::ItemStack;
pub use resource::{MergedTank, ResourceKind};
