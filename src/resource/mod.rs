// Resource system module
//
// This module provides the resource side of hybrid slots:
// - The five resource kinds and a per-kind lookup table
// - Resource stacks and single-kind tanks
// - The merged tank that holds one kind at a time

pub mod kind;
pub mod merged;
pub mod stack;
pub mod tank;

// Re-export main types
pub use kind::{ChemicalKind, KindTable, ResourceKind};
pub use merged::MergedTank;
pub use stack::ResourceStack;
pub use tank::ResourceTank;
