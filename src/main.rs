use std::cell::RefCell;
use std::path::PathBuf;

use hybrid_slots::action::Action;
use hybrid_slots::config::MachineConfig;
use hybrid_slots::inventory::{AutomationType, FluidHandlerSlot, HybridInventorySlot, InventorySlot, process_tick};
use hybrid_slots::resource::{MergedTank, ResourceKind, ResourceStack};
use hybrid_slots::save::{MachineSnapshot, SnapshotMetadata, SnapshotStore, SnapshotType};

/// Stops a machine that never settles
const MAX_TICKS: u64 = 100;

/// Snapshots kept per machine
const KEEP_SNAPSHOTS: usize = 5;

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => MachineConfig::load_from_file(&path)
            .map_err(|e| format!("Failed to load machine config {}: {}", path, e))?,
        None => {
            log::info!("no config given, using defaults");
            MachineConfig::default()
        }
    };

    let registry = config
        .build_registry()
        .map_err(|e| format!("Failed to build item registry: {}", e))?;
    let tank = RefCell::new(config.build_tank());
    let mut input = HybridInventorySlot::input_or_drain(&tank, config.slot_limit);
    let mut output = HybridInventorySlot::output_or_fill(&tank, config.slot_limit);

    let full = registry
        .create_filled("chemical_tank", &ResourceStack::new(ResourceKind::Gas, "hydrogen", 6_000))
        .map_err(|e| e.to_string())?;
    let empty = registry.create_stack("chemical_tank", 1).map_err(|e| e.to_string())?;

    let refused = input.insert_item(&full, Action::Execute, AutomationType::Manual);
    if !refused.is_empty() {
        log::warn!("input slot refused {}", refused.item_id);
    }
    let refused = output.insert_item(&empty, Action::Execute, AutomationType::Manual);
    if !refused.is_empty() {
        log::warn!("output slot refused {}", refused.item_id);
    }

    log::info!("{} running with slot limit {}", config.name, config.slot_limit);

    let mut ticks = 0;
    while ticks < MAX_TICKS {
        let report = process_tick(&mut input, &mut output).map_err(|e| e.to_string())?;
        ticks += 1;
        if report.is_idle() {
            break;
        }
        log::info!(
            "tick {}: drained {}, moved {} item(s), filled {}",
            ticks,
            report.drained,
            report.moved,
            report.filled
        );
    }

    log_tank(&tank.borrow());
    log_slot("input", &input);
    log_slot("output", &output);

    let save_dir = SnapshotStore::default_directory().unwrap_or_else(|| PathBuf::from("./snapshots"));
    let store = SnapshotStore::new(&save_dir).map_err(|e| format!("Failed to open snapshot store: {}", e))?;

    let metadata = SnapshotMetadata {
        machine_name: config.name.clone(),
        crate_version: env!("CARGO_PKG_VERSION").to_string(),
        tick: ticks,
        snapshot_type: SnapshotType::Manual,
    };
    let snapshot = MachineSnapshot::capture(metadata, &tank.borrow(), &[&input, &output])
        .map_err(|e| format!("Failed to capture snapshot: {}", e))?;
    store.save(&snapshot).map_err(|e| format!("Failed to save snapshot: {}", e))?;
    store
        .prune(&config.name, KEEP_SNAPSHOTS)
        .map_err(|e| format!("Failed to prune snapshots: {}", e))?;

    Ok(())
}

fn log_tank(tank: &MergedTank) {
    match tank.current_type() {
        Some(kind) => {
            let sub_tank = tank.tank(kind);
            log::info!("merged tank: {} {}/{}", kind, sub_tank.amount(), sub_tank.capacity());
        }
        None => log::info!("merged tank: empty"),
    }
}

fn log_slot(label: &str, slot: &HybridInventorySlot<'_>) {
    if slot.is_empty() {
        log::info!("{} slot: empty", label);
        return;
    }

    let stack = slot.stack();
    let contents: Vec<String> = stack
        .handlers
        .iter()
        .filter_map(|handler| handler.stored())
        .map(|stored| format!("{} {}", stored.amount, stored.resource))
        .collect();
    log::info!(
        "{} slot: {} x{} holding [{}] (draining: {}, filling: {})",
        label,
        stack.item_id,
        stack.quantity,
        contents.join(", "),
        slot.is_draining(),
        slot.is_filling()
    );
}
