//! Demonstration sequence run by the binary.

use std::io::{self, Write};

use stockroom_core::DomainResult;
use stockroom_inventory::{ActivityLog, InventoryStore, ItemName, LoadOutcome, Removal};

use crate::config::Config;

/// What happened during `run_demo`.
#[derive(Debug, Clone, Default)]
pub struct DemoSummary {
    pub activity: ActivityLog,
    /// Operations refused by the store (validation or not-found).
    pub rejected: usize,
    pub low_stock: Vec<ItemName>,
    pub saved: bool,
    pub loaded: Option<LoadOutcome>,
}

/// Run the fixed add/remove sequence against `store`, save it to the configured
/// file and write the report to `out`.
///
/// Store failures are reported and counted; only errors writing to `out` are
/// returned.
pub fn run_demo<W: Write>(
    store: &mut InventoryStore,
    config: &Config,
    out: &mut W,
) -> io::Result<DemoSummary> {
    let mut summary = DemoSummary::default();

    writeln!(out, "Inventory Management System Starting...")?;
    writeln!(out)?;

    if config.load_on_start {
        match store.load(&config.inventory_file) {
            Ok(outcome) => summary.loaded = Some(outcome),
            Err(err) => writeln!(out, "Could not load inventory: {err}")?,
        }
    }

    let adds: [(&str, i64); 5] = [
        ("apple", 10),
        ("banana", 5),
        ("orange", 3),
        // Rejected: negative quantity, empty name.
        ("grape", -2),
        ("", 10),
    ];
    for (item, quantity) in adds {
        if let Err(err) = store.add(item, quantity, Some(&mut summary.activity)) {
            writeln!(out, "Error: {err}")?;
            summary.rejected += 1;
        }
    }

    let removals: [(&str, i64); 3] = [("apple", 3), ("orange", 1), ("pear", 1)];
    for (item, quantity) in removals {
        if !write_removal(out, &store.remove(item, quantity))? {
            summary.rejected += 1;
        }
    }

    writeln!(out)?;
    writeln!(out, "Apple stock: {}", store.get_quantity("apple"))?;
    writeln!(out, "Banana stock: {}", store.get_quantity("banana"))?;

    summary.low_stock = store.list_below_threshold(config.low_stock_threshold);
    let names: Vec<&str> = summary.low_stock.iter().map(ItemName::as_str).collect();
    writeln!(
        out,
        "Low stock items (< {}): [{}]",
        config.low_stock_threshold,
        names.join(", ")
    )?;

    match store.save(&config.inventory_file) {
        Ok(()) => {
            summary.saved = true;
            writeln!(out, "Data saved to {}", config.inventory_file.display())?;
        }
        Err(err) => writeln!(out, "Error saving data: {err}")?,
    }

    write!(out, "{}", store.report())?;

    Ok(summary)
}

/// Echo a removal result; returns `false` when the store refused it.
fn write_removal<W: Write>(out: &mut W, result: &DomainResult<Removal>) -> io::Result<bool> {
    match result {
        Ok(removal) => {
            if removal.clamped {
                // Clamped removals take everything that was stored.
                writeln!(
                    out,
                    "Warning: Only {} of '{}' available",
                    removal.removed, removal.item
                )?;
            }
            writeln!(out, "Removed {} of {} from inventory", removal.removed, removal.item)?;
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "Error: {err}")?;
            Ok(false)
        }
    }
}
