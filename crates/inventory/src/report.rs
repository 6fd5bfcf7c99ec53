//! Plain-text listing of every item and its quantity.

use core::fmt;

use crate::store::InventoryStore;

const TITLE: &str = "Items Report";
const SEPARATOR_WIDTH: usize = 40;

/// Display adapter for an `InventoryStore`.
///
/// ```text
///
/// ========================================
/// Items Report
/// ========================================
/// apple -> 7
/// ========================================
///
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InventoryReport<'a> {
    store: &'a InventoryStore,
}

impl<'a> InventoryReport<'a> {
    pub fn new(store: &'a InventoryStore) -> Self {
        Self { store }
    }
}

fn separator(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{:=<width$}", "", width = SEPARATOR_WIDTH)
}

impl fmt::Display for InventoryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        separator(f)?;
        writeln!(f, "{TITLE}")?;
        separator(f)?;

        if self.store.is_empty() {
            writeln!(f, "No items in inventory")?;
        } else {
            for (item, quantity) in self.store.iter() {
                writeln!(f, "{item} -> {quantity}")?;
            }
        }

        separator(f)?;
        writeln!(f)
    }
}
