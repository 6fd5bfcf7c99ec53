use std::io;

use anyhow::Context;
use stockroom_cli::{Config, prompt_literal, run_demo};
use stockroom_inventory::InventoryStore;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    stockroom_observability::init(&config.log_filter);

    tracing::info!(
        inventory_file = %config.inventory_file.display(),
        low_stock_threshold = config.low_stock_threshold,
        "starting inventory demonstration"
    );

    let mut store = InventoryStore::new();
    let mut out = io::stdout().lock();

    let summary = run_demo(&mut store, &config, &mut out).context("failed to write report")?;
    tracing::info!(
        rejected = summary.rejected,
        saved = summary.saved,
        items = store.len(),
        "demonstration finished"
    );

    prompt_literal(&mut io::stdin().lock(), &mut out).context("failed to read literal input")?;

    Ok(())
}
