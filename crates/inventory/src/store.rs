use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};

use stockroom_core::{DomainError, DomainResult};

use crate::activity::ActivityLog;
use crate::item::{ItemName, Quantity};
use crate::report::InventoryReport;

/// Threshold used for low-stock checks when the caller has no preference.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Outcome of a successful `InventoryStore::remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub item: ItemName,
    pub requested: Quantity,
    pub removed: Quantity,
    pub remaining: Quantity,
    /// The request exceeded stock and was reduced to what was available.
    pub clamped: bool,
}

impl Removal {
    /// The item no longer has an entry in the store.
    pub fn depleted(&self) -> bool {
        self.remaining.is_zero()
    }
}

/// In-memory stock levels keyed by item name.
///
/// Invariants:
/// - quantities are never negative (enforced by `Quantity`)
/// - `remove` never leaves a zero-quantity entry behind
///
/// Every rejected operation is reported through `tracing` where it happens, so
/// callers may drop the returned error without losing the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryStore {
    pub(crate) items: BTreeMap<ItemName, Quantity>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `item`, creating the entry if needed.
    ///
    /// Returns the new stock level.
    pub fn add(
        &mut self,
        item: &str,
        quantity: i64,
        log: Option<&mut ActivityLog>,
    ) -> DomainResult<Quantity> {
        self.add_at(item, quantity, log, Utc::now())
    }

    /// Same as [`InventoryStore::add`] with an explicit timestamp for the log entry.
    pub fn add_at(
        &mut self,
        item: &str,
        quantity: i64,
        log: Option<&mut ActivityLog>,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Quantity> {
        let (name, added, level) = self.apply_add(item, quantity).inspect_err(|err| {
            tracing::error!(item, quantity, error = %err, "rejected add");
        })?;

        let message = format!(
            "{}: Added {} of {}",
            occurred_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            added,
            name
        );
        tracing::info!(item = %name, added = added.get(), level = level.get(), "{message}");
        if let Some(log) = log {
            log.push(message);
        }

        Ok(level)
    }

    fn apply_add(
        &mut self,
        item: &str,
        quantity: i64,
    ) -> DomainResult<(ItemName, Quantity, Quantity)> {
        let name = ItemName::new(item)?;
        let added = Quantity::new(quantity)?;
        let current = self.items.get(item).copied().unwrap_or_default();
        let level = current.checked_add(added)?;

        self.items.insert(name.clone(), level);
        Ok((name, added, level))
    }

    /// Remove up to `quantity` units of `item`.
    ///
    /// Requests above the stored amount are clamped to it. An entry that reaches
    /// zero is deleted.
    pub fn remove(&mut self, item: &str, quantity: i64) -> DomainResult<Removal> {
        self.apply_remove(item, quantity).inspect_err(|err| {
            tracing::error!(item, quantity, error = %err, "rejected remove");
        })
    }

    fn apply_remove(&mut self, item: &str, quantity: i64) -> DomainResult<Removal> {
        let requested = Quantity::new(quantity)?;
        let (name, stored) = self
            .items
            .get_key_value(item)
            .map(|(name, stored)| (name.clone(), *stored))
            .ok_or_else(|| DomainError::not_found(item))?;

        let clamped = requested > stored;
        let removed = if clamped {
            tracing::warn!(
                item,
                requested = requested.get(),
                available = stored.get(),
                "Only {stored} of '{item}' available"
            );
            stored
        } else {
            requested
        };

        let remaining = stored.saturating_sub(removed);
        if remaining.is_zero() {
            self.items.remove(item);
        } else {
            self.items.insert(name.clone(), remaining);
        }

        tracing::info!(
            item,
            removed = removed.get(),
            remaining = remaining.get(),
            "Removed {removed} of {item} from inventory"
        );

        Ok(Removal {
            item: name,
            requested,
            removed,
            remaining,
            clamped,
        })
    }

    /// Stored quantity for `item`, or zero when absent.
    pub fn get_quantity(&self, item: &str) -> u64 {
        self.items.get(item).map_or(0, |q| q.get())
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    /// Items whose quantity is strictly below `threshold`, sorted by name.
    pub fn list_below_threshold(&self, threshold: i64) -> Vec<ItemName> {
        self.items
            .iter()
            .filter(|(_, quantity)| quantity.is_below(threshold))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in item-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, Quantity)> {
        self.items.iter().map(|(name, quantity)| (name, *quantity))
    }

    pub fn report(&self) -> InventoryReport<'_> {
        InventoryReport::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stocked(entries: &[(&str, i64)]) -> InventoryStore {
        let mut store = InventoryStore::new();
        for (item, quantity) in entries {
            store.add(item, *quantity, None).unwrap();
        }
        store
    }

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn add_creates_and_accumulates() {
        let mut store = InventoryStore::new();
        assert_eq!(store.add("apple", 10, None).unwrap().get(), 10);
        assert_eq!(store.add("apple", 4, None).unwrap().get(), 14);
        assert_eq!(store.get_quantity("apple"), 14);
    }

    #[test]
    fn add_zero_creates_entry() {
        let mut store = InventoryStore::new();
        store.add("widget", 0, None).unwrap();
        assert!(store.contains("widget"));
        assert_eq!(store.get_quantity("widget"), 0);
    }

    #[test]
    fn add_rejects_negative_quantity_without_mutation() {
        let mut store = stocked(&[("grape", 1)]);
        let before = store.clone();

        let err = store.add("grape", -2, None).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store, before);
    }

    #[test]
    fn add_rejects_empty_name_without_mutation() {
        let mut store = InventoryStore::new();
        let mut log = ActivityLog::new();

        let err = store.add("", 10, Some(&mut log)).unwrap_err();
        assert!(err.is_validation());
        assert!(store.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn add_appends_timestamped_message_to_supplied_log() {
        let mut store = InventoryStore::new();
        let mut log = ActivityLog::new();

        store
            .add_at("apple", 10, Some(&mut log), fixed_time())
            .unwrap();
        store
            .add_at("banana", 5, Some(&mut log), fixed_time())
            .unwrap();

        assert_eq!(
            log.entries(),
            &[
                "2024-03-01T12:00:00.000000Z: Added 10 of apple".to_string(),
                "2024-03-01T12:00:00.000000Z: Added 5 of banana".to_string(),
            ]
        );
    }

    #[test]
    fn add_without_log_does_not_share_state_between_calls() {
        let mut store = InventoryStore::new();
        store.add("apple", 1, None).unwrap();

        let mut log = ActivityLog::new();
        store.add("apple", 2, Some(&mut log)).unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn remove_decrements_stock() {
        let mut store = stocked(&[("apple", 10)]);

        let removal = store.remove("apple", 3).unwrap();
        assert_eq!(removal.removed.get(), 3);
        assert_eq!(removal.remaining.get(), 7);
        assert!(!removal.clamped);
        assert_eq!(store.get_quantity("apple"), 7);
    }

    #[test]
    fn remove_missing_item_is_not_found() {
        let mut store = stocked(&[("apple", 10)]);
        let before = store.clone();

        let err = store.remove("pear", 1).unwrap_err();
        assert_eq!(err, DomainError::not_found("pear"));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_clamps_to_available_and_deletes_entry() {
        let mut store = stocked(&[("orange", 3)]);

        let removal = store.remove("orange", 10).unwrap();
        assert!(removal.clamped);
        assert_eq!(removal.requested.get(), 10);
        assert_eq!(removal.removed.get(), 3);
        assert!(removal.depleted());
        assert!(!store.contains("orange"));
        assert_eq!(store.get_quantity("orange"), 0);
    }

    #[test]
    fn remove_exact_amount_deletes_entry() {
        let mut store = stocked(&[("banana", 5)]);

        let removal = store.remove("banana", 5).unwrap();
        assert!(!removal.clamped);
        assert!(!store.contains("banana"));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_rejects_negative_quantity() {
        let mut store = stocked(&[("apple", 2)]);
        let before = store.clone();

        assert!(store.remove("apple", -1).unwrap_err().is_validation());
        assert_eq!(store, before);
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let store = stocked(&[("Apple", 2)]);
        assert_eq!(store.get_quantity("apple"), 0);
        assert_eq!(store.get_quantity("Apple"), 2);
    }

    #[test]
    fn list_below_threshold_is_strict_and_sorted() {
        let store = stocked(&[("pear", 1), ("apple", 7), ("banana", 5), ("fig", 4)]);

        let low = store.list_below_threshold(5);
        assert_eq!(low, vec!["fig", "pear"]);
        assert!(store.list_below_threshold(0).is_empty());
        assert!(store.list_below_threshold(-3).is_empty());
    }

    #[test]
    fn demonstration_sequence_matches_expected_state() {
        let mut store = InventoryStore::new();
        store.add("apple", 10, None).unwrap();
        store.add("banana", 5, None).unwrap();
        store.add("orange", 3, None).unwrap();
        store.remove("apple", 3).unwrap();
        store.remove("orange", 1).unwrap();
        assert!(store.remove("pear", 1).is_err());

        let snapshot: Vec<(String, u64)> = store
            .iter()
            .map(|(name, q)| (name.to_string(), q.get()))
            .collect();
        assert_eq!(
            snapshot,
            vec![
                ("apple".to_string(), 7),
                ("banana".to_string(), 5),
                ("orange".to_string(), 2),
            ]
        );
        assert_eq!(store.list_below_threshold(DEFAULT_LOW_STOCK_THRESHOLD), vec!["orange"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: successive adds to the same item sum.
        #[test]
        fn adds_are_additive(
            item in "[a-zA-Z][a-zA-Z0-9 ]{0,15}",
            q1 in 0i64..1_000_000_000,
            q2 in 0i64..1_000_000_000,
        ) {
            let mut store = InventoryStore::new();
            store.add(&item, q1, None).unwrap();
            store.add(&item, q2, None).unwrap();
            prop_assert_eq!(store.get_quantity(&item), (q1 + q2) as u64);
        }

        /// Property: the low-stock list is exactly the set of items under the threshold.
        #[test]
        fn low_stock_matches_filter(
            entries in prop::collection::btree_map("[a-z]{1,8}", 0i64..20, 0..12),
            threshold in -5i64..25,
        ) {
            let mut store = InventoryStore::new();
            for (item, quantity) in &entries {
                store.add(item, *quantity, None).unwrap();
            }

            let expected: Vec<String> = entries
                .iter()
                .filter(|(_, q)| **q < threshold)
                .map(|(item, _)| item.clone())
                .collect();
            let actual: Vec<String> = store
                .list_below_threshold(threshold)
                .into_iter()
                .map(String::from)
                .collect();
            prop_assert_eq!(actual, expected);
        }

        /// Property: removal never leaves a zero entry and never goes negative.
        #[test]
        fn remove_never_leaves_zero_entries(
            stock in 0i64..50,
            take in 0i64..100,
        ) {
            let mut store = InventoryStore::new();
            store.add("item", stock, None).unwrap();
            let removal = store.remove("item", take).unwrap();

            prop_assert_eq!(removal.clamped, take > stock);
            prop_assert_eq!(removal.removed.get(), take.min(stock) as u64);
            prop_assert_eq!(store.get_quantity("item"), (stock - take.min(stock)) as u64);
            prop_assert_eq!(store.contains("item"), stock > take);
        }
    }
}
