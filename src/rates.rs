//! Rate Store
//!
//! Shared, synchronized holder of the current per-category rates. Cloning a
//! [`RateStore`] clones the handle, not the table.

use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::core::{Category, Rate, RateTable};
use crate::error::{SimError, SimResult};

#[derive(Clone, Debug, Default)]
pub struct RateStore {
    table: Arc<RwLock<RateTable>>,
}

impl RateStore {
    /// All categories start at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current table
    pub fn get_rates(&self) -> RateTable {
        *self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Merge `partial` into the table and return the resulting full table.
    ///
    /// Every entry is validated before anything is written: an unknown
    /// category or a non-numeric value rejects the whole update. Numbers are
    /// rounded and clamped into [0, 100].
    pub fn set_rates<'a, I>(&self, partial: I) -> SimResult<RateTable>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut updates = Vec::new();
        for (name, value) in partial {
            let category: Category = name.parse()?;
            updates.push((category, parse_rate(category, value)?));
        }

        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        for (category, rate) in updates {
            table.set(category, rate);
        }
        debug!(rates = ?*table, "rate table updated");
        Ok(*table)
    }

    /// Typed single-category update, used by embedders and tests
    pub fn set_rate(&self, category: Category, rate: Rate) -> RateTable {
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        table.set(category, rate);
        *table
    }
}

fn parse_rate(category: Category, value: &Value) -> SimResult<Rate> {
    let invalid = || SimError::InvalidRate {
        category,
        value: value.to_string(),
    };

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Rate::clamped(i))
            } else if let Some(f) = n.as_f64() {
                // u64 beyond i64::MAX lands here too; `as` saturates
                Ok(Rate::clamped(f.round() as i64))
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn update(store: &RateStore, body: Value) -> SimResult<RateTable> {
        let map: Map<String, Value> = serde_json::from_value(body).unwrap();
        store.set_rates(map.iter().map(|(k, v)| (k.as_str(), v)))
    }

    #[test]
    fn test_starts_all_zero() {
        let store = RateStore::new();
        assert_eq!(store.get_rates(), RateTable::default());
    }

    #[test]
    fn test_round_trip_every_rate() {
        let store = RateStore::new();
        for category in Category::ALL {
            for r in 0..=100i64 {
                let value = json!(r);
                store.set_rates([(category.as_str(), &value)]).unwrap();
                assert_eq!(store.get_rates().get(category).value() as i64, r);
            }
        }
    }

    #[test]
    fn test_partial_update_keeps_others() {
        let store = RateStore::new();
        update(&store, json!({"system": 10, "application": 20, "access": 30})).unwrap();

        let table = update(&store, json!({"error": 50})).unwrap();
        assert_eq!(table.system.value(), 10);
        assert_eq!(table.error.value(), 50);
        assert_eq!(table.application.value(), 20);
        assert_eq!(table.access.value(), 30);
        assert_eq!(store.get_rates(), table);
    }

    #[test]
    fn test_unknown_category_rejected_without_change() {
        let store = RateStore::new();
        update(&store, json!({"system": 5})).unwrap();
        let before = store.get_rates();

        let err = update(&store, json!({"error": 40, "network": 10})).unwrap_err();
        assert!(matches!(err, SimError::InvalidCategory { ref name } if name == "network"));
        assert_eq!(store.get_rates(), before);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let store = RateStore::new();
        let table = update(&store, json!({"system": 150, "error": -5, "access": 12.6})).unwrap();
        assert_eq!(table.system, Rate::MAX);
        assert_eq!(table.error, Rate::ZERO);
        assert_eq!(table.access.value(), 13);
    }

    #[test]
    fn test_non_numeric_rate_rejected() {
        let store = RateStore::new();
        let err = update(&store, json!({"system": 20, "access": "fast"})).unwrap_err();
        assert!(matches!(err, SimError::InvalidRate { category: Category::Access, .. }));
        assert_eq!(store.get_rates(), RateTable::default());
    }

    #[test]
    fn test_clones_share_table() {
        let store = RateStore::new();
        let other = store.clone();
        other.set_rate(Category::Error, Rate::clamped(70));
        assert_eq!(store.get_rates().error.value(), 70);
    }
}
