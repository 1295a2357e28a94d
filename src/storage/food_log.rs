use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::KeyValueStore;

pub const STORAGE_NAMESPACE: &str = "nutriplan";

const FAVORITES_KEY: &str = "nutriplan-favorites";
const PREFS_KEY: &str = "nutriplan-prefs";

/// Storage key for one calendar day's food log. Uses the local date, so
/// entries logged just before and just after local midnight land in
/// different logs.
pub fn food_log_key(date: NaiveDate) -> String {
    format!("{STORAGE_NAMESPACE}-log-{}", date.format("%Y-%m-%d"))
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Meal,
    Product,
    Custom,
}

impl EntryType {
    pub fn label(self) -> &'static str {
        match self {
            EntryType::Meal => "Meal",
            EntryType::Product => "Product",
            EntryType::Custom => "Custom",
        }
    }
}

/// One logged food item. Belongs to exactly one day's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(rename = "addedAt")]
    pub logged_at: String,
}

/// What a caller supplies when logging an item; id and timestamp are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct LogDraft {
    pub name: String,
    pub entry_type: EntryType,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl LogDraft {
    pub fn custom(name: impl Into<String>, calories: f64, protein: f64, carbs: f64, fats: f64) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::Custom,
            calories,
            protein,
            carbs,
            fats,
        }
    }
}

impl crate::models::Meal {
    /// Log draft for this meal. Recipe upstreams carry no nutrition facts,
    /// so the numbers start at zero and stay editable by the caller.
    pub fn to_log_draft(&self) -> LogDraft {
        LogDraft {
            name: self.name.clone(),
            entry_type: EntryType::Meal,
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
        }
    }
}

impl crate::models::Product {
    pub fn to_log_draft(&self) -> LogDraft {
        LogDraft {
            name: self.name.clone(),
            entry_type: EntryType::Product,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
        }
    }
}

// Millisecond timestamp plus a random suffix: two adds within the same
// millisecond still get distinct ids.
fn new_entry_id() -> String {
    format!("{}-{:08x}", Utc::now().timestamp_millis(), rand::random::<u32>())
}

/// Per-day food log plus favorites and preferences, over an injected
/// key-value store. Every mutation persists the full value back before
/// returning.
pub struct FoodLogStore {
    store: Arc<dyn KeyValueStore>,
}

impl FoodLogStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The log for `date`. An absent key or an unparsable value both read
    /// as an empty log.
    pub fn get(&self, date: NaiveDate) -> Vec<FoodLogEntry> {
        let key = food_log_key(date);
        let Some(raw) = self.store.get(&key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("corrupt food log at {key}, resetting: {e}");
                Vec::new()
            }
        }
    }

    /// Append a new entry to `date`'s log and persist it. Returns the
    /// updated log.
    pub fn add(&self, draft: LogDraft, date: NaiveDate) -> Vec<FoodLogEntry> {
        let mut entries = self.get(date);
        entries.push(FoodLogEntry {
            id: new_entry_id(),
            name: draft.name,
            entry_type: draft.entry_type,
            calories: draft.calories,
            protein: draft.protein,
            carbs: draft.carbs,
            fats: draft.fats,
            logged_at: Local::now().to_rfc3339(),
        });
        self.save(date, &entries);
        entries
    }

    /// Drop the entry with `id` from `date`'s log. No match is a no-op.
    pub fn remove(&self, id: &str, date: NaiveDate) -> Vec<FoodLogEntry> {
        let mut entries = self.get(date);
        entries.retain(|e| e.id != id);
        self.save(date, &entries);
        entries
    }

    /// Delete the stored key for `date` entirely.
    pub fn clear(&self, date: NaiveDate) {
        self.store.remove(&food_log_key(date));
    }

    fn save(&self, date: NaiveDate, entries: &[FoodLogEntry]) {
        match serde_json::to_string(entries) {
            Ok(json) => self.store.set(&food_log_key(date), &json),
            Err(e) => warn!("failed to encode food log: {e}"),
        }
    }

    // Favorites

    pub fn favorites(&self) -> Vec<String> {
        self.store
            .get(FAVORITES_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn add_favorite(&self, meal_id: &str) {
        let mut favorites = self.favorites();
        if !favorites.iter().any(|id| id == meal_id) {
            favorites.push(meal_id.to_string());
            self.save_favorites(&favorites);
        }
    }

    pub fn remove_favorite(&self, meal_id: &str) {
        let mut favorites = self.favorites();
        favorites.retain(|id| id != meal_id);
        self.save_favorites(&favorites);
    }

    pub fn is_favorite(&self, meal_id: &str) -> bool {
        self.favorites().iter().any(|id| id == meal_id)
    }

    fn save_favorites(&self, favorites: &[String]) {
        match serde_json::to_string(favorites) {
            Ok(json) => self.store.set(FAVORITES_KEY, &json),
            Err(e) => warn!("failed to encode favorites: {e}"),
        }
    }

    // Preferences

    pub fn preference(&self, key: &str) -> Option<Value> {
        let prefs = self.preferences();
        prefs.get(key).cloned()
    }

    pub fn set_preference(&self, key: &str, value: Value) {
        let mut prefs = self.preferences();
        prefs.insert(key.to_string(), value);
        match serde_json::to_string(&prefs) {
            Ok(json) => self.store.set(PREFS_KEY, &json),
            Err(e) => warn!("failed to encode preferences: {e}"),
        }
    }

    fn preferences(&self) -> serde_json::Map<String, Value> {
        self.store
            .get(PREFS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use serde_json::json;

    fn store() -> FoodLogStore {
        FoodLogStore::new(Arc::new(MemoryStore::default()))
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn key_derivation_is_deterministic_and_day_scoped() {
        let d = date("2025-03-09");
        assert_eq!(food_log_key(d), "nutriplan-log-2025-03-09");
        assert_eq!(food_log_key(d), food_log_key(d));
        assert_ne!(food_log_key(d), food_log_key(date("2025-03-10")));
    }

    #[test]
    fn add_then_get_round_trips() {
        let store = store();
        let d = date("2025-03-09");

        let entries = store.add(LogDraft::custom("Oatmeal", 150.0, 5.0, 27.0, 3.0), d);
        assert_eq!(entries.len(), 1);

        let read = store.get(d);
        assert_eq!(read, entries);
        assert_eq!(read[0].name, "Oatmeal");
        assert_eq!(read[0].calories, 150.0);
        assert_eq!(read[0].entry_type, EntryType::Custom);
        assert!(!read[0].id.is_empty());
        assert!(!read[0].logged_at.is_empty());

        // other days are unaffected
        assert!(store.get(date("2025-03-10")).is_empty());
    }

    #[test]
    fn rapid_adds_get_distinct_ids() {
        let store = store();
        let d = date("2025-03-09");
        for _ in 0..20 {
            store.add(LogDraft::custom("Snack", 1.0, 0.0, 0.0, 0.0), d);
        }
        let entries = store.get(d);
        let mut ids: Vec<_> = entries.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn remove_filters_by_id_and_ignores_misses() {
        let store = store();
        let d = date("2025-03-09");
        store.add(LogDraft::custom("Apple", 95.0, 0.5, 25.0, 0.3), d);
        let entries = store.add(LogDraft::custom("Egg", 78.0, 6.0, 0.6, 5.0), d);

        let removed = store.remove(&entries[0].id, d);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].name, "Egg");

        let unchanged = store.remove("no-such-id", d);
        assert_eq!(unchanged, removed);
    }

    #[test]
    fn clear_deletes_the_key() {
        let kv = Arc::new(MemoryStore::default());
        let store = FoodLogStore::new(kv.clone());
        let d = date("2025-03-09");

        store.add(LogDraft::custom("Toast", 120.0, 4.0, 22.0, 1.0), d);
        store.clear(d);

        assert!(store.get(d).is_empty());
        assert_eq!(kv.get(&food_log_key(d)), None);
    }

    #[test]
    fn corrupt_stored_json_reads_as_empty() {
        let kv = Arc::new(MemoryStore::default());
        let d = date("2025-03-09");
        kv.set(&food_log_key(d), "{not json");

        let store = FoodLogStore::new(kv);
        assert!(store.get(d).is_empty());
    }

    #[test]
    fn missing_nutrition_fields_decode_as_zero() {
        let kv = Arc::new(MemoryStore::default());
        let d = date("2025-03-09");
        kv.set(
            &food_log_key(d),
            r#"[{"id":"1","name":"Mystery","type":"custom","addedAt":"2025-03-09T08:00:00Z"}]"#,
        );

        let store = FoodLogStore::new(kv);
        let entries = store.get(d);
        assert_eq!(entries[0].calories, 0.0);
        assert_eq!(entries[0].fats, 0.0);
    }

    #[test]
    fn favorites_deduplicate_and_remove() {
        let store = store();
        store.add_favorite("52772");
        store.add_favorite("52772");
        store.add_favorite("52804");
        assert_eq!(store.favorites(), vec!["52772", "52804"]);
        assert!(store.is_favorite("52804"));

        store.remove_favorite("52772");
        assert_eq!(store.favorites(), vec!["52804"]);
        assert!(!store.is_favorite("52772"));
    }

    #[test]
    fn preferences_round_trip() {
        let store = store();
        assert_eq!(store.preference("theme"), None);
        store.set_preference("theme", json!("dark"));
        store.set_preference("page_size", json!(24));
        assert_eq!(store.preference("theme"), Some(json!("dark")));
        assert_eq!(store.preference("page_size"), Some(json!(24)));
    }
}
