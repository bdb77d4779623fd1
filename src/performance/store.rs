use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::types::{NewPerformance, Performance};
use crate::scoring::EventType;
use crate::storage::{load_state, save_state, Versioned};

const STORE_VERSION: u32 = 1;

/// All saved performances, keyed by an incrementing id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceStore {
    pub version: u32,
    next_id: u64,
    #[serde(default)]
    performances: Vec<Performance>,
}

impl Default for PerformanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Versioned for PerformanceStore {
    const VERSION: u32 = STORE_VERSION;

    fn version(&self) -> u32 {
        self.version
    }
}

impl PerformanceStore {
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            next_id: 1,
            performances: Vec::new(),
        }
    }

    /// Save a new performance dated now
    pub fn create(&mut self, new: NewPerformance) -> Performance {
        self.create_at(new, Utc::now())
    }

    /// Save a new performance with an explicit date
    pub fn create_at(&mut self, new: NewPerformance, date: DateTime<Utc>) -> Performance {
        let id = self.next_id;
        self.next_id += 1;

        let performance = Performance {
            id,
            event_type: new.event_type,
            total_score: new.total_score(),
            event_results: new.event_results,
            date,
            label: new.label,
        };
        self.performances.push(performance.clone());
        performance
    }

    /// Performances newest first, optionally limited to one competition type
    pub fn list(&self, filter: Option<EventType>) -> Vec<&Performance> {
        let mut listed: Vec<&Performance> = self
            .performances
            .iter()
            .filter(|p| filter.map_or(true, |t| p.event_type == t))
            .collect();
        listed.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        listed
    }

    /// Performances oldest first, the order achievements are judged in
    pub fn history(&self) -> Vec<Performance> {
        let mut history = self.performances.clone();
        history.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        history
    }

    pub fn get(&self, id: u64) -> Option<&Performance> {
        self.performances.iter().find(|p| p.id == id)
    }

    /// Replace a performance's contents, keeping its id and original date
    pub fn update(&mut self, id: u64, new: NewPerformance) -> Option<Performance> {
        let existing = self.performances.iter_mut().find(|p| p.id == id)?;
        existing.event_type = new.event_type;
        existing.total_score = new.total_score();
        existing.event_results = new.event_results;
        existing.label = new.label;
        Some(existing.clone())
    }

    /// Remove a performance
    /// Returns true if it existed, false otherwise
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.performances.len();
        self.performances.retain(|p| p.id != id);
        self.performances.len() != before
    }

    pub fn len(&self) -> usize {
        self.performances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.performances.is_empty()
    }
}

/// Performances file inside the data directory
pub fn get_store_path(data_dir: &Path) -> PathBuf {
    data_dir.join("performances.json")
}

pub fn load_store(path: &Path) -> anyhow::Result<PerformanceStore> {
    load_state(path, "performance store")
}

pub fn save_store(path: &Path, store: &PerformanceStore) -> anyhow::Result<()> {
    save_state(path, store, "performance store")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::EventResult;
    use crate::scoring::{Event, ResultKind};
    use chrono::Duration;
    use std::env;

    fn new_performance(event_type: EventType, points: u32) -> NewPerformance {
        NewPerformance {
            event_type,
            event_results: vec![EventResult {
                event: Event::ShotPut,
                result: "14.50".to_string(),
                points,
                kind: ResultKind::Measurement,
                unit: "meters".to_string(),
                day: None,
            }],
            label: None,
        }
    }

    #[test]
    fn test_create_assigns_incrementing_ids() {
        let mut store = PerformanceStore::new();
        let first = store.create(new_performance(EventType::Decathlon, 800));
        let second = store.create(new_performance(EventType::Heptathlon, 700));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.total_score, 800);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = PerformanceStore::new();
        store.create(new_performance(EventType::Decathlon, 800));
        assert!(store.delete(1));
        let next = store.create(new_performance(EventType::Decathlon, 800));
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_list_newest_first_with_filter() {
        let mut store = PerformanceStore::new();
        let now = Utc::now();
        store.create_at(new_performance(EventType::Decathlon, 1), now - Duration::days(3));
        store.create_at(new_performance(EventType::Heptathlon, 2), now - Duration::days(1));
        store.create_at(new_performance(EventType::Decathlon, 3), now - Duration::days(2));

        let all: Vec<u64> = store.list(None).iter().map(|p| p.id).collect();
        assert_eq!(all, vec![2, 3, 1]);

        let decathlons: Vec<u64> = store
            .list(Some(EventType::Decathlon))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(decathlons, vec![3, 1]);

        assert!(store.list(Some(EventType::Pentathlon)).is_empty());
    }

    #[test]
    fn test_history_oldest_first() {
        let mut store = PerformanceStore::new();
        let now = Utc::now();
        store.create_at(new_performance(EventType::Decathlon, 1), now);
        store.create_at(new_performance(EventType::Decathlon, 2), now - Duration::hours(1));
        let ids: Vec<u64> = store.history().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_update_keeps_date() {
        let mut store = PerformanceStore::new();
        let date = Utc::now() - Duration::days(10);
        let created = store.create_at(new_performance(EventType::Decathlon, 500), date);

        let mut replacement = new_performance(EventType::Decathlon, 650);
        replacement.label = Some("re-timed".to_string());
        let updated = store.update(created.id, replacement).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, date);
        assert_eq!(updated.total_score, 650);
        assert_eq!(store.get(created.id).unwrap().label.as_deref(), Some("re-timed"));
    }

    #[test]
    fn test_update_missing() {
        let mut store = PerformanceStore::new();
        assert!(store.update(42, new_performance(EventType::Decathlon, 1)).is_none());
    }

    #[test]
    fn test_delete_missing() {
        let mut store = PerformanceStore::new();
        assert!(!store.delete(1));
        assert!(store.get(1).is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("multi_smackdown_test_store.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut store = PerformanceStore::new();
        store.create(new_performance(EventType::Pentathlon, 900));
        save_store(&temp_path, &store).unwrap();

        let mut loaded = load_store(&temp_path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(1).unwrap().total_score, 900);
        // Id counter survives the round trip
        assert_eq!(loaded.create(new_performance(EventType::Pentathlon, 1)).id, 2);

        let _ = std::fs::remove_file(&temp_path);
    }
}
