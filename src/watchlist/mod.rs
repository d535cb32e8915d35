use crate::models::SavedEntry;
use crate::storage::{load_json, save_json, LocalStorage, SnapshotStorage};
use leptos::logging::warn;
use leptos::prelude::*;

/// Linear scan by id.
pub fn is_saved(entries: &[SavedEntry], id: i64) -> bool {
    entries.iter().any(|e| e.id == id)
}

/// Read the saved snapshot. Missing, corrupt or unreachable storage all come
/// back as an empty list.
pub fn load_watchlist(storage: &impl SnapshotStorage, key: &str) -> Vec<SavedEntry> {
    match load_json::<Vec<SavedEntry>>(storage, key) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(e) => {
            warn!("watchlist: starting empty, {e}");
            Vec::new()
        }
    }
}

/// Overwrite the snapshot with the full list. Failures are logged and dropped.
pub fn save_watchlist(storage: &impl SnapshotStorage, key: &str, entries: &[SavedEntry]) {
    if let Err(e) = save_json(storage, key, &entries) {
        warn!("watchlist: snapshot not written, {e}");
    }
}

/// The user's saved titles, newest first.
///
/// Created once at startup and handed out through context. Consumers read
/// via [`entries`](Self::entries) and mutate only through [`add`](Self::add)
/// and [`remove`](Self::remove) (or [`toggle`](Self::toggle)); each mutation
/// rewrites the whole snapshot.
#[derive(Clone)]
pub struct WatchlistStore<S: SnapshotStorage = LocalStorage> {
    entries: RwSignal<Vec<SavedEntry>>,
    storage: S,
    key: String,
}

impl<S: SnapshotStorage> WatchlistStore<S> {
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = load_watchlist(&storage, &key);
        Self {
            entries: RwSignal::new(entries),
            storage,
            key,
        }
    }

    /// Reactive, read-only view.
    pub fn entries(&self) -> ReadSignal<Vec<SavedEntry>> {
        self.entries.read_only()
    }

    pub fn snapshot(&self) -> Vec<SavedEntry> {
        self.entries.get_untracked()
    }

    pub fn len(&self) -> usize {
        self.entries.with(|e| e.len())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.with(|e| e.is_empty())
    }

    /// Tracked membership check, suitable inside views.
    pub fn contains(&self, id: i64) -> bool {
        self.entries.with(|e| is_saved(e, id))
    }

    /// Prepend. Does not look for an existing `id`; use
    /// [`toggle`](Self::toggle) to keep the list duplicate-free.
    pub fn add(&self, entry: SavedEntry) {
        self.entries.update(|e| e.insert(0, entry));
        self.persist();
    }

    /// Drop every entry with `id`. Unknown ids are a no-op (the snapshot is
    /// still rewritten).
    pub fn remove(&self, id: i64) {
        self.entries.update(|e| e.retain(|x| x.id != id));
        self.persist();
    }

    /// Remove if saved, otherwise add. Returns whether `entry` is saved
    /// afterwards.
    pub fn toggle(&self, entry: SavedEntry) -> bool {
        let saved = self.entries.with_untracked(|e| is_saved(e, entry.id));
        if saved {
            self.remove(entry.id);
        } else {
            self.add(entry);
        }
        !saved
    }

    fn persist(&self) {
        self.entries
            .with_untracked(|e| save_watchlist(&self.storage, &self.key, e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaKind;
    use crate::storage::{MemoryStorage, WATCHLIST_KEY};

    fn fight_club() -> SavedEntry {
        let mut e = SavedEntry::new(550, "Fight Club", MediaKind::Movie);
        e.rating = Some(8.4);
        e.release_date = Some("1999-10-15".to_string());
        e
    }

    fn game_of_thrones() -> SavedEntry {
        let mut e = SavedEntry::new(1399, "Game of Thrones", MediaKind::Tv);
        e.poster_path = Some("/u3bZgnGQ9T01sWNhy95hkfU0Mvs.jpg".to_string());
        e.extra
            .insert("first_air_date".to_string(), "2011-04-17".into());
        e
    }

    fn ids(store: &WatchlistStore<MemoryStorage>) -> Vec<i64> {
        store.snapshot().iter().map(|e| e.id).collect()
    }

    fn empty_store() -> WatchlistStore<MemoryStorage> {
        WatchlistStore::load(MemoryStorage::new(), WATCHLIST_KEY)
    }

    #[test]
    fn test_toggle_scenario() {
        let store = empty_store();
        assert!(store.toggle(fight_club()));
        assert_eq!(ids(&store), vec![550]);

        assert!(store.toggle(game_of_thrones()));
        assert_eq!(ids(&store), vec![1399, 550]);

        assert!(!store.toggle(fight_club()));
        assert_eq!(ids(&store), vec![1399]);
        assert_eq!(store.snapshot()[0].display_title(), "Game of Thrones");
    }

    #[test]
    fn test_toggle_alternates_membership() {
        let store = empty_store();
        for n in 1..=7 {
            store.toggle(fight_club());
            let count = store.snapshot().iter().filter(|e| e.id == 550).count();
            assert_eq!(count, n % 2, "after {n} toggles");
        }
    }

    #[test]
    fn test_add_then_remove_restores_prior_state() {
        let store = empty_store();
        store.add(game_of_thrones());
        store.add(fight_club());
        let before = store.snapshot();

        let mut e = SavedEntry::new(27205, "Inception", MediaKind::Movie);
        e.rating = Some(8.3);
        store.add(e);
        assert_eq!(ids(&store), vec![27205, 550, 1399]);

        store.remove(27205);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_add_does_not_deduplicate() {
        let store = empty_store();
        store.add(fight_club());
        store.add(fight_club());
        assert_eq!(ids(&store), vec![550, 550]);

        // remove() clears every copy.
        store.remove(550);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let store = empty_store();
        store.add(fight_club());
        store.remove(42);
        assert_eq!(ids(&store), vec![550]);
    }

    #[test]
    fn test_every_mutation_writes_full_snapshot() {
        let storage = MemoryStorage::new();
        let store = WatchlistStore::load(storage.clone(), WATCHLIST_KEY);

        store.add(fight_club());
        let raw = storage.get_item(WATCHLIST_KEY).unwrap().unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v[0]["id"], 550);
        assert_eq!(v[0]["media_type"], "movie");

        store.add(game_of_thrones());
        store.remove(550);
        let raw = storage.get_item(WATCHLIST_KEY).unwrap().unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v.as_array().map(|a| a.len()), Some(1));
        assert_eq!(v[0]["name"], "Game of Thrones");
    }

    #[test]
    fn test_persistence_roundtrip_keeps_order_and_fields() {
        let storage = MemoryStorage::new();
        let store = WatchlistStore::load(storage.clone(), WATCHLIST_KEY);
        store.add(fight_club());
        store.add(game_of_thrones());

        let reloaded = WatchlistStore::load(storage, WATCHLIST_KEY);
        assert_eq!(reloaded.snapshot(), store.snapshot());
        assert_eq!(
            reloaded.snapshot()[0].display_date(),
            Some("2011-04-17")
        );
    }

    #[test]
    fn test_load_corrupt_snapshot_starts_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(WATCHLIST_KEY, "[{\"id\": \"oops\"").unwrap();
        let store = WatchlistStore::load(storage, WATCHLIST_KEY);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_load_reads_snapshot_written_by_older_builds() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                WATCHLIST_KEY,
                r#"[{"id":1399,"name":"Game of Thrones","media_type":"tv","poster_path":"/u3b.jpg","vote_average":8.4,"first_air_date":"2011-04-17"},
                    {"id":550,"title":"Fight Club","media_type":"movie","poster_path":null,"vote_average":8.4,"release_date":"1999-10-15"}]"#,
            )
            .unwrap();
        let store = WatchlistStore::load(storage, WATCHLIST_KEY);
        assert_eq!(ids(&store), vec![1399, 550]);
        assert!(is_saved(&store.snapshot(), 550));
        assert!(!is_saved(&store.snapshot(), 27205));
    }

    #[test]
    fn test_load_custom_key() {
        let storage = MemoryStorage::new();
        let a = WatchlistStore::load(storage.clone(), "watchlist-test");
        a.add(fight_club());
        assert!(storage.get_item(WATCHLIST_KEY).unwrap().is_none());
        assert_eq!(load_watchlist(&storage, "watchlist-test").len(), 1);
    }
}
