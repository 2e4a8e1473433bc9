//! Generic collection store

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pitwall_schemas::{Collection, Record};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::storage::FileStorage;

/// List/get/add/update/delete over one collection document
///
/// Reads take the shared side of the collection lock and writes the
/// exclusive side, and every operation starts from the file. Clones share
/// the lock.
pub struct CollectionStore<C: Collection> {
    path: PathBuf,
    storage: FileStorage,
    lock: Arc<RwLock<()>>,
    _collection: PhantomData<fn() -> C>,
}

impl<C: Collection> Clone for CollectionStore<C> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            storage: self.storage.clone(),
            lock: Arc::clone(&self.lock),
            _collection: PhantomData,
        }
    }
}

impl<C: Collection> std::fmt::Debug for CollectionStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore")
            .field("collection", &C::NAME)
            .field("path", &self.path)
            .field("storage", &self.storage)
            .finish()
    }
}

impl<C: Collection> CollectionStore<C> {
    /// Create a store for the document at `path`
    pub fn new(path: impl Into<PathBuf>, storage: FileStorage) -> Self {
        Self {
            path: path.into(),
            storage,
            lock: Arc::new(RwLock::new(())),
            _collection: PhantomData,
        }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in stored order
    pub async fn list(&self) -> Result<Vec<C::Item>, StoreError> {
        let _guard = self.lock.read().await;
        debug!(collection = C::NAME, "Listing records");

        Ok(self.load().await?.into_records())
    }

    /// The first record with `id`
    pub async fn get(&self, id: u64) -> Result<C::Item, StoreError> {
        let _guard = self.lock.read().await;
        debug!(collection = C::NAME, id, "Loading record");

        self.load()
            .await?
            .into_records()
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| StoreError::not_found(<C::Item as Record>::KIND, id))
    }

    /// Assign fresh IDs to `record`, append it and persist
    ///
    /// The advanced counters are only stored together with the new record,
    /// so a failed write never burns an ID.
    pub async fn add(&self, mut record: C::Item) -> Result<C::Item, StoreError> {
        let _guard = self.lock.write().await;

        let mut collection = self.load().await?;
        collection.assign_ids(&mut record)?;
        collection.records_mut().push(record.clone());
        self.persist(&collection).await?;

        info!(collection = C::NAME, id = record.id(), "Record added");
        Ok(record)
    }

    /// Replace the record with the same ID as `record`
    ///
    /// Fails with [`StoreError::NotFound`] and leaves the file untouched if no
    /// such record exists.
    pub async fn update(&self, record: C::Item) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;
        let id = record.id();

        let mut collection = self.load().await?;
        let Some(slot) = collection
            .records_mut()
            .iter_mut()
            .find(|existing| existing.id() == id)
        else {
            warn!(collection = C::NAME, id, "Cannot update missing record");
            return Err(StoreError::not_found(<C::Item as Record>::KIND, id));
        };
        *slot = record;
        self.persist(&collection).await?;

        info!(collection = C::NAME, id, "Record updated");
        Ok(())
    }

    /// Apply `change` to the record with `id` and persist, under one write lock
    ///
    /// If `change` fails, its error is returned and the file is left untouched.
    /// A missing record fails with [`StoreError::NotFound`] before `change`
    /// runs.
    pub async fn modify<R, E, F>(&self, id: u64, change: F) -> Result<R, E>
    where
        F: FnOnce(&mut C::Item) -> Result<R, E>,
        E: From<StoreError>,
    {
        let _guard = self.lock.write().await;

        let mut collection = self.load().await?;
        let Some(record) = collection
            .records_mut()
            .iter_mut()
            .find(|existing| existing.id() == id)
        else {
            warn!(collection = C::NAME, id, "Cannot modify missing record");
            return Err(StoreError::not_found(<C::Item as Record>::KIND, id).into());
        };

        let outcome = change(record)?;
        self.persist(&collection).await?;

        info!(collection = C::NAME, id, "Record modified");
        Ok(outcome)
    }

    /// Remove every record with `id` and persist
    ///
    /// A missing ID is not an error; the collection is rewritten unchanged.
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;

        let mut collection = self.load().await?;
        let before = collection.records().len();
        collection.records_mut().retain(|record| record.id() != id);
        let removed = before.saturating_sub(collection.records().len());
        self.persist(&collection).await?;

        info!(collection = C::NAME, id, removed, "Record deleted");
        Ok(())
    }

    /// Read and decode the document; a missing or blank file is an empty collection
    async fn load(&self) -> Result<C, StoreError> {
        let Some(bytes) = self.storage.read(&self.path).await? else {
            return Ok(C::default());
        };
        if bytes.trim_ascii().is_empty() {
            return Ok(C::default());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::decode_failed(&self.path, source))
    }

    async fn persist(&self, collection: &C) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(collection).map_err(|source| StoreError::EncodeFailed {
            collection: C::NAME,
            source,
        })?;

        self.storage.write(&self.path, &bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitwall_schemas::{EventCollection, EventType, RaceEvent, Team, TeamCollection};
    use tempfile::TempDir;
    use tracing_test::traced_test;

    fn must<T, E: std::fmt::Debug>(r: std::result::Result<T, E>) -> T {
        r.expect("operation should succeed")
    }

    fn team_store(dir: &TempDir) -> CollectionStore<TeamCollection> {
        CollectionStore::new(dir.path().join("teams.json"), FileStorage::default())
    }

    fn event_store(dir: &TempDir) -> CollectionStore<EventCollection> {
        CollectionStore::new(dir.path().join("events.json"), FileStorage::default())
    }

    #[tokio::test]
    async fn test_list_on_missing_file_is_empty() {
        let temp_dir = must(TempDir::new());
        let store = team_store(&temp_dir);

        let teams = must(store.list().await);
        assert!(teams.is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_list_on_empty_file_is_empty() {
        let temp_dir = must(TempDir::new());
        let store = event_store(&temp_dir);
        must(std::fs::write(store.path(), b""));

        let events = must(store.list().await);
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_first_id_is_zero() {
        let temp_dir = must(TempDir::new());
        let store = event_store(&temp_dir);

        let first = must(store.add(RaceEvent::new("one", 0, EventType::Race)).await);
        let second = must(store.add(RaceEvent::new("two", 0, EventType::Race)).await);

        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
    }

    #[tokio::test]
    async fn test_get_returns_first_match() {
        let temp_dir = must(TempDir::new());
        let store = team_store(&temp_dir);
        let duplicated = TeamCollection {
            teams: vec![
                Team { id: 1, name: "first".to_string(), drivers: Vec::new() },
                Team { id: 1, name: "second".to_string(), drivers: Vec::new() },
            ],
            ..Default::default()
        };
        must(std::fs::write(store.path(), must(serde_json::to_vec(&duplicated))));

        let team = must(store.get(1).await);
        assert_eq!(team.name, "first");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_decode_error() {
        let temp_dir = must(TempDir::new());
        let store = team_store(&temp_dir);
        must(std::fs::write(store.path(), b"{not json"));

        let result = store.list().await;
        assert!(matches!(result, Err(StoreError::DecodeFailed { .. })));
    }

    #[tokio::test]
    async fn test_failed_write_does_not_advance_counter() {
        let temp_dir = must(TempDir::new());
        let store = event_store(&temp_dir);
        must(store.add(RaceEvent::new("kept", 0, EventType::Race)).await);

        let blocker = crate::storage::temp_path_for(store.path());
        must(std::fs::create_dir(&blocker));
        let failed = store.add(RaceEvent::new("lost", 0, EventType::Race)).await;
        assert!(matches!(failed, Err(StoreError::WriteFailed { .. })));
        must(std::fs::remove_dir(&blocker));

        let next = must(store.add(RaceEvent::new("next", 0, EventType::Race)).await);
        assert_eq!(next.id, 1);
        assert_eq!(must(store.list().await).len(), 2);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_update_missing_record_is_logged() {
        let temp_dir = must(TempDir::new());
        let store = team_store(&temp_dir);

        let result = store.update(Team { id: 42, ..Default::default() }).await;
        assert!(matches!(result, Err(StoreError::NotFound { kind: "team", id: 42 })));
        assert!(logs_contain("Cannot update missing record"));
    }

    #[tokio::test]
    async fn test_modify_persists_change_and_returns_outcome() {
        let temp_dir = must(TempDir::new());
        let store = team_store(&temp_dir);
        let team = must(store.add(Team::new("Nyoom", ["Ada"])).await);

        let previous = must(
            store
                .modify(team.id, |team| {
                    Ok::<_, StoreError>(std::mem::replace(&mut team.name, "Nyoom GP".to_string()))
                })
                .await,
        );

        assert_eq!(previous, "Nyoom");
        assert_eq!(must(store.get(team.id).await).name, "Nyoom GP");
    }

    #[tokio::test]
    async fn test_modify_error_leaves_file_untouched() {
        let temp_dir = must(TempDir::new());
        let store = team_store(&temp_dir);
        let team = must(store.add(Team::new("Nyoom", ["Ada"])).await);
        let before = must(std::fs::read(store.path()));

        let result: Result<(), StoreError> = store
            .modify(team.id, |team| {
                team.name = "discarded".to_string();
                Err(StoreError::not_found("driver", 9))
            })
            .await;

        assert!(matches!(result, Err(StoreError::NotFound { kind: "driver", id: 9 })));
        assert_eq!(must(std::fs::read(store.path())), before);
    }

    #[tokio::test]
    async fn test_modify_missing_record_skips_change() {
        let temp_dir = must(TempDir::new());
        let store = team_store(&temp_dir);

        let mut called = false;
        let result = store
            .modify(3, |_| {
                called = true;
                Ok::<_, StoreError>(())
            })
            .await;

        assert!(matches!(result, Err(StoreError::NotFound { kind: "team", id: 3 })));
        assert!(!called);
    }

    #[tokio::test]
    async fn test_clones_share_the_lock() {
        let temp_dir = must(TempDir::new());
        let store = team_store(&temp_dir);
        let clone = store.clone();

        let guard = store.lock.write().await;
        assert!(clone.lock.try_read().is_err());
        drop(guard);
        assert!(clone.lock.try_read().is_ok());
    }
}
