//! JsonFileStore - the file-backed document store.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::{persist, query, DocumentStore};
use crate::record::{self, default_collections, Collections, Criteria, Record};
use crate::StoreError;

type State = Option<Collections>;

/// Document store persisted to a single JSON file.
///
/// The file is read once, on first access; afterwards memory is the only
/// source of truth and later edits to the file are never observed.
/// One `RwLock` gates everything: the first load and every
/// mutate-then-persist sequence hold the write side from start to finish,
/// while reads of an already loaded document share the read side.
///
/// Clone-friendly via `Arc`: clones share the same cached document.
#[derive(Clone)]
pub struct JsonFileStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    state: RwLock<State>,
    writes: AtomicU64,
}

impl JsonFileStore {
    /// Point a store at a backing file. Nothing is read until the first call.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                state: RwLock::new(None),
                writes: AtomicU64::new(0),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Whether the document has been loaded into memory.
    pub fn is_loaded(&self) -> bool {
        self.inner
            .state
            .read()
            .map(|state| state.is_some())
            .unwrap_or(false)
    }

    /// Number of completed writes to the backing file by this store.
    pub fn writes(&self) -> u64 {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Run `f` against the loaded document.
    ///
    /// Fast path takes the shared lock. If nothing is loaded yet, the
    /// exclusive lock is taken and the state re-checked before loading, so
    /// racing first callers load exactly once.
    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> Result<T, StoreError> {
        {
            let state = self
                .inner
                .state
                .read()
                .map_err(|_| StoreError::LockPoisoned("read"))?;
            if let Some(data) = state.as_ref() {
                return Ok(f(data));
            }
        }

        let mut state = self.lock()?;
        let data = self.ensure_loaded(&mut *state)?;
        Ok(f(&*data))
    }

    fn lock(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.inner
            .state
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))
    }

    /// Load the document into `state` unless a previous caller already did.
    fn ensure_loaded<'s>(&self, state: &'s mut State) -> Result<&'s mut Collections, StoreError> {
        let data = match state.take() {
            Some(data) => data,
            None => self.load_document()?,
        };
        Ok(state.insert(data))
    }

    fn load_document(&self) -> Result<Collections, StoreError> {
        let path = self.path();
        match persist::read_document(path) {
            Ok(Some(data)) => {
                let records: usize = data.values().map(Vec::len).sum();
                info!(
                    path = %path.display(),
                    collections = data.len(),
                    records,
                    "loaded data file"
                );
                Ok(data)
            }
            Ok(None) => {
                let data = default_collections();
                self.persist(&data)?;
                info!(path = %path.display(), "data file missing, created default collections");
                Ok(data)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load data file");
                Err(err)
            }
        }
    }

    fn persist(&self, data: &Collections) -> Result<(), StoreError> {
        persist::write_document(self.path(), data)?;
        let writes = self.inner.writes.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(path = %self.path().display(), writes, "persisted data file");
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn load_all(&self) -> Result<Collections, StoreError> {
        self.read(Collections::clone)
    }

    fn save_all(&self) -> Result<(), StoreError> {
        let state = self.lock()?;
        match state.as_ref() {
            Some(data) => self.persist(data),
            None => Ok(()),
        }
    }

    fn get_collection(&self, name: &str) -> Result<Vec<Record>, StoreError> {
        self.read(|data| query::collection(data, name))
    }

    fn get_item(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        self.read(|data| query::item(data, collection, id))
    }

    fn add_item(&self, collection: &str, record: Record) -> Result<Record, StoreError> {
        let mut state = self.lock()?;
        let data = self.ensure_loaded(&mut *state)?;

        let created = !data.contains_key(collection);
        data.entry(collection.to_string())
            .or_default()
            .push(record.clone());

        if let Err(err) = self.persist(data) {
            if created {
                data.shift_remove(collection);
            } else if let Some(items) = data.get_mut(collection) {
                items.pop();
            }
            warn!(collection, error = %err, "insert rolled back");
            return Err(err);
        }
        Ok(record)
    }

    fn update_item(
        &self,
        collection: &str,
        id: &str,
        partial: Record,
    ) -> Result<Option<Record>, StoreError> {
        let mut state = self.lock()?;
        let data = self.ensure_loaded(&mut *state)?;

        let Some(items) = data.get_mut(collection) else {
            return Ok(None);
        };
        let Some(index) = record::position(items, id) else {
            return Ok(None);
        };

        let previous = items[index].clone();
        record::merge(&mut items[index], partial);
        let updated = items[index].clone();

        if let Err(err) = self.persist(data) {
            if let Some(items) = data.get_mut(collection) {
                items[index] = previous;
            }
            warn!(collection, id, error = %err, "update rolled back");
            return Err(err);
        }
        Ok(Some(updated))
    }

    fn delete_item(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut state = self.lock()?;
        let data = self.ensure_loaded(&mut *state)?;

        let Some(items) = data.get_mut(collection) else {
            return Ok(false);
        };
        let Some(index) = record::position(items, id) else {
            return Ok(false);
        };
        let removed = items.remove(index);

        if let Err(err) = self.persist(data) {
            if let Some(items) = data.get_mut(collection) {
                items.insert(index, removed);
            }
            warn!(collection, id, error = %err, "delete rolled back");
            return Err(err);
        }
        Ok(true)
    }

    fn filter_items(
        &self,
        collection: &str,
        criteria: &Criteria,
    ) -> Result<Vec<Record>, StoreError> {
        self.read(|data| query::filter(data, collection, criteria))
    }
}
