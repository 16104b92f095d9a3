use std::fmt;
use std::sync::Mutex;

use event_emitter_rs::EventEmitter;
use serde_json::json;

use crate::record::{Collections, Criteria, Record};
use crate::{DocumentStore, StoreError};

/// The kind of mutation an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Updated => "updated",
            ChangeKind::Deleted => "deleted",
        }
    }

    /// Event name for a collection, e.g. `"reels.updated"`.
    pub fn event(&self, collection: &str) -> String {
        format!("{}.{}", collection, self.as_str())
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `DocumentStore` wrapper that emits an event after each successful mutation.
///
/// Payloads are JSON strings: the added or updated record, or `{"id": ...}`
/// for deletions. Failed mutations and misses emit nothing. Listeners run
/// on the emitter's own threads, so delivery is asynchronous.
pub struct EmittingStore<S> {
    inner: S,
    emitter: Mutex<EventEmitter>,
}

impl<S: DocumentStore> EmittingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Access the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Register a listener. Returns the listener id.
    pub fn on<F>(&self, event: &str, listener: F) -> Result<String, StoreError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| StoreError::LockPoisoned("emitter"))?;
        Ok(emitter.on(event, listener))
    }

    /// Remove a listener by the id `on` returned.
    pub fn remove_listener(&self, listener_id: &str) -> Result<bool, StoreError> {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| StoreError::LockPoisoned("emitter"))?;
        Ok(emitter.remove_listener(listener_id).is_some())
    }

    fn emit(&self, kind: ChangeKind, collection: &str, payload: String) -> Result<(), StoreError> {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| StoreError::LockPoisoned("emitter"))?;
        emitter.emit(&kind.event(collection), payload);
        Ok(())
    }
}

impl<S: DocumentStore> DocumentStore for EmittingStore<S> {
    fn load_all(&self) -> Result<Collections, StoreError> {
        self.inner.load_all()
    }

    fn save_all(&self) -> Result<(), StoreError> {
        self.inner.save_all()
    }

    fn get_collection(&self, name: &str) -> Result<Vec<Record>, StoreError> {
        self.inner.get_collection(name)
    }

    fn get_item(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        self.inner.get_item(collection, id)
    }

    fn add_item(&self, collection: &str, record: Record) -> Result<Record, StoreError> {
        let added = self.inner.add_item(collection, record)?;
        self.emit(ChangeKind::Added, collection, serde_json::to_string(&added)?)?;
        Ok(added)
    }

    fn update_item(
        &self,
        collection: &str,
        id: &str,
        partial: Record,
    ) -> Result<Option<Record>, StoreError> {
        let updated = self.inner.update_item(collection, id, partial)?;
        if let Some(record) = &updated {
            self.emit(ChangeKind::Updated, collection, serde_json::to_string(record)?)?;
        }
        Ok(updated)
    }

    fn delete_item(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let deleted = self.inner.delete_item(collection, id)?;
        if deleted {
            self.emit(ChangeKind::Deleted, collection, json!({ "id": id }).to_string())?;
        }
        Ok(deleted)
    }

    fn filter_items(
        &self,
        collection: &str,
        criteria: &Criteria,
    ) -> Result<Vec<Record>, StoreError> {
        self.inner.filter_items(collection, criteria)
    }
}
