//! InMemoryDocumentStore - document store without a backing file, for tests and demos.

use std::sync::{Arc, RwLock};

use super::{query, DocumentStore};
use crate::record::{self, default_collections, Collections, Criteria, Record};
use crate::StoreError;

/// In-memory document store. Starts with the default empty collections.
///
/// Clone-friendly via `Arc`. `save_all` has nothing to write and always succeeds.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<Collections>>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::with_collections(default_collections())
    }

    /// Seed the store with an existing document.
    pub fn with_collections(collections: Collections) -> Self {
        Self {
            storage: Arc::new(RwLock::new(collections)),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> Result<T, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(f(&*storage))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Collections) -> T) -> Result<T, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        Ok(f(&mut *storage))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load_all(&self) -> Result<Collections, StoreError> {
        self.read(Collections::clone)
    }

    fn save_all(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn get_collection(&self, name: &str) -> Result<Vec<Record>, StoreError> {
        self.read(|data| query::collection(data, name))
    }

    fn get_item(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        self.read(|data| query::item(data, collection, id))
    }

    fn add_item(&self, collection: &str, record: Record) -> Result<Record, StoreError> {
        self.write(|data| {
            data.entry(collection.to_string())
                .or_default()
                .push(record.clone());
            record
        })
    }

    fn update_item(
        &self,
        collection: &str,
        id: &str,
        partial: Record,
    ) -> Result<Option<Record>, StoreError> {
        self.write(|data| {
            let items = data.get_mut(collection)?;
            let index = record::position(items, id)?;
            record::merge(&mut items[index], partial);
            Some(items[index].clone())
        })
    }

    fn delete_item(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        self.write(|data| {
            data.get_mut(collection)
                .and_then(|items| record::position(items, id).map(|index| items.remove(index)))
                .is_some()
        })
    }

    fn filter_items(
        &self,
        collection: &str,
        criteria: &Criteria,
    ) -> Result<Vec<Record>, StoreError> {
        self.read(|data| query::filter(data, collection, criteria))
    }
}
