//! Document store - one JSON document of named collections, cached in memory.
//!
//! Every mutating call updates memory and rewrites the whole backing file
//! before returning. Lookups and filters are linear scans.
//!
//! ## Example
//!
//! ```no_run
//! use traviax_store::{DocumentStore, JsonFileStore};
//! use serde_json::json;
//!
//! let store = JsonFileStore::open("./mock_data/db.json");
//! let record = traviax_store::into_record(json!({ "id": "u1", "username": "ada" }))?;
//! store.add_item("users", record)?;
//! let user = store.get_item("users", "u1")?;
//! assert!(user.is_some());
//! # Ok::<(), traviax_store::StoreError>(())
//! ```

mod in_memory;
mod json_file;
mod persist;

use crate::record::{Collections, Criteria, Record};
use crate::StoreError;

pub use in_memory::InMemoryDocumentStore;
pub use json_file::JsonFileStore;

/// Collection-oriented access to a document of records.
///
/// `Ok(None)` from `get_item` / `update_item` and `Ok(false)` from
/// `delete_item` are the not-found signal; errors are reserved for
/// corrupt data, I/O failures and poisoned locks.
pub trait DocumentStore: Send + Sync {
    /// The whole document, loading it first if this is the first access.
    fn load_all(&self) -> Result<Collections, StoreError>;

    /// Rewrite the backing storage with the current document. No-op before the first load.
    fn save_all(&self) -> Result<(), StoreError>;

    /// Records of a collection in stored order. Unknown collections are empty.
    fn get_collection(&self, name: &str) -> Result<Vec<Record>, StoreError>;

    /// First record of the collection whose `id` equals `id`.
    fn get_item(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError>;

    /// Append a record, creating the collection if needed. Ids are not checked for collisions.
    fn add_item(&self, collection: &str, record: Record) -> Result<Record, StoreError>;

    /// Shallow-merge `partial` into the first record matching `id`.
    fn update_item(
        &self,
        collection: &str,
        id: &str,
        partial: Record,
    ) -> Result<Option<Record>, StoreError>;

    /// Remove the first record matching `id`. Returns true if one was removed.
    fn delete_item(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Records having every criteria field with an equal value, in stored order.
    fn filter_items(&self, collection: &str, criteria: &Criteria)
        -> Result<Vec<Record>, StoreError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<S> {
    fn load_all(&self) -> Result<Collections, StoreError> {
        (**self).load_all()
    }

    fn save_all(&self) -> Result<(), StoreError> {
        (**self).save_all()
    }

    fn get_collection(&self, name: &str) -> Result<Vec<Record>, StoreError> {
        (**self).get_collection(name)
    }

    fn get_item(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        (**self).get_item(collection, id)
    }

    fn add_item(&self, collection: &str, record: Record) -> Result<Record, StoreError> {
        (**self).add_item(collection, record)
    }

    fn update_item(
        &self,
        collection: &str,
        id: &str,
        partial: Record,
    ) -> Result<Option<Record>, StoreError> {
        (**self).update_item(collection, id, partial)
    }

    fn delete_item(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        (**self).delete_item(collection, id)
    }

    fn filter_items(
        &self,
        collection: &str,
        criteria: &Criteria,
    ) -> Result<Vec<Record>, StoreError> {
        (**self).filter_items(collection, criteria)
    }
}

/// Read-side projections shared by the store implementations.
pub(crate) mod query {
    use crate::record::{self, Collections, Criteria, Record};

    pub fn collection(data: &Collections, name: &str) -> Vec<Record> {
        data.get(name).cloned().unwrap_or_default()
    }

    pub fn item(data: &Collections, collection: &str, id: &str) -> Option<Record> {
        data.get(collection)?
            .iter()
            .find(|item| record::record_id(item) == Some(id))
            .cloned()
    }

    pub fn filter(data: &Collections, collection: &str, criteria: &Criteria) -> Vec<Record> {
        data.get(collection)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| record::matches(item, criteria))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
