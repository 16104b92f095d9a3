//! EntityRepository - typed accessor for one collection.

use std::marker::PhantomData;

use super::Entity;
use crate::record::{into_record, Criteria, Record};
use crate::{DocumentStore, StoreError};

/// Typed repository wrapper for the records of a specific entity type.
///
/// Records that do not deserialize into `E` surface as `StoreError::Serde`.
pub struct EntityRepository<'a, S: ?Sized, E> {
    store: &'a S,
    _marker: PhantomData<E>,
}

impl<'a, S: DocumentStore + ?Sized, E: Entity> EntityRepository<'a, S, E> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Every record of the collection, in stored order.
    pub fn all(&self) -> Result<Vec<E>, StoreError> {
        decode_all(self.store.get_collection(E::COLLECTION)?)
    }

    /// Get an entity by id.
    pub fn get(&self, id: &str) -> Result<Option<E>, StoreError> {
        self.store
            .get_item(E::COLLECTION, id)?
            .map(decode::<E>)
            .transpose()
    }

    /// Get an entity by id, turning a miss into `StoreError::NotFound`.
    pub fn require(&self, id: &str) -> Result<E, StoreError> {
        self.get(id)?
            .ok_or_else(|| StoreError::not_found(E::COLLECTION, id))
    }

    /// Append a new entity. The id is not checked for collisions.
    pub fn insert(&self, entity: &E) -> Result<E, StoreError> {
        let record = encode(entity)?;
        decode(self.store.add_item(E::COLLECTION, record)?)
    }

    /// Shallow-merge `partial` into the stored record and return the result.
    pub fn update(&self, id: &str, partial: Record) -> Result<Option<E>, StoreError> {
        self.store
            .update_item(E::COLLECTION, id, partial)?
            .map(decode::<E>)
            .transpose()
    }

    /// Delete by id. Returns true if a record was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete_item(E::COLLECTION, id)
    }

    /// Entities whose records match every criteria field exactly.
    pub fn filter(&self, criteria: &Criteria) -> Result<Vec<E>, StoreError> {
        decode_all(self.store.filter_items(E::COLLECTION, criteria)?)
    }

    /// Entities matching an arbitrary predicate.
    pub fn find(&self, predicate: &dyn Fn(&E) -> bool) -> Result<Vec<E>, StoreError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|entity| predicate(entity))
            .collect())
    }
}

/// Serialize an entity into the generic record shape.
pub fn encode<E: Entity>(entity: &E) -> Result<Record, StoreError> {
    into_record(serde_json::to_value(entity)?)
}

fn decode<E: Entity>(record: Record) -> Result<E, StoreError> {
    Ok(serde_json::from_value(serde_json::Value::Object(record))?)
}

fn decode_all<E: Entity>(records: Vec<Record>) -> Result<Vec<E>, StoreError> {
    records.into_iter().map(decode).collect()
}

/// Extension trait for typed entity access on any `DocumentStore`.
pub trait CollectionsExt: DocumentStore {
    /// Get a typed repository for entity type `E`.
    fn entities<E: Entity>(&self) -> EntityRepository<'_, Self, E> {
        EntityRepository::new(self)
    }
}

impl<S: DocumentStore + ?Sized> CollectionsExt for S {}
