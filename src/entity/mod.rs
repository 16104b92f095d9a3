//! Typed views over generic records.
//!
//! The store itself only deals in [`Record`](crate::Record)s. Code that
//! cares about specific fields declares an `Entity` and goes through an
//! [`EntityRepository`], which converts with serde on the way in and out.
//!
//! ## Example
//!
//! ```ignore
//! use traviax_store::{CollectionsExt, InMemoryDocumentStore};
//! use traviax_store::model::Event;
//!
//! let store = InMemoryDocumentStore::new();
//! let event = store.entities::<Event>().require("evt-1")?;
//! println!("{} / {}", event.attendees, event.max_attendees);
//! ```

mod repository;

use serde::{de::DeserializeOwned, Serialize};

pub use repository::{encode, CollectionsExt, EntityRepository};

/// A typed view of the records in one collection.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection these records live in (e.g. "users", "checkins").
    const COLLECTION: &'static str;

    /// The record's unique identifier.
    fn id(&self) -> &str;
}
