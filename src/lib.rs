//! # traviax_store
//!
//! Storage and REST backend for the Traviax social travel app.
//!
//! All data lives in one JSON document of named collections (`users`,
//! `reels`, `places`, `checkins`, ...). [`JsonFileStore`] loads that file
//! lazily, keeps it in memory, and rewrites it in full after every
//! mutation under a single lock. Typed views over the generic records are
//! in [`model`]; the HTTP layer is in [`api`] behind the `http` feature.
//!
//! ## Features
//!
//! - `emitter` (default): [`emitter::EmittingStore`] change notifications
//! - `http`: axum router, handlers and the `traviax-api` binary

extern crate self as traviax_store;

mod config;
mod entity;
mod error;
mod record;
mod store;

pub mod model;

#[cfg(feature = "emitter")]
pub mod emitter;

#[cfg(feature = "http")]
pub mod api;

pub use config::{ConfigError, Settings};
pub use entity::{encode, CollectionsExt, Entity, EntityRepository};
pub use error::StoreError;
pub use record::{
    default_collections, into_record, matches, merge, record_id, Collections, Criteria, Record,
    DEFAULT_COLLECTIONS,
};
pub use store::{DocumentStore, InMemoryDocumentStore, JsonFileStore};

/// Derive macro for [`Entity`].
pub use traviax_store_macros::Entity;
