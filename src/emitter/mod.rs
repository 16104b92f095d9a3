//! Change notifications for document stores.
//!
//! **Requires the `emitter` feature (on by default).**
//!
//! ```ignore
//! use traviax_store::emitter::EmittingStore;
//! use traviax_store::JsonFileStore;
//!
//! let store = EmittingStore::new(JsonFileStore::open("./mock_data/db.json"));
//! store.on("checkins.added", |json: String| println!("new check-in: {}", json))?;
//! ```

mod store;

pub use store::{ChangeKind, EmittingStore};
