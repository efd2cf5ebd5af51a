//! In-memory collection store.
//!
//! The store object is built once at start-up and shared behind an `Arc`.
//! Optional sample data mirrors a small demonstration dataset.

mod seed;
mod store;

pub use store::InMemoryCollectionStore;
