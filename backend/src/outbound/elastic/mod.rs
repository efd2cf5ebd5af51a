//! Elasticsearch document-store adapter for the collection store port.

mod dto;
mod store;

pub use store::ElasticCollectionStore;
