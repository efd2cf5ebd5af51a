//! Outbound adapters implementing the driven ports.
//!
//! - **memory**: process-local collection store, optionally seeded
//! - **elastic**: collection store over the Elasticsearch REST API
//! - **catalog**: Board Game Atlas catalogue client
//!
//! Adapters translate between domain types and wire representations. They
//! contain no business rules.

pub mod catalog;
pub mod elastic;
pub mod memory;
mod response_preview;
