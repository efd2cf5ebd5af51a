//! Board Game Atlas catalogue adapter.
//!
//! A thin HTTP implementation of the `GameCatalog` port.

mod atlas_client;
mod dto;

pub use atlas_client::AtlasCatalogClient;
