//! Domain ports at the hexagonal boundary.
//!
//! Driven ports (`CollectionStore`, `GameCatalog`) are implemented by
//! outbound adapters. Driving ports (`GamesQuery`, `AccountsCommand`,
//! `GroupsCommand`) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_command;
mod collection_store;
mod game_catalog;
mod games_query;
mod groups_command;

pub use accounts_command::AccountsCommand;
#[cfg(test)]
pub use collection_store::MockCollectionStore;
pub use collection_store::{CollectionStore, StoreError};
#[cfg(test)]
pub use game_catalog::MockGameCatalog;
pub use game_catalog::{CatalogError, FixtureGameCatalog, GameCatalog};
pub use games_query::GamesQuery;
pub use groups_command::GroupsCommand;
