//! Adapter construction for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use borga::domain::CollectionService;
use borga::domain::ports::{CollectionStore, FixtureGameCatalog, GameCatalog};
use borga::inbound::http::state::HttpState;
use borga::outbound::catalog::AtlasCatalogClient;
use borga::outbound::elastic::ElasticCollectionStore;
use borga::outbound::memory::InMemoryCollectionStore;

use super::config::{CatalogConfig, StoreConfig};
use super::ServerConfig;

fn service_state<S, C>(store: S, catalog: C) -> HttpState
where
    S: CollectionStore + 'static,
    C: GameCatalog + 'static,
{
    HttpState::from_service(CollectionService::new(Arc::new(store), Arc::new(catalog)))
}

fn with_catalog<S>(store: S, catalog: &CatalogConfig) -> std::io::Result<HttpState>
where
    S: CollectionStore + 'static,
{
    match catalog {
        CatalogConfig::Fixture => {
            info!("using the fixture game catalogue");
            Ok(service_state(store, FixtureGameCatalog))
        }
        CatalogConfig::Atlas {
            base_url,
            client_id,
            timeout,
        } => {
            if client_id.is_none() {
                info!("no catalogue client id configured");
            }
            let client = AtlasCatalogClient::new(base_url.clone(), client_id.clone(), *timeout)
                .map_err(|err| std::io::Error::other(format!("catalogue client: {err}")))?;
            Ok(service_state(store, client))
        }
    }
}

/// Wire the configured store and catalogue into handler state.
///
/// # Errors
/// Returns an error when an HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let state = match &config.store {
        StoreConfig::Memory { seeded } => {
            let store = if *seeded {
                InMemoryCollectionStore::seeded()
            } else {
                InMemoryCollectionStore::new()
            };
            info!(seeded, "using the in-memory store");
            with_catalog(store, &config.catalog)?
        }
        StoreConfig::Elastic { base_url, timeout } => {
            let store = ElasticCollectionStore::new(base_url.clone(), *timeout)
                .map_err(|err| std::io::Error::other(format!("elastic client: {err}")))?;
            info!(url = %base_url, "using the elastic store");
            with_catalog(store, &config.catalog)?
        }
    };
    Ok(web::Data::new(state))
}
