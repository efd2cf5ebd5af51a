//! Resolved server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use borga::settings::{AppSettings, StorageBackend};

/// Storage adapter and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory { seeded: bool },
    Elastic { base_url: Url, timeout: Duration },
}

/// Catalogue adapter and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogConfig {
    Fixture,
    Atlas {
        base_url: Url,
        client_id: Option<String>,
        timeout: Duration,
    },
}

/// Everything the server needs, validated up front.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: StoreConfig,
    pub(crate) catalog: CatalogConfig,
}

impl ServerConfig {
    /// Resolve loaded settings into adapter choices.
    ///
    /// # Errors
    /// Returns the first invalid setting as an [`std::io::Error`].
    pub fn from_settings(settings: &AppSettings) -> std::io::Result<Self> {
        let timeout = settings.catalog_timeout();
        let store = match settings.storage()? {
            StorageBackend::Memory => StoreConfig::Memory {
                seeded: settings.seed_data,
            },
            StorageBackend::Elastic => StoreConfig::Elastic {
                base_url: settings.elastic_url()?,
                timeout,
            },
        };
        let catalog = if settings.offline_catalog {
            CatalogConfig::Fixture
        } else {
            CatalogConfig::Atlas {
                base_url: settings.catalog_url()?,
                client_id: settings.catalog_client_id().map(str::to_owned),
                timeout,
            }
        };
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            store,
            catalog,
        })
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings() -> AppSettings {
        AppSettings {
            bind_addr: None,
            storage: None,
            elastic_url: None,
            catalog_url: None,
            catalog_client_id: None,
            catalog_timeout_secs: None,
            offline_catalog: false,
            seed_data: false,
        }
    }

    #[rstest]
    fn defaults_select_memory_and_the_remote_catalogue() {
        let config = ServerConfig::from_settings(&settings()).expect("valid defaults");
        assert_eq!(config.bind_addr().port(), 1904);
        assert_eq!(config.store, StoreConfig::Memory { seeded: false });
        assert!(matches!(
            config.catalog,
            CatalogConfig::Atlas { client_id: None, .. }
        ));
    }

    #[rstest]
    fn offline_seeded_elastic() {
        let config = ServerConfig::from_settings(&AppSettings {
            storage: Some("elastic".to_owned()),
            offline_catalog: true,
            seed_data: true,
            ..settings()
        })
        .expect("valid settings");
        assert!(matches!(config.store, StoreConfig::Elastic { .. }));
        assert_eq!(config.catalog, CatalogConfig::Fixture);
    }

    #[rstest]
    fn bad_storage_fails() {
        let err = ServerConfig::from_settings(&AppSettings {
            storage: Some("sqlite".to_owned()),
            ..settings()
        })
        .expect_err("unknown backend");
        assert!(err.to_string().contains("sqlite"));
    }
}
