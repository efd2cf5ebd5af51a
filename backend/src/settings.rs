//! Runtime settings loaded via OrthoConfig.
//!
//! Every field can come from a `--flag`, a `BORGA_*` environment variable or
//! a config file. Raw values are kept as loaded and checked by the accessors,
//! so a bad value fails startup with an [`io::Error`] naming the setting.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:1904";
const DEFAULT_ELASTIC_URL: &str = "http://localhost:9200/";
const DEFAULT_CATALOG_URL: &str = "https://api.boardgameatlas.com/api/";
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;

/// Storage adapter selected at wiring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local maps; lost on restart.
    Memory,
    /// Elasticsearch over its REST API.
    Elastic,
}

/// Configuration for the BORGA server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BORGA")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// `memory` or `elastic`.
    pub storage: Option<String>,
    /// Elasticsearch base URL.
    pub elastic_url: Option<String>,
    /// Base URL of the remote game catalogue.
    pub catalog_url: Option<String>,
    /// Client id sent to the catalogue as `client_id`.
    pub catalog_client_id: Option<String>,
    /// Per-request catalogue timeout in seconds.
    pub catalog_timeout_secs: Option<u64>,
    /// Serve games from the built-in fixture catalogue.
    #[ortho_config(default = false)]
    pub offline_catalog: bool,
    /// Preload the in-memory store with sample data.
    #[ortho_config(default = false)]
    pub seed_data: bool,
}

fn invalid(setting: &str, value: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid {setting} {value:?}: {err}"),
    )
}

fn parse_base_url(setting: &str, raw: &str) -> io::Result<Url> {
    let url = Url::parse(raw).map_err(|err| invalid(setting, raw, err))?;
    if url.cannot_be_a_base() {
        return Err(invalid(setting, raw, "not a base URL"));
    }
    Ok(url)
}

impl AppSettings {
    /// Listen address, defaulting to `0.0.0.0:1904`.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| invalid("bind_addr", raw, err))
    }

    /// Selected storage adapter, defaulting to memory.
    pub fn storage(&self) -> io::Result<StorageBackend> {
        match self.storage.as_deref().map(str::trim) {
            None | Some("memory") => Ok(StorageBackend::Memory),
            Some("elastic") => Ok(StorageBackend::Elastic),
            Some(other) => Err(invalid("storage", other, "expected memory or elastic")),
        }
    }

    pub fn elastic_url(&self) -> io::Result<Url> {
        let raw = self.elastic_url.as_deref().unwrap_or(DEFAULT_ELASTIC_URL);
        parse_base_url("elastic_url", raw)
    }

    pub fn catalog_url(&self) -> io::Result<Url> {
        let raw = self.catalog_url.as_deref().unwrap_or(DEFAULT_CATALOG_URL);
        parse_base_url("catalog_url", raw)
    }

    /// Catalogue client id, ignoring blank values.
    pub fn catalog_client_id(&self) -> Option<&str> {
        self.catalog_client_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(
            self.catalog_timeout_secs
                .unwrap_or(DEFAULT_CATALOG_TIMEOUT_SECS),
        )
    }
}
