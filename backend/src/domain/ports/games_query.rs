//! Driving port for catalogue-backed game lookups.

use async_trait::async_trait;

use crate::domain::{Error, Game, GameSummary};

/// Game queries as exposed to inbound adapters.
///
/// Arguments are passed as received; implementations own their validation.
#[async_trait]
pub trait GamesQuery: Send + Sync {
    /// Ranked games; absent or non-numeric paging values take their defaults.
    async fn popular_games(
        &self,
        skip: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Vec<GameSummary>, Error>;

    async fn search_games(&self, name: Option<&str>) -> Result<Vec<GameSummary>, Error>;

    /// Cached detail, falling back to the catalogue on a cache miss.
    async fn game_details(&self, game_id: Option<&str>) -> Result<Game, Error>;
}
