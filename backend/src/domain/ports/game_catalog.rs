//! Driven port for the remote board game catalogue.

use async_trait::async_trait;

use crate::domain::{Game, GameId, GameSummary, PageWindow};

use super::define_port_error;

define_port_error! {
    /// Failures reported by catalogue adapters.
    pub enum CatalogError {
        /// The catalogue has no matching game.
        NotFound => "game not found in catalogue" => GameNotFoundInCatalog,
        /// The catalogue answered with an unexpected status or body.
        Upstream { message: String } => "catalogue request failed: {message}" => CatalogServerError,
        /// The catalogue could not be reached.
        Transport { message: String } => "catalogue transport failed: {message}" => CatalogServerError,
    }
}

/// Read-only access to catalogue games.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameCatalog: Send + Sync {
    /// Games ordered by catalogue rank.
    async fn popular_games(&self, window: PageWindow) -> Result<Vec<GameSummary>, CatalogError>;

    /// Games matching `name`; [`CatalogError::NotFound`] when nothing matches.
    async fn search_games(&self, name: &str) -> Result<Vec<GameSummary>, CatalogError>;

    /// Full detail of one game.
    async fn game_by_id(&self, id: &GameId) -> Result<Game, CatalogError>;
}

const FIXTURE_GAMES: [(&str, &str); 12] = [
    ("TAAifFP590", "Root"),
    ("yqR4PtpO8X", "Scythe"),
    ("5H5JS0KLzK", "Wingspan"),
    ("RLlDWHh7hR", "Gloomhaven"),
    ("fDn9rQjH9O", "Terraforming Mars"),
    ("i5Oqu5VZgP", "Azul"),
    ("7NYbgH2Z2I", "Viticulture: Essential Edition"),
    ("6FmFeux5xH", "Pandemic"),
    ("kPDxpJZ8PD", "Spirit Island"),
    ("j8LdPFmePE", "7 Wonders Duel"),
    ("OF145SrX44", "7 Wonders"),
    ("GP7Y2xOUzj", "Codenames"),
];

/// Offline catalogue holding twelve well-known games in rank order.
///
/// Used when the remote catalogue is disabled and throughout the tests.
/// Search matches the exact game name.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGameCatalog;

impl FixtureGameCatalog {
    fn games() -> impl Iterator<Item = Game> {
        FIXTURE_GAMES.iter().filter_map(|(id, name)| {
            let id = GameId::new(*id).ok()?;
            Some(Game {
                url: format!("https://www.boardgameatlas.com/game/{id}"),
                id,
                name: (*name).to_owned(),
                description: String::new(),
                image_url: String::new(),
                mechanics: Vec::new(),
                categories: Vec::new(),
            })
        })
    }
}

#[async_trait]
impl GameCatalog for FixtureGameCatalog {
    async fn popular_games(&self, window: PageWindow) -> Result<Vec<GameSummary>, CatalogError> {
        let skip = usize::try_from(window.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);
        Ok(Self::games()
            .skip(skip)
            .take(limit)
            .map(|game| game.summary())
            .collect())
    }

    async fn search_games(&self, name: &str) -> Result<Vec<GameSummary>, CatalogError> {
        Self::games()
            .find(|game| game.name == name)
            .map(|game| vec![game.summary()])
            .ok_or(CatalogError::NotFound)
    }

    async fn game_by_id(&self, id: &GameId) -> Result<Game, CatalogError> {
        Self::games()
            .find(|game| &game.id == id)
            .ok_or(CatalogError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, ErrorCode};
    use rstest::rstest;

    fn window(skip: i64, limit: i64) -> PageWindow {
        PageWindow::new(skip, limit).expect("window in range")
    }

    #[rstest]
    #[case::first_page(0, 3, &["Root", "Scythe", "Wingspan"])]
    #[case::tail(10, 10, &["7 Wonders", "Codenames"])]
    #[case::empty(0, 0, &[])]
    #[case::past_end(50, 10, &[])]
    #[tokio::test]
    async fn popular_games_slice_by_rank(
        #[case] skip: i64,
        #[case] limit: i64,
        #[case] expected: &[&str],
    ) {
        let games = FixtureGameCatalog
            .popular_games(window(skip, limit))
            .await
            .expect("fixture never fails");
        let names: Vec<_> = games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn search_matches_exact_name() {
        let found = FixtureGameCatalog
            .search_games("Azul")
            .await
            .expect("Azul is in the fixture");
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|g| g.id.as_ref()), Some("i5Oqu5VZgP"));

        let missing = FixtureGameCatalog.search_games("azul").await;
        assert_eq!(missing, Err(CatalogError::NotFound));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_id_maps_to_catalog_miss() {
        let id = GameId::new("UNKNOWN_ID").expect("non-empty id");
        let err: Error = FixtureGameCatalog
            .game_by_id(&id)
            .await
            .expect_err("unknown id")
            .into();
        assert_eq!(err.code(), ErrorCode::GameNotFoundInCatalog);
    }

    #[rstest]
    fn transport_failures_map_to_server_error() {
        let err: Error = CatalogError::transport("timed out").into();
        assert_eq!(err.code(), ErrorCode::CatalogServerError);
    }
}
