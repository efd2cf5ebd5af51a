//! Reqwest-backed Board Game Atlas catalogue adapter.
//!
//! The adapter owns transport details only: URL building, timeout and HTTP
//! error mapping, and JSON decoding into domain games.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::try_join;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::dto::{CategoriesResponseDto, MechanicsResponseDto, SearchResponseDto, tag_names};
use crate::domain::ports::{CatalogError, GameCatalog};
use crate::domain::{Game, GameId, GameSummary, PageWindow};
use crate::outbound::response_preview::body_preview;

/// Games fetched per name search.
const SEARCH_PAGE_SIZE: u32 = 50;

/// Catalogue adapter issuing GET requests against the Atlas REST API.
pub struct AtlasCatalogClient {
    client: Client,
    base_url: Url,
    client_id: Option<String>,
}

impl AtlasCatalogClient {
    /// Build a client with an explicit request timeout.
    ///
    /// `base_url` should end with a slash so relative paths resolve below it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        client_id: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            client_id: client_id.filter(|id| !id.trim().is_empty()),
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, CatalogError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| {
                CatalogError::upstream(format!("invalid catalogue path {path}: {err}"))
            })?;
        if !query.is_empty() || self.client_id.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if let Some(client_id) = &self.client_id {
                pairs.append_pair("client_id", client_id);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode(body.as_ref())
    }

    async fn search(&self, query: &[(&str, String)]) -> Result<SearchResponseDto, CatalogError> {
        let url = self.endpoint("search", query)?;
        self.get_json(url).await
    }
}

#[async_trait]
impl GameCatalog for AtlasCatalogClient {
    async fn popular_games(&self, window: PageWindow) -> Result<Vec<GameSummary>, CatalogError> {
        if window.limit() == 0 {
            return Ok(Vec::new());
        }
        let response = self
            .search(&[
                ("order_by", "rank".to_owned()),
                ("skip", window.skip().to_string()),
                ("limit", window.limit().to_string()),
            ])
            .await?;
        Ok(response.into_summaries())
    }

    async fn search_games(&self, name: &str) -> Result<Vec<GameSummary>, CatalogError> {
        let games = self
            .search(&[
                ("name", name.to_owned()),
                ("skip", "0".to_owned()),
                ("limit", SEARCH_PAGE_SIZE.to_string()),
            ])
            .await?
            .into_summaries();
        if games.is_empty() {
            return Err(CatalogError::NotFound);
        }
        Ok(games)
    }

    async fn game_by_id(&self, id: &GameId) -> Result<Game, CatalogError> {
        let response = self.search(&[("ids", id.to_string())]).await?;
        let Some(dto) = response.games.into_iter().next() else {
            return Err(CatalogError::NotFound);
        };

        let mechanics_url = self.endpoint("game/mechanics", &[])?;
        let categories_url = self.endpoint("game/categories", &[])?;
        let (mechanics, categories) = try_join(
            self.get_json::<MechanicsResponseDto>(mechanics_url),
            self.get_json::<CategoriesResponseDto>(categories_url),
        )
        .await?;

        dto.into_game(
            &tag_names(mechanics.mechanics),
            &tag_names(categories.categories),
        )
        .ok_or(CatalogError::NotFound)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, CatalogError> {
    serde_json::from_slice(body)
        .map_err(|error| CatalogError::upstream(format!("invalid catalogue JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> CatalogError {
    warn!(error = %error, timeout = error.is_timeout(), "catalogue unreachable");
    CatalogError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CatalogError {
    if status == StatusCode::NOT_FOUND {
        return CatalogError::NotFound;
    }

    let preview = body_preview(body);
    warn!(status = status.as_u16(), body = %preview, "catalogue request failed");
    if preview.is_empty() {
        CatalogError::upstream(format!("status {}", status.as_u16()))
    } else {
        CatalogError::upstream(format!("status {}: {preview}", status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    //! Non-network coverage for URL building and response mapping.

    use super::*;
    use crate::outbound::catalog::dto::GameDto;
    use rstest::{fixture, rstest};

    #[fixture]
    fn client() -> AtlasCatalogClient {
        let base = Url::parse("https://api.boardgameatlas.com/api/").expect("static URL");
        AtlasCatalogClient::new(base, Some("abc123".to_owned()), Duration::from_secs(1))
            .expect("client builds")
    }

    #[rstest]
    fn endpoint_appends_query_and_client_id(client: AtlasCatalogClient) {
        let url = client
            .endpoint("search", &[("name", "7 Wonders Duel".to_owned())])
            .expect("endpoint builds");
        assert_eq!(
            url.as_str(),
            "https://api.boardgameatlas.com/api/search?name=7+Wonders+Duel&client_id=abc123"
        );
    }

    #[rstest]
    fn blank_client_id_is_omitted() {
        let base = Url::parse("https://api.boardgameatlas.com/api/").expect("static URL");
        let client = AtlasCatalogClient::new(base, Some("  ".to_owned()), Duration::from_secs(1))
            .expect("client builds");
        let url = client.endpoint("game/mechanics", &[]).expect("endpoint");
        assert_eq!(url.as_str(), "https://api.boardgameatlas.com/api/game/mechanics");
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, CatalogError::NotFound)]
    #[case::unauthorised(
        StatusCode::UNAUTHORIZED,
        CatalogError::upstream("status 401: {\"error\":\"bad client_id\"}")
    )]
    #[case::server(
        StatusCode::BAD_GATEWAY,
        CatalogError::upstream("status 502: {\"error\":\"bad client_id\"}")
    )]
    fn maps_statuses(#[case] status: StatusCode, #[case] expected: CatalogError) {
        assert_eq!(
            map_status_error(status, br#"{"error":"bad client_id"}"#),
            expected
        );
    }

    #[rstest]
    fn decodes_search_results_into_summaries() {
        let body = br#"{
            "games": [
                { "id": "TAAifFP590", "name": "Root", "image_url": "https://img.test/root.jpg" },
                { "id": "", "name": "Broken" }
            ],
            "count": 2
        }"#;
        let decoded: SearchResponseDto = decode(body).expect("JSON decodes");
        let summaries = decoded.into_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(
            summaries.first().map(|g| g.image_url.as_str()),
            Some("https://img.test/root.jpg")
        );
    }

    #[rstest]
    fn resolves_tag_names_and_drops_unknown_ids() {
        let game: GameDto = decode(
            br#"{
                "id": "RLlDWHh7hR",
                "name": "Gloomhaven",
                "mechanics": [{ "id": "m1" }, { "id": "zz" }],
                "categories": [{ "id": "c1" }]
            }"#,
        )
        .expect("JSON decodes");
        let mechanics: MechanicsResponseDto =
            decode(br#"{ "mechanics": [{ "id": "m1", "name": "Legacy" }] }"#).expect("decodes");
        let categories: CategoriesResponseDto =
            decode(br#"{ "categories": [{ "id": "c1", "name": "Fantasy" }] }"#).expect("decodes");

        let game = game
            .into_game(
                &tag_names(mechanics.mechanics),
                &tag_names(categories.categories),
            )
            .expect("valid id");
        assert_eq!(game.mechanics, ["Legacy"]);
        assert_eq!(game.categories, ["Fantasy"]);
    }

    #[rstest]
    fn undecodable_bodies_are_upstream_errors() {
        let result = decode::<SearchResponseDto>(b"<html>busy</html>");
        assert!(matches!(result, Err(CatalogError::Upstream { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn zero_limit_skips_the_request(client: AtlasCatalogClient) {
        let window = PageWindow::new(0, 0).expect("window in range");
        let games = client
            .popular_games(window)
            .await
            .expect("no request is made");
        assert!(games.is_empty());
    }
}
