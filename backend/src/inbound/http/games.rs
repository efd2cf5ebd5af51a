//! Game lookup handlers.
//!
//! ```text
//! GET /api/games/popular?skip=0&limit=10
//! GET /api/games?name=Azul
//! GET /api/games/{gameId}
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, Game, GameSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Paging query for popular games. Values are kept raw; non-numeric values
/// fall back to the defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PopularQuery {
    /// Games to skip, 0 to 50 (default 0).
    pub skip: Option<String>,
    /// Games to return, 0 to 50 (default 10).
    pub limit: Option<String>,
}

/// Name search query.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Exact game name, at most 50 characters.
    pub name: Option<String>,
}

/// Most popular games of the catalogue.
#[utoipa::path(
    get,
    path = "/api/games/popular",
    params(PopularQuery),
    responses(
        (status = 200, description = "Ranked games", body = [GameSummary]),
        (status = 400, description = "Paging out of range", body = Error),
        (status = 500, description = "Catalogue failure", body = Error)
    ),
    tags = ["games"],
    operation_id = "popularGames",
    security([])
)]
#[get("/games/popular")]
pub async fn popular_games(
    state: web::Data<HttpState>,
    query: web::Query<PopularQuery>,
) -> ApiResult<web::Json<Vec<GameSummary>>> {
    let games = state
        .games
        .popular_games(query.skip.as_deref(), query.limit.as_deref())
        .await?;
    Ok(web::Json(games))
}

/// Games whose name matches the query.
#[utoipa::path(
    get,
    path = "/api/games",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching games", body = [GameSummary]),
        (status = 400, description = "Missing or overlong name", body = Error),
        (status = 404, description = "No game matches", body = Error),
        (status = 500, description = "Catalogue failure", body = Error)
    ),
    tags = ["games"],
    operation_id = "searchGames",
    security([])
)]
#[get("/games")]
pub async fn search_games(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<GameSummary>>> {
    let games = state.games.search_games(query.name.as_deref()).await?;
    Ok(web::Json(games))
}

/// Full game record, from the local cache or the catalogue.
#[utoipa::path(
    get,
    path = "/api/games/{gameId}",
    params(("gameId" = String, Path, description = "Catalogue game id")),
    responses(
        (status = 200, description = "Game details", body = Game),
        (status = 404, description = "Unknown game", body = Error),
        (status = 500, description = "Store or catalogue failure", body = Error)
    ),
    tags = ["games"],
    operation_id = "gameDetails",
    security([])
)]
#[get("/games/{game_id}")]
pub async fn game_details(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Game>> {
    let game = state.games.game_details(Some(path.as_str())).await?;
    Ok(web::Json(game))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{fixture_state, read_json};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    async fn get(uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new().app_data(fixture_state()).service(
                web::scope("/api")
                    .service(popular_games)
                    .service(search_games)
                    .service(game_details),
            ),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        read_json(res).await
    }

    #[rstest]
    #[case::defaults("/api/games/popular", 10)]
    #[case::window("/api/games/popular?skip=10&limit=5", 2)]
    #[case::empty("/api/games/popular?limit=0", 0)]
    #[case::non_numeric("/api/games/popular?skip=x&limit=y", 10)]
    #[actix_web::test]
    async fn popular_games_are_paged(#[case] uri: &str, #[case] count: usize) {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(count));
    }

    #[rstest]
    #[case::limit_too_big("/api/games/popular?limit=51")]
    #[case::negative_skip("/api/games/popular?skip=-1")]
    #[actix_web::test]
    async fn paging_out_of_range_is_rejected(#[case] uri: &str) {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_query_parameters");
    }

    #[rstest]
    #[actix_web::test]
    async fn search_finds_exact_names() {
        let (status, body) = get("/api/games?name=Azul").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "i5Oqu5VZgP");
        assert!(body[0].get("imageUrl").is_some());
    }

    #[rstest]
    #[case::missing("/api/games", StatusCode::BAD_REQUEST, "invalid_game_name")]
    #[case::empty("/api/games?name=", StatusCode::BAD_REQUEST, "invalid_game_name")]
    #[case::unknown("/api/games?name=Nope", StatusCode::NOT_FOUND, "game_not_found_in_catalog")]
    #[actix_web::test]
    async fn search_failures(#[case] uri: &str, #[case] status: StatusCode, #[case] code: &str) {
        let (actual, body) = get(uri).await;
        assert_eq!(actual, status);
        assert_eq!(body["code"], code);
    }

    #[rstest]
    #[actix_web::test]
    async fn details_come_from_the_cache_first() {
        let (status, body) = get("/api/games/RLlDWHh7hR").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Gloomhaven");
        assert_eq!(body["categories"], serde_json::json!(["Adventure", "Fantasy"]));
    }

    #[rstest]
    #[actix_web::test]
    async fn details_fall_back_to_the_catalogue() {
        let (status, body) = get("/api/games/TAAifFP590").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Root");

        let (status, body) = get("/api/games/UNKNOWN").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "game_not_found_in_catalog");
    }
}
