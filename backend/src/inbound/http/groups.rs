//! Group and group-membership handlers.
//!
//! ```text
//! POST   /api/groups                    {"name":"G","description":"D"}
//! GET    /api/groups
//! GET    /api/groups/{groupId}
//! PUT    /api/groups/{groupId}          {"name":"X"}
//! DELETE /api/groups/{groupId}
//! POST   /api/groups/{groupId}          {"id":"RLlDWHh7hR"}
//! DELETE /api/groups/{groupId}/{gameId}
//! ```
//!
//! Every route needs `Authorization: Bearer <token>`.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, GameSummary, GroupDetails, GroupInput, GroupSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::body::structured_body;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/groups/{groupId}`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AddGameRequest {
    #[schema(example = "RLlDWHh7hR")]
    pub id: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = GroupInput,
    responses(
        (status = 201, description = "Group created", body = GroupSummary),
        (status = 400, description = "Name or description missing", body = Error),
        (status = 401, description = "Missing, malformed or unknown token", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["groups"],
    operation_id = "createGroup"
)]
#[post("/groups")]
pub async fn create_group(
    state: web::Data<HttpState>,
    token: BearerToken,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let input: GroupInput = structured_body(&body);
    let group = state.groups.create_group(token.as_deref(), &input).await?;
    Ok(HttpResponse::Created().json(group))
}

/// All groups of the caller, oldest first.
#[utoipa::path(
    get,
    path = "/api/groups",
    responses(
        (status = 200, description = "Groups", body = [GroupSummary]),
        (status = 401, description = "Missing, malformed or unknown token", body = Error),
        (status = 404, description = "The caller has no groups", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["groups"],
    operation_id = "listGroups"
)]
#[get("/groups")]
pub async fn list_groups(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<Vec<GroupSummary>>> {
    let groups = state.groups.groups(token.as_deref()).await?;
    Ok(web::Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/groups/{groupId}",
    params(("groupId" = u64, Path, description = "Group id within the caller's groups")),
    responses(
        (status = 200, description = "Group with its games", body = GroupDetails),
        (status = 400, description = "Group id is not a non-negative integer", body = Error),
        (status = 401, description = "Missing, malformed or unknown token", body = Error),
        (status = 404, description = "Unknown group", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["groups"],
    operation_id = "groupDetails"
)]
#[get("/groups/{group_id}")]
pub async fn group_details(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<GroupDetails>> {
    let group = state
        .groups
        .group_details(token.as_deref(), Some(path.as_str()))
        .await?;
    Ok(web::Json(group))
}

/// Rename a group or change its description.
#[utoipa::path(
    put,
    path = "/api/groups/{groupId}",
    params(("groupId" = u64, Path, description = "Group id within the caller's groups")),
    request_body = GroupInput,
    responses(
        (status = 200, description = "Updated group", body = GroupSummary),
        (status = 400, description = "Bad group id or empty patch", body = Error),
        (status = 401, description = "Missing, malformed or unknown token", body = Error),
        (status = 404, description = "Unknown group", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["groups"],
    operation_id = "updateGroup"
)]
#[put("/groups/{group_id}")]
pub async fn update_group(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<GroupSummary>> {
    let patch: GroupInput = structured_body(&body);
    let group = state
        .groups
        .update_group(token.as_deref(), Some(path.as_str()), &patch)
        .await?;
    Ok(web::Json(group))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{groupId}",
    params(("groupId" = u64, Path, description = "Group id within the caller's groups")),
    responses(
        (status = 200, description = "Summary of the removed group", body = GroupSummary),
        (status = 400, description = "Group id is not a non-negative integer", body = Error),
        (status = 401, description = "Missing, malformed or unknown token", body = Error),
        (status = 404, description = "Unknown group", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["groups"],
    operation_id = "deleteGroup"
)]
#[delete("/groups/{group_id}")]
pub async fn delete_group(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<GroupSummary>> {
    let group = state
        .groups
        .delete_group(token.as_deref(), Some(path.as_str()))
        .await?;
    Ok(web::Json(group))
}

/// Add a game to a group, fetching it from the catalogue on first use.
#[utoipa::path(
    post,
    path = "/api/groups/{groupId}",
    params(("groupId" = u64, Path, description = "Group id within the caller's groups")),
    request_body = AddGameRequest,
    responses(
        (status = 201, description = "Game in the group", body = GameSummary),
        (status = 400, description = "Bad group id or missing game id", body = Error),
        (status = 401, description = "Missing, malformed or unknown token", body = Error),
        (status = 404, description = "Unknown group or game", body = Error),
        (status = 500, description = "Store or catalogue failure", body = Error)
    ),
    tags = ["groups"],
    operation_id = "addGameToGroup"
)]
#[post("/groups/{group_id}")]
pub async fn add_game_to_group(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let request: AddGameRequest = structured_body(&body);
    let game = state
        .groups
        .add_game_to_group(token.as_deref(), Some(path.as_str()), request.id.as_deref())
        .await?;
    Ok(HttpResponse::Created().json(game))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{groupId}/{gameId}",
    params(
        ("groupId" = u64, Path, description = "Group id within the caller's groups"),
        ("gameId" = String, Path, description = "Member game id")
    ),
    responses(
        (status = 200, description = "Summary of the removed game", body = GameSummary),
        (status = 400, description = "Group id is not a non-negative integer", body = Error),
        (status = 401, description = "Missing, malformed or unknown token", body = Error),
        (status = 404, description = "Unknown group, or game not in the group", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["groups"],
    operation_id = "deleteGroupGame"
)]
#[delete("/groups/{group_id}/{game_id}")]
pub async fn delete_group_game(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<GameSummary>> {
    let (group_id, game_id) = path.into_inner();
    let game = state
        .groups
        .delete_group_game(token.as_deref(), Some(&group_id), Some(&game_id))
        .await?;
    Ok(web::Json(game))
}

#[cfg(test)]
#[path = "groups_tests.rs"]
mod tests;
