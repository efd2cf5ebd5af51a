//! OpenAPI document for the collection API.
//!
//! [`ApiDoc`] gathers every handler under `inbound::http` together with the
//! domain types they exchange. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Error, ErrorCode, Game, GameSummary, GroupDetails, GroupInput, GroupSummary, UserProfile,
    UserRegistration,
};
use crate::inbound::http::groups::AddGameRequest;
use crate::inbound::http::users::{LoginRequest, LoginResponse};

/// Name of the bearer-token security scheme.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Registers the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .description(Some("User token returned by POST /api/user or POST /api/login."))
            .build();
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "BORGA API",
        description = "Board game groups backed by a remote game catalogue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::games::popular_games,
        crate::inbound::http::games::search_games,
        crate::inbound::http::games::game_details,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::user_details,
        crate::inbound::http::users::login,
        crate::inbound::http::groups::create_group,
        crate::inbound::http::groups::list_groups,
        crate::inbound::http::groups::group_details,
        crate::inbound::http::groups::update_group,
        crate::inbound::http::groups::delete_group,
        crate::inbound::http::groups::add_game_to_group,
        crate::inbound::http::groups::delete_group_game,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Game,
        GameSummary,
        GroupInput,
        GroupSummary,
        GroupDetails,
        UserRegistration,
        UserProfile,
        LoginRequest,
        LoginResponse,
        AddGameRequest,
    )),
    tags(
        (name = "games", description = "Catalogue lookups"),
        (name = "users", description = "Registration and login"),
        (name = "groups", description = "Per-user game groups"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
