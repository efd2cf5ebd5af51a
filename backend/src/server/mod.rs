//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::ErrorHandlers;
use actix_web::{App, HttpServer, web};

use borga::Trace;
#[cfg(debug_assertions)]
use borga::doc::ApiDoc;
use borga::inbound::http::error::render_unexpected;
use borga::inbound::http::games::{game_details, popular_games, search_games};
use borga::inbound::http::groups::{
    add_game_to_group, create_group, delete_group, delete_group_game, group_details, list_groups,
    update_group,
};
use borga::inbound::http::health::{HealthState, live, ready};
use borga::inbound::http::state::HttpState;
use borga::inbound::http::users::{create_user, login, user_details};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // `/games/popular` must precede `/games/{game_id}`.
    let api = web::scope("/api")
        .service(popular_games)
        .service(search_games)
        .service(game_details)
        .service(create_user)
        .service(user_details)
        .service(login)
        .service(create_group)
        .service(list_groups)
        .service(group_details)
        .service(update_group)
        .service(delete_group)
        .service(add_game_to_group)
        .service(delete_group_game);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(ErrorHandlers::new().default_handler_server(render_unexpected))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server and mark it ready once bound.
///
/// # Errors
/// Propagates adapter construction failures and socket binding errors.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
