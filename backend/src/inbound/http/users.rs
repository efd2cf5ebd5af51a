//! Registration, profile and login handlers.
//!
//! ```text
//! POST /api/user  {"username":"a","password":"p","confirmPassword":"p","name":"A","club":"C"}
//! GET  /api/user  (Authorization: Bearer <token>)
//! POST /api/login {"username":"jarcs","password":"jslb"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, LoginCredentials, UserProfile, UserRegistration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::body::structured_body;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "jarcs")]
    pub username: Option<String>,
    #[schema(example = "jslb")]
    pub password: Option<String>,
}

impl From<LoginRequest> for LoginCredentials {
    fn from(value: LoginRequest) -> Self {
        Self::new(
            value.username.unwrap_or_default(),
            value.password.unwrap_or_default(),
        )
    }
}

/// Token issued on a successful login.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    #[schema(example = "fc585a9a-be72-486c-be1a-438f41acbaae")]
    pub token: String,
}

/// Register a user and return the profile with its new token.
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = UserRegistration,
    responses(
        (status = 201, description = "User created", body = UserProfile),
        (
            status = 400,
            description = "Incomplete payload, password mismatch or username taken",
            body = Error
        ),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let registration: UserRegistration = structured_body(&body);
    let profile = state.accounts.create_user(&registration).await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Profile of the token's owner.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 401, description = "Missing, malformed or unknown token", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "userDetails"
)]
#[get("/user")]
pub async fn user_details(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<UserProfile>> {
    let profile = state.accounts.user_details(token.as_deref()).await?;
    Ok(web::Json(profile))
}

/// Exchange a username and password for the user's token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<LoginResponse>> {
    let request: LoginRequest = structured_body(&body);
    let token = state
        .accounts
        .validate_credentials(&LoginCredentials::from(request))
        .await?;
    Ok(web::Json(LoginResponse {
        token: token.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{DIGGY_TOKEN, bearer, fixture_state, read_json};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    macro_rules! users_app {
        () => {
            test::init_service(
                App::new().app_data(fixture_state()).service(
                    web::scope("/api")
                        .service(create_user)
                        .service(user_details)
                        .service(login),
                ),
            )
            .await
        };
    }

    fn registration(username: &str, confirm: &str) -> Value {
        json!({
            "username": username,
            "password": "p",
            "confirmPassword": confirm,
            "name": "A",
            "club": "C",
        })
    }

    #[rstest]
    #[actix_web::test]
    async fn registering_then_logging_in() {
        let app = users_app!();
        let req = test::TestRequest::post()
            .uri("/api/user")
            .set_json(registration("a", "p"))
            .to_request();
        let (status, profile) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(profile["username"], "a");
        let token = profile["token"].as_str().expect("token issued").to_owned();

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "username": "a", "password": "p" }))
            .to_request();
        let (status, body) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token"], token.as_str());

        let req = test::TestRequest::post()
            .uri("/api/user")
            .set_json(registration("a", "p"))
            .to_request();
        let (status, body) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "username_not_unique");
    }

    #[rstest]
    #[case::mismatch(registration("b", "q"), "password_mismatch")]
    #[case::missing_club(
        json!({ "username": "b", "password": "p", "confirmPassword": "p", "name": "B" }),
        "invalid_user_input"
    )]
    #[case::not_an_object(json!("b"), "invalid_user_input")]
    #[case::positional_array(json!(["b", "p", "p", "B", "C"]), "invalid_user_input")]
    #[case::null(Value::Null, "invalid_user_input")]
    #[actix_web::test]
    async fn invalid_registrations(#[case] body: Value, #[case] code: &str) {
        let app = users_app!();
        let req = test::TestRequest::post()
            .uri("/api/user")
            .set_json(body)
            .to_request();
        let (status, body) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], code);
    }

    #[rstest]
    #[actix_web::test]
    async fn profile_requires_a_known_token() {
        let app = users_app!();
        let req = test::TestRequest::get()
            .uri("/api/user")
            .insert_header(bearer(DIGGY_TOKEN))
            .to_request();
        let (status, body) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["club"], "SL Benfica");

        let req = test::TestRequest::get().uri("/api/user").to_request();
        let (status, body) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "invalid_access_token");

        let req = test::TestRequest::get()
            .uri("/api/user")
            .insert_header(bearer("00000000-0000-4000-8000-000000000000"))
            .to_request();
        let (status, body) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "token_not_found");
    }

    #[rstest]
    #[case::wrong_password(json!({ "username": "jarcs", "password": "nope" }))]
    #[case::missing_fields(json!({}))]
    #[case::not_an_object(json!(7))]
    #[actix_web::test]
    async fn bad_logins_are_unauthorised(#[case] body: Value) {
        let app = users_app!();
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(body)
            .to_request();
        let (status, body) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "invalid_credentials");
    }
}
