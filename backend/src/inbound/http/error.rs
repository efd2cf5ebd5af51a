//! HTTP adapter mapping for domain errors.
//!
//! The domain error stays HTTP-agnostic; this module decides the status code
//! for each [`ErrorCode`] and writes the JSON body plus `trace-id` header.

use actix_web::dev::ServiceResponse;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message sent for server failures that carry no domain error.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error. Please contact the administrator.";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidGameName
        | ErrorCode::InvalidQueryParameters
        | ErrorCode::InvalidGameInput
        | ErrorCode::InvalidGameId
        | ErrorCode::InvalidUserInput
        | ErrorCode::InvalidGroupInput
        | ErrorCode::InvalidGroupId
        | ErrorCode::UsernameNotUnique
        | ErrorCode::PasswordMismatch => StatusCode::BAD_REQUEST,
        ErrorCode::TokenNotFound
        | ErrorCode::InvalidCredentials
        | ErrorCode::InvalidAccessToken => StatusCode::UNAUTHORIZED,
        ErrorCode::GameNotFound
        | ErrorCode::GameNotFoundInCatalog
        | ErrorCode::GroupNotFound
        | ErrorCode::UserHasNoGroups => StatusCode::NOT_FOUND,
        ErrorCode::StoreOperationFailed | ErrorCode::CatalogServerError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self)
    }
}

/// Server-error handler for `actix_web::middleware::ErrorHandlers`.
///
/// Responses produced from a domain [`Error`] pass through untouched; any
/// other 5xx is replaced by a 500 with [`UNEXPECTED_ERROR_MESSAGE`].
///
/// # Errors
///
/// Never fails; the signature is dictated by `ErrorHandlers`.
pub fn render_unexpected<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let from_domain = res
        .response()
        .error()
        .and_then(|err| err.as_error::<Error>())
        .is_some();
    if from_domain {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    error!(
        status = res.status().as_u16(),
        path = res.request().path(),
        "unexpected server error"
    );
    let (req, _) = res.into_parts();
    let response =
        HttpResponse::InternalServerError().json(json!({ "message": UNEXPECTED_ERROR_MESSAGE }));
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
