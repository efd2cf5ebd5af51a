//! Bearer token extraction.
//!
//! The token is the second whitespace-separated part of the `Authorization`
//! header. A missing or unreadable header yields no token; validating its
//! shape is left to the service so every operation reports the same error.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

/// Raw access token presented by the caller, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerToken(Option<String>);

impl BearerToken {
    /// Extract the token from an `Authorization` header value.
    ///
    /// # Examples
    /// ```
    /// use borga::inbound::http::auth::BearerToken;
    ///
    /// let token = BearerToken::from_header(Some("Bearer abc"));
    /// assert_eq!(token.as_deref(), Some("abc"));
    /// assert_eq!(BearerToken::from_header(Some("Bearer")).as_deref(), None);
    /// ```
    pub fn from_header(value: Option<&str>) -> Self {
        Self(
            value
                .and_then(|header| header.split_whitespace().nth(1))
                .map(str::to_owned),
        )
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for BearerToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        ready(Ok(Self::from_header(header)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case::bearer(
        Some("Bearer 0f3edb9b-76eb-4fc3-a87b-a40980b9a922"),
        Some("0f3edb9b-76eb-4fc3-a87b-a40980b9a922")
    )]
    #[case::any_scheme(Some("Token abc"), Some("abc"))]
    #[case::extra_spaces(Some("Bearer   abc  trailing"), Some("abc"))]
    #[case::scheme_only(Some("Bearer"), None)]
    #[case::missing(None, None)]
    fn takes_the_second_part(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(BearerToken::from_header(header).as_deref(), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn extracts_from_requests() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc"))
            .to_http_request();
        let token = BearerToken::extract(&req).await.expect("infallible");
        assert_eq!(token.as_deref(), Some("abc"));

        let bare = TestRequest::default().to_http_request();
        let token = BearerToken::extract(&bare).await.expect("infallible");
        assert_eq!(token, BearerToken::default());
    }
}
