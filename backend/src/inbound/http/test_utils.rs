//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::Value;

use crate::domain::CollectionService;
use crate::domain::ports::FixtureGameCatalog;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryCollectionStore;

/// Token of the seeded `diggynovo` user, owner of group 0.
pub const DIGGY_TOKEN: &str = "0f3edb9b-76eb-4fc3-a87b-a40980b9a922";
/// Token of the seeded `jarcs` user, who owns no groups.
pub const JARCS_TOKEN: &str = "fc585a9a-be72-486c-be1a-438f41acbaae";

/// Handler state over a seeded in-memory store and the fixture catalogue.
pub fn fixture_state() -> web::Data<HttpState> {
    let service = CollectionService::new(
        Arc::new(InMemoryCollectionStore::seeded()),
        Arc::new(FixtureGameCatalog),
    );
    web::Data::new(HttpState::from_service(service))
}

/// `Authorization` header carrying `token`.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Status and JSON body of a response; empty bodies read as `null`.
pub async fn read_json(res: ServiceResponse) -> (StatusCode, Value) {
    let status = res.status();
    let bytes = test::read_body(res).await;
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let body = serde_json::from_slice(&bytes).expect("response body is JSON");
    (status, body)
}
