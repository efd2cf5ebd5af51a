//! Tests for the collection service.
//!
//! Mocks without expectations panic when called, which is how these tests
//! prove that rejected input never reaches a port.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{FixtureGameCatalog, MockCollectionStore, MockGameCatalog};
use crate::domain::{GroupPatch, NewGroup};

const TOKEN: &str = "0f3edb9b-76eb-4fc3-a87b-a40980b9a922";

type MockService = CollectionService<MockCollectionStore, MockGameCatalog>;

fn service(store: MockCollectionStore, catalog: MockGameCatalog) -> MockService {
    CollectionService::new(Arc::new(store), Arc::new(catalog))
}

fn token() -> UserToken {
    UserToken::new(TOKEN).expect("fixture token is well formed")
}

fn game(id: &str, name: &str) -> Game {
    Game {
        id: GameId::new(id).expect("non-empty id"),
        name: name.to_owned(),
        description: String::new(),
        url: String::new(),
        image_url: format!("https://img.test/{id}.jpg"),
        mechanics: Vec::new(),
        categories: Vec::new(),
    }
}

fn summary(id: u64, name: &str, game_count: usize) -> GroupSummary {
    GroupSummary {
        id: GroupId::new(id),
        name: name.to_owned(),
        description: "D".to_owned(),
        game_count,
    }
}

#[fixture]
fn idle() -> MockService {
    service(MockCollectionStore::new(), MockGameCatalog::new())
}

#[rstest]
#[case::missing(None)]
#[case::empty(Some(""))]
#[case::malformed(Some("not-a-token"))]
#[tokio::test]
async fn malformed_tokens_never_reach_the_store(idle: MockService, #[case] raw: Option<&str>) {
    let input = GroupInput {
        name: Some("G".to_owned()),
        description: Some("D".to_owned()),
    };

    let errors = [
        idle.groups(raw).await.expect_err("groups"),
        idle.create_group(raw, &input).await.expect_err("create"),
        idle.group_details(raw, Some("0")).await.expect_err("details"),
        idle.delete_group(raw, Some("0")).await.expect_err("delete"),
        idle.update_group(raw, Some("0"), &input).await.expect_err("update"),
        idle.add_game_to_group(raw, Some("0"), Some("X"))
            .await
            .expect_err("add"),
        idle.delete_group_game(raw, Some("0"), Some("X"))
            .await
            .expect_err("remove"),
        idle.user_details(raw).await.expect_err("user"),
    ];

    for err in errors {
        assert_eq!(err.code(), ErrorCode::InvalidAccessToken);
    }
}

#[rstest]
#[tokio::test]
async fn token_check_precedes_group_id_and_payload(idle: MockService) {
    let err = idle
        .update_group(Some("bad"), Some("-3"), &GroupInput::default())
        .await
        .expect_err("token first");
    assert_eq!(err.code(), ErrorCode::InvalidAccessToken);
}

#[rstest]
#[case::negative(Some("-1"))]
#[case::word(Some("abc"))]
#[case::missing(None)]
#[tokio::test]
async fn group_id_is_checked_before_payload(idle: MockService, #[case] group_id: Option<&str>) {
    let err = idle
        .update_group(Some(TOKEN), group_id, &GroupInput::default())
        .await
        .expect_err("group id second");
    assert_eq!(err.code(), ErrorCode::InvalidGroupId);
}

#[rstest]
#[tokio::test]
async fn update_without_fields_is_invalid_group_input(idle: MockService) {
    let patch = GroupInput {
        name: Some(String::new()),
        description: None,
    };
    let err = idle
        .update_group(Some(TOKEN), Some("0"), &patch)
        .await
        .expect_err("empty patch");
    assert_eq!(err.code(), ErrorCode::InvalidGroupInput);
}

#[rstest]
#[tokio::test]
async fn update_forwards_only_present_fields() {
    let mut store = MockCollectionStore::new();
    store
        .expect_update_group()
        .withf(|token, id, patch| {
            token.as_ref() == TOKEN
                && id.get() == 4
                && *patch
                    == GroupPatch {
                        name: Some("X".to_owned()),
                        description: None,
                    }
        })
        .times(1)
        .return_once(|_, _, _| Ok(summary(4, "X", 0)));
    let svc = service(store, MockGameCatalog::new());

    let patch = GroupInput {
        name: Some("X".to_owned()),
        description: None,
    };
    let updated = svc
        .update_group(Some(TOKEN), Some("4"), &patch)
        .await
        .expect("update succeeds");
    assert_eq!(updated.name, "X");
}

#[rstest]
#[tokio::test]
async fn uppercase_tokens_reach_the_store_lowercased() {
    let mut store = MockCollectionStore::new();
    store
        .expect_create_group()
        .withf(|token, group| {
            token.as_ref() == TOKEN
                && *group
                    == NewGroup {
                        name: "G".to_owned(),
                        description: "D".to_owned(),
                    }
        })
        .times(1)
        .return_once(|_, _| Ok(summary(0, "G", 0)));
    let svc = service(store, MockGameCatalog::new());

    let input = GroupInput {
        name: Some("G".to_owned()),
        description: Some("D".to_owned()),
    };
    let created = svc
        .create_group(Some(&TOKEN.to_uppercase()), &input)
        .await
        .expect("create succeeds");
    assert_eq!(created.id.get(), 0);
}

#[rstest]
#[case::no_name(None, Some("D"))]
#[case::no_description(Some("G"), None)]
#[case::blank_name(Some(""), Some("D"))]
#[tokio::test]
async fn create_group_requires_name_and_description(
    idle: MockService,
    #[case] name: Option<&str>,
    #[case] description: Option<&str>,
) {
    let input = GroupInput {
        name: name.map(str::to_owned),
        description: description.map(str::to_owned),
    };
    let err = idle
        .create_group(Some(TOKEN), &input)
        .await
        .expect_err("incomplete group");
    assert_eq!(err.code(), ErrorCode::InvalidGroupInput);
}

#[rstest]
#[tokio::test]
async fn store_failures_propagate_unchanged() {
    let mut store = MockCollectionStore::new();
    store
        .expect_groups()
        .times(1)
        .return_once(|_| Err(StoreError::GroupNotFound));
    let svc = service(store, MockGameCatalog::new());

    let err = svc.groups(Some(TOKEN)).await.expect_err("no groups");
    assert_eq!(err.code(), ErrorCode::GroupNotFound);
}

#[rstest]
#[tokio::test]
async fn add_game_uses_cached_record_without_catalogue() {
    let mut store = MockCollectionStore::new();
    let mut seq = mockall::Sequence::new();
    store
        .expect_verify_token_and_group()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(()));
    store
        .expect_exists_game()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(game("RLlDWHh7hR", "Gloomhaven")));
    store
        .expect_add_game_to_group()
        .withf(|_, id, game| id.get() == 0 && game.name == "Gloomhaven")
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _, game| Ok(game.summary()));
    let svc = service(store, MockGameCatalog::new());

    let added = svc
        .add_game_to_group(Some(TOKEN), Some("0"), Some("RLlDWHh7hR"))
        .await
        .expect("add succeeds");
    assert_eq!(added.id.as_ref(), "RLlDWHh7hR");
}

#[rstest]
#[tokio::test]
async fn add_game_fetches_catalogue_on_cache_miss() {
    let mut store = MockCollectionStore::new();
    store
        .expect_verify_token_and_group()
        .return_once(|_, _| Ok(()));
    store
        .expect_exists_game()
        .return_once(|_| Err(StoreError::GameNotFound));
    store
        .expect_add_game_to_group()
        .withf(|_, _, game| game.name == "Azul")
        .times(1)
        .return_once(|_, _, game| Ok(game.summary()));
    let mut catalog = MockGameCatalog::new();
    catalog
        .expect_game_by_id()
        .withf(|id| id.as_ref() == "i5Oqu5VZgP")
        .times(1)
        .return_once(|_| Ok(game("i5Oqu5VZgP", "Azul")));
    let svc = service(store, catalog);

    let added = svc
        .add_game_to_group(Some(TOKEN), Some("2"), Some("i5Oqu5VZgP"))
        .await
        .expect("add succeeds");
    assert_eq!(added.name, "Azul");
}

#[rstest]
#[tokio::test]
async fn add_game_unknown_everywhere_is_catalog_miss() {
    let mut store = MockCollectionStore::new();
    store
        .expect_verify_token_and_group()
        .return_once(|_, _| Ok(()));
    store
        .expect_exists_game()
        .return_once(|_| Err(StoreError::GameNotFound));
    store.expect_add_game_to_group().never();
    let svc = CollectionService::new(Arc::new(store), Arc::new(FixtureGameCatalog));

    let err = svc
        .add_game_to_group(Some(TOKEN), Some("0"), Some("UNKNOWN_ID"))
        .await
        .expect_err("unknown game");
    assert_eq!(err.code(), ErrorCode::GameNotFoundInCatalog);
}

#[rstest]
#[tokio::test]
async fn add_game_stops_when_group_is_missing() {
    let mut store = MockCollectionStore::new();
    store
        .expect_verify_token_and_group()
        .return_once(|_, _| Err(StoreError::GroupNotFound));
    store.expect_exists_game().never();
    let svc = service(store, MockGameCatalog::new());

    let err = svc
        .add_game_to_group(Some(TOKEN), Some("9"), Some("RLlDWHh7hR"))
        .await
        .expect_err("missing group");
    assert_eq!(err.code(), ErrorCode::GroupNotFound);
}

#[rstest]
#[case::missing(None)]
#[case::empty(Some(""))]
#[tokio::test]
async fn add_game_requires_game_id(idle: MockService, #[case] game_id: Option<&str>) {
    let err = idle
        .add_game_to_group(Some(TOKEN), Some("0"), game_id)
        .await
        .expect_err("no game id");
    assert_eq!(err.code(), ErrorCode::InvalidGameInput);
}

#[rstest]
#[tokio::test]
async fn delete_group_game_requires_game_id(idle: MockService) {
    let err = idle
        .delete_group_game(Some(TOKEN), Some("0"), None)
        .await
        .expect_err("no game id");
    assert_eq!(err.code(), ErrorCode::InvalidGameId);
}

#[rstest]
#[tokio::test]
async fn game_details_falls_back_to_catalogue() {
    let mut store = MockCollectionStore::new();
    store
        .expect_game_details()
        .return_once(|_| Err(StoreError::GameNotFound));
    let svc = CollectionService::new(Arc::new(store), Arc::new(FixtureGameCatalog));

    let found = svc
        .game_details(Some("GP7Y2xOUzj"))
        .await
        .expect("catalogue has Codenames");
    assert_eq!(found.name, "Codenames");
}

#[rstest]
#[tokio::test]
async fn game_details_does_not_mask_store_failures() {
    let mut store = MockCollectionStore::new();
    store
        .expect_game_details()
        .return_once(|_| Err(StoreError::backend("timeout")));
    let mut catalog = MockGameCatalog::new();
    catalog.expect_game_by_id().never();
    let svc = service(store, catalog);

    let err = svc
        .game_details(Some("GP7Y2xOUzj"))
        .await
        .expect_err("backend down");
    assert_eq!(err.code(), ErrorCode::StoreOperationFailed);
}

#[rstest]
#[tokio::test]
async fn game_details_requires_an_id(idle: MockService) {
    let err = idle.game_details(Some("")).await.expect_err("empty id");
    assert_eq!(err.code(), ErrorCode::InvalidGameId);
}

#[rstest]
#[case::empty(Some(String::new()))]
#[case::missing(None)]
#[case::too_long(Some("x".repeat(51)))]
#[tokio::test]
async fn search_rejects_invalid_names(idle: MockService, #[case] name: Option<String>) {
    let err = idle
        .search_games(name.as_deref())
        .await
        .expect_err("invalid name");
    assert_eq!(err.code(), ErrorCode::InvalidGameName);
}

#[rstest]
#[tokio::test]
async fn search_accepts_fifty_characters() {
    let name = "y".repeat(50);
    let mut catalog = MockGameCatalog::new();
    catalog
        .expect_search_games()
        .withf(|name: &str| name.len() == 50)
        .times(1)
        .return_once(|_| Err(CatalogError::NotFound));
    let svc = service(MockCollectionStore::new(), catalog);

    let err = svc
        .search_games(Some(&name))
        .await
        .expect_err("catalogue has no such game");
    assert_eq!(err.code(), ErrorCode::GameNotFoundInCatalog);
}

#[rstest]
#[case::zero_limit(None, Some("0"), 0)]
#[case::defaults(None, None, 10)]
#[tokio::test]
async fn popular_games_apply_window(
    #[case] skip: Option<&str>,
    #[case] limit: Option<&str>,
    #[case] expected: usize,
) {
    let svc = CollectionService::new(
        Arc::new(MockCollectionStore::new()),
        Arc::new(FixtureGameCatalog),
    );
    let games = svc
        .popular_games(skip, limit)
        .await
        .expect("window in range");
    assert_eq!(games.len(), expected);
}

#[rstest]
#[case::negative(Some("-1"))]
#[case::too_large(Some("51"))]
#[tokio::test]
async fn popular_games_reject_out_of_range_limits(
    idle: MockService,
    #[case] limit: Option<&str>,
) {
    let err = idle
        .popular_games(None, limit)
        .await
        .expect_err("out of range");
    assert_eq!(err.code(), ErrorCode::InvalidQueryParameters);
}

#[rstest]
#[tokio::test]
async fn create_user_checks_payload_before_store(idle: MockService) {
    let registration = UserRegistration {
        username: Some("a".to_owned()),
        password: Some("p".to_owned()),
        confirm_password: Some("q".to_owned()),
        name: Some("A".to_owned()),
        club: Some("C".to_owned()),
    };
    let err = idle
        .create_user(&registration)
        .await
        .expect_err("mismatch");
    assert_eq!(err.code(), ErrorCode::PasswordMismatch);
}

#[rstest]
#[tokio::test]
async fn validate_credentials_delegates() {
    let mut store = MockCollectionStore::new();
    store
        .expect_validate_credentials()
        .withf(|creds| creds.username() == "jarcs" && creds.password() == "jslb")
        .return_once(|_| Ok(token()));
    let svc = service(store, MockGameCatalog::new());

    let resolved = svc
        .validate_credentials(&LoginCredentials::new("jarcs", "jslb"))
        .await
        .expect("valid credentials");
    assert_eq!(resolved, token());
}
