//! Reqwest-backed collection store over the Elasticsearch REST API.
//!
//! Index layout:
//! - `credentials`, keyed by username;
//! - `users`, keyed by token, carrying the per-user `nextGroupId` counter;
//! - `games`, keyed by game id;
//! - `groups-<token>`, keyed by group id.
//!
//! Every write asks for `refresh=true` so the next read observes it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::warn;

use super::dto::{
    CredentialDocument, GameDocument, GroupDocument, MultiGetRequest, MultiGetResponse,
    SearchResponse, UserDocument, VersionedDocument,
};
use crate::domain::ports::{CollectionStore, StoreError};
use crate::domain::{
    Game, GameId, GameSummary, GroupDetails, GroupId, GroupPatch, GroupSummary, LoginCredentials,
    NewGroup, NewUser, UserProfile, UserToken,
};
use crate::outbound::response_preview::body_preview;

const CREDENTIALS_INDEX: &str = "credentials";
const USERS_INDEX: &str = "users";
const GAMES_INDEX: &str = "games";
/// Groups fetched per listing request.
const GROUPS_PAGE_SIZE: usize = 1000;

/// Index holding one user's groups. Tokens are lowercase, as index names
/// must be.
fn groups_index(token: &UserToken) -> String {
    format!("groups-{token}")
}

/// One page of a user's groups in id order, starting after `after`.
fn groups_page_query(after: Option<GroupId>) -> Value {
    let mut query = json!({ "size": GROUPS_PAGE_SIZE, "sort": [{ "id": "asc" }] });
    if let (Some(after), Some(fields)) = (after, query.as_object_mut()) {
        fields.insert("search_after".to_owned(), json!([after.get()]));
    }
    query
}

/// Status and body of a completed request.
struct Reply {
    status: StatusCode,
    body: Vec<u8>,
}

impl Reply {
    fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_slice(&self.body)
            .map_err(|err| StoreError::backend(format!("invalid Elasticsearch payload: {err}")))
    }

    fn ensure_success(self, action: &str) -> Result<Self, StoreError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(self.failure(action))
        }
    }

    fn failure(&self, action: &str) -> StoreError {
        let preview = body_preview(&self.body);
        warn!(
            status = self.status.as_u16(),
            body = %preview,
            action,
            "elasticsearch request failed"
        );
        StoreError::backend(format!(
            "{action}: status {}",
            self.status.as_u16()
        ))
    }
}

fn map_transport_error(error: reqwest::Error) -> StoreError {
    warn!(error = %error, timeout = error.is_timeout(), "elasticsearch unreachable");
    StoreError::backend(error.to_string())
}

/// Collection store persisting documents in Elasticsearch.
pub struct ElasticCollectionStore {
    client: Client,
    base_url: Url,
}

impl ElasticCollectionStore {
    /// Build a store with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                StoreError::backend(format!("{} cannot be used as a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn refreshed_url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.url(segments)?;
        url.query_pairs_mut().append_pair("refresh", "true");
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Reply, StoreError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(Reply {
            status,
            body: body.to_vec(),
        })
    }

    async fn exists(&self, index: &str, id: &str) -> Result<bool, StoreError> {
        let url = self.url(&[index, "_doc", id])?;
        let reply = self.send(self.client.head(url)).await?;
        match reply.status {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(reply.failure("check document")),
        }
    }

    /// Source of one document; a missing document or index yields `None`.
    async fn source<T: DeserializeOwned>(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let url = self.url(&[index, "_source", id])?;
        let reply = self.send(self.client.get(url)).await?;
        match reply.status {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => reply.decode().map(Some),
            _ => Err(reply.failure("read document")),
        }
    }

    async fn put_document<B: Serialize + ?Sized>(
        &self,
        index: &str,
        id: &str,
        body: &B,
    ) -> Result<(), StoreError> {
        let url = self.refreshed_url(&[index, "_doc", id])?;
        self.send(self.client.put(url).json(body))
            .await?
            .ensure_success("index document")?;
        Ok(())
    }

    async fn ensure_user(&self, token: &UserToken) -> Result<(), StoreError> {
        if self.exists(USERS_INDEX, token.as_ref()).await? {
            Ok(())
        } else {
            Err(StoreError::TokenNotFound)
        }
    }

    async fn versioned_user(
        &self,
        token: &UserToken,
    ) -> Result<VersionedDocument<UserDocument>, StoreError> {
        let url = self.url(&[USERS_INDEX, "_doc", token.as_ref()])?;
        let reply = self.send(self.client.get(url)).await?;
        match reply.status {
            StatusCode::NOT_FOUND => Err(StoreError::TokenNotFound),
            status if status.is_success() => reply.decode(),
            _ => Err(reply.failure("read user")),
        }
    }

    /// Move the user's group counter past `id`, failing if another writer
    /// touched the user document since it was read.
    async fn reserve_group_id(
        &self,
        token: &UserToken,
        user: &VersionedDocument<UserDocument>,
        next: GroupId,
    ) -> Result<(), StoreError> {
        let mut url = self.url(&[USERS_INDEX, "_update", token.as_ref()])?;
        url.query_pairs_mut()
            .append_pair("if_seq_no", &user.seq_no.to_string())
            .append_pair("if_primary_term", &user.primary_term.to_string())
            .append_pair("refresh", "true");
        let body = json!({ "doc": { "nextGroupId": next.get() } });
        let reply = self.send(self.client.post(url).json(&body)).await?;
        if reply.status == StatusCode::CONFLICT {
            return Err(StoreError::backend("concurrent group creation for one user"));
        }
        reply.ensure_success("reserve group id")?;
        Ok(())
    }

    /// Token check first, then the group document.
    async fn group_document(
        &self,
        token: &UserToken,
        group_id: GroupId,
    ) -> Result<GroupDocument, StoreError> {
        self.ensure_user(token).await?;
        self.source(&groups_index(token), &group_id.to_string())
            .await?
            .ok_or(StoreError::GroupNotFound)
    }

    async fn save_group(&self, token: &UserToken, group: &GroupDocument) -> Result<(), StoreError> {
        self.put_document(&groups_index(token), &group.id.to_string(), group)
            .await
    }

    /// Insert the game unless it is already cached; the cached record wins.
    async fn cache_game(&self, game: Game) -> Result<Game, StoreError> {
        let url = self.refreshed_url(&[GAMES_INDEX, "_create", game.id.as_ref()])?;
        let reply = self
            .send(self.client.put(url).json(&GameDocument::from(&game)))
            .await?;
        if reply.status == StatusCode::CONFLICT {
            return self.exists_game(&game.id).await;
        }
        reply.ensure_success("cache game")?;
        Ok(game)
    }

    /// Member summaries in group order, resolved with one multi-get.
    async fn game_summaries(&self, ids: &[String]) -> Result<Vec<GameSummary>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut url = self.url(&[GAMES_INDEX, "_mget"])?;
        url.query_pairs_mut()
            .append_pair("_source_includes", "id,name,image_url");
        let response: MultiGetResponse<GameDocument> = self
            .send(self.client.post(url).json(&MultiGetRequest { ids }))
            .await?
            .ensure_success("resolve group games")?
            .decode()?;
        response.into_found().map(GameDocument::into_summary).collect()
    }
}

#[async_trait]
impl CollectionStore for ElasticCollectionStore {
    async fn create_user(&self, user: NewUser) -> Result<UserProfile, StoreError> {
        let token = UserToken::random();
        let credential = CredentialDocument {
            password: user.password().to_owned(),
            token: token.to_string(),
        };
        let url = self.refreshed_url(&[CREDENTIALS_INDEX, "_create", user.username()])?;
        let reply = self.send(self.client.put(url).json(&credential)).await?;
        if reply.status == StatusCode::CONFLICT {
            return Err(StoreError::UsernameNotUnique);
        }
        reply.ensure_success("create credential")?;

        let document = UserDocument {
            username: user.username().to_owned(),
            name: user.name().to_owned(),
            club: user.club().to_owned(),
            next_group_id: 0,
        };
        self.put_document(USERS_INDEX, token.as_ref(), &document)
            .await?;
        Ok(user.into_profile(token))
    }

    async fn user_details(&self, token: &UserToken) -> Result<UserProfile, StoreError> {
        let user: UserDocument = self
            .source(USERS_INDEX, token.as_ref())
            .await?
            .ok_or(StoreError::TokenNotFound)?;
        Ok(UserProfile {
            token: token.clone(),
            username: user.username,
            name: user.name,
            club: user.club,
        })
    }

    async fn create_group(
        &self,
        token: &UserToken,
        group: NewGroup,
    ) -> Result<GroupSummary, StoreError> {
        let user = self.versioned_user(token).await?;
        let id = GroupId::new(user.source.next_group_id);
        let next = id
            .next()
            .ok_or_else(|| StoreError::backend("group id space exhausted"))?;
        self.reserve_group_id(token, &user, next).await?;

        let document = GroupDocument::new(id, group);
        self.save_group(token, &document).await?;
        Ok(document.summary())
    }

    async fn update_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
        patch: GroupPatch,
    ) -> Result<GroupSummary, StoreError> {
        let mut group = self.group_document(token, group_id).await?;
        if let Some(name) = patch.name {
            group.name = name;
        }
        if let Some(description) = patch.description {
            group.description = description;
        }
        self.save_group(token, &group).await?;
        Ok(group.summary())
    }

    async fn groups(&self, token: &UserToken) -> Result<Vec<GroupSummary>, StoreError> {
        self.ensure_user(token).await?;
        let index = groups_index(token);
        let url = self.url(&[index.as_str(), "_search"])?;
        let mut summaries: Vec<GroupSummary> = Vec::new();
        loop {
            let query = groups_page_query(summaries.last().map(|group| group.id));
            let reply = self.send(self.client.post(url.clone()).json(&query)).await?;
            if reply.status == StatusCode::NOT_FOUND {
                return Err(StoreError::GroupNotFound);
            }
            let response: SearchResponse<GroupDocument> =
                reply.ensure_success("list groups")?.decode()?;
            let before = summaries.len();
            summaries.extend(response.into_sources().map(|group| group.summary()));
            if summaries.len() - before < GROUPS_PAGE_SIZE {
                break;
            }
        }
        if summaries.is_empty() {
            return Err(StoreError::GroupNotFound);
        }
        Ok(summaries)
    }

    async fn delete_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
    ) -> Result<GroupSummary, StoreError> {
        let group = self.group_document(token, group_id).await?;
        let index = groups_index(token);
        let id = group_id.to_string();
        let url = self.refreshed_url(&[index.as_str(), "_doc", id.as_str()])?;
        let reply = self.send(self.client.delete(url)).await?;
        if reply.status == StatusCode::NOT_FOUND {
            return Err(StoreError::GroupNotFound);
        }
        reply.ensure_success("delete group")?;
        Ok(group.summary())
    }

    async fn group_details(
        &self,
        token: &UserToken,
        group_id: GroupId,
    ) -> Result<GroupDetails, StoreError> {
        let group = self.group_document(token, group_id).await?;
        let games = self.game_summaries(&group.games).await?;
        Ok(GroupDetails {
            id: group_id,
            name: group.name,
            description: group.description,
            games,
        })
    }

    async fn add_game_to_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
        game: Game,
    ) -> Result<GameSummary, StoreError> {
        let mut group = self.group_document(token, group_id).await?;
        let cached = self.cache_game(game).await?;
        if !group.contains(&cached.id) {
            group.games.push(cached.id.to_string());
            self.save_group(token, &group).await?;
        }
        Ok(cached.summary())
    }

    async fn delete_group_game(
        &self,
        token: &UserToken,
        group_id: GroupId,
        game_id: &GameId,
    ) -> Result<GameSummary, StoreError> {
        let mut group = self.group_document(token, group_id).await?;
        if !group.contains(game_id) {
            return Err(StoreError::GameNotFound);
        }
        let summary = self.exists_game(game_id).await?.summary();
        group.games.retain(|member| member != game_id.as_ref());
        self.save_group(token, &group).await?;
        Ok(summary)
    }

    async fn game_details(&self, game_id: &GameId) -> Result<Game, StoreError> {
        self.exists_game(game_id).await
    }

    async fn exists_game(&self, game_id: &GameId) -> Result<Game, StoreError> {
        self.source::<GameDocument>(GAMES_INDEX, game_id.as_ref())
            .await?
            .ok_or(StoreError::GameNotFound)?
            .into_game()
    }

    async fn verify_token_and_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
    ) -> Result<(), StoreError> {
        self.ensure_user(token).await?;
        if self
            .exists(&groups_index(token), &group_id.to_string())
            .await?
        {
            Ok(())
        } else {
            Err(StoreError::GroupNotFound)
        }
    }

    async fn validate_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserToken, StoreError> {
        let stored: CredentialDocument = self
            .source(CREDENTIALS_INDEX, credentials.username())
            .await?
            .ok_or(StoreError::InvalidCredentials)?;
        if stored.password != credentials.password() {
            return Err(StoreError::InvalidCredentials);
        }
        stored.token()
    }
}
