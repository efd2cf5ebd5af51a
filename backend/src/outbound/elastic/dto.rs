//! Document shapes stored in, and envelopes returned by, Elasticsearch.
//!
//! Documents keep the snake_case field names of the indices; mapping into
//! domain types happens here so the store only moves documents around.

use serde::{Deserialize, Serialize};

use crate::domain::ports::StoreError;
use crate::domain::{Game, GameId, GameSummary, GroupId, GroupSummary, NewGroup, UserToken};

/// `credentials/_doc/<username>`
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CredentialDocument {
    pub(super) password: String,
    pub(super) token: String,
}

impl CredentialDocument {
    pub(super) fn token(&self) -> Result<UserToken, StoreError> {
        UserToken::new(&self.token)
            .map_err(|err| StoreError::backend(format!("stored credential token: {err}")))
    }
}

/// `users/_doc/<token>`
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct UserDocument {
    pub(super) username: String,
    pub(super) name: String,
    pub(super) club: String,
    #[serde(rename = "nextGroupId", default)]
    pub(super) next_group_id: u64,
}

/// `groups-<token>/_doc/<id>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct GroupDocument {
    pub(super) id: u64,
    pub(super) name: String,
    pub(super) description: String,
    #[serde(default)]
    pub(super) games: Vec<String>,
}

impl GroupDocument {
    pub(super) fn new(id: GroupId, group: NewGroup) -> Self {
        Self {
            id: id.get(),
            name: group.name,
            description: group.description,
            games: Vec::new(),
        }
    }

    pub(super) fn contains(&self, game_id: &GameId) -> bool {
        self.games.iter().any(|member| member == game_id.as_ref())
    }

    pub(super) fn summary(&self) -> GroupSummary {
        GroupSummary {
            id: GroupId::new(self.id),
            name: self.name.clone(),
            description: self.description.clone(),
            game_count: self.games.len(),
        }
    }
}

/// `games/_doc/<id>`; every field but the id may be filtered out by
/// `_source_includes`.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct GameDocument {
    pub(super) id: String,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) url: String,
    #[serde(default)]
    pub(super) image_url: String,
    #[serde(default)]
    pub(super) mechanics: Vec<String>,
    #[serde(default)]
    pub(super) categories: Vec<String>,
}

impl From<&Game> for GameDocument {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.to_string(),
            name: game.name.clone(),
            description: game.description.clone(),
            url: game.url.clone(),
            image_url: game.image_url.clone(),
            mechanics: game.mechanics.clone(),
            categories: game.categories.clone(),
        }
    }
}

impl GameDocument {
    fn game_id(&self) -> Result<GameId, StoreError> {
        GameId::new(self.id.clone())
            .map_err(|err| StoreError::backend(format!("stored game id: {err}")))
    }

    pub(super) fn into_game(self) -> Result<Game, StoreError> {
        Ok(Game {
            id: self.game_id()?,
            name: self.name,
            description: self.description,
            url: self.url,
            image_url: self.image_url,
            mechanics: self.mechanics,
            categories: self.categories,
        })
    }

    pub(super) fn into_summary(self) -> Result<GameSummary, StoreError> {
        Ok(GameSummary {
            id: self.game_id()?,
            name: self.name,
            image_url: self.image_url,
        })
    }
}

/// `GET <index>/_doc/<id>` envelope with the optimistic concurrency markers.
#[derive(Debug, Deserialize)]
pub(super) struct VersionedDocument<T> {
    #[serde(rename = "_seq_no")]
    pub(super) seq_no: u64,
    #[serde(rename = "_primary_term")]
    pub(super) primary_term: u64,
    #[serde(rename = "_source")]
    pub(super) source: T,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse<T> {
    pub(super) hits: SearchHits<T>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchHits<T> {
    #[serde(default = "Vec::new")]
    pub(super) hits: Vec<SearchHit<T>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchHit<T> {
    #[serde(rename = "_source")]
    pub(super) source: T,
}

impl<T> SearchResponse<T> {
    pub(super) fn into_sources(self) -> impl Iterator<Item = T> {
        self.hits.hits.into_iter().map(|hit| hit.source)
    }
}

#[derive(Debug, Serialize)]
pub(super) struct MultiGetRequest<'a> {
    pub(super) ids: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(super) struct MultiGetResponse<T> {
    #[serde(default = "Vec::new")]
    pub(super) docs: Vec<MultiGetDocument<T>>,
}

/// Missing ids come back with `found: false` and no source.
#[derive(Debug, Deserialize)]
pub(super) struct MultiGetDocument<T> {
    #[serde(rename = "_source")]
    pub(super) source: Option<T>,
}

impl<T> MultiGetResponse<T> {
    pub(super) fn into_found(self) -> impl Iterator<Item = T> {
        self.docs.into_iter().filter_map(|doc| doc.source)
    }
}
