//! Board games as cached from the remote catalogue.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by [`GameId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameIdValidationError {
    #[error("game id must not be empty")]
    Empty,
}

/// Catalogue-assigned game identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameId(String);

impl GameId {
    /// Validate and construct a [`GameId`].
    ///
    /// # Examples
    /// ```
    /// use borga::domain::GameId;
    ///
    /// assert!(GameId::new("RLlDWHh7hR").is_ok());
    /// assert!(GameId::new("").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, GameIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(GameIdValidationError::Empty);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for GameId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<GameId> for String {
    fn from(value: GameId) -> Self {
        value.0
    }
}

impl TryFrom<String> for GameId {
    type Error = GameIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Listing projection of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    #[schema(value_type = String, example = "RLlDWHh7hR")]
    pub id: GameId,
    #[schema(example = "Gloomhaven")]
    pub name: String,
    #[serde(alias = "image_url")]
    pub image_url: String,
}

/// Full game record. Never mutated once cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[schema(value_type = String, example = "RLlDWHh7hR")]
    pub id: GameId,
    #[schema(example = "Gloomhaven")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(alias = "image_url")]
    pub image_url: String,
    #[serde(default)]
    pub mechanics: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Game {
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            image_url: self.image_url.clone(),
        }
    }
}
