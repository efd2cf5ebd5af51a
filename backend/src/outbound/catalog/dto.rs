//! DTOs for decoding Board Game Atlas JSON responses.
//!
//! Responses decode into these transport types first and are then mapped
//! into domain games in one pass.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{Game, GameId, GameSummary};

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponseDto {
    #[serde(default)]
    pub(super) games: Vec<GameDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GameDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) url: Option<String>,
    #[serde(default)]
    pub(super) image_url: Option<String>,
    #[serde(default)]
    pub(super) mechanics: Vec<TagRefDto>,
    #[serde(default)]
    pub(super) categories: Vec<TagRefDto>,
}

/// Mechanic or category reference embedded in a game.
#[derive(Debug, Deserialize)]
pub(super) struct TagRefDto {
    pub(super) id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct MechanicsResponseDto {
    #[serde(default)]
    pub(super) mechanics: Vec<NamedTagDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoriesResponseDto {
    #[serde(default)]
    pub(super) categories: Vec<NamedTagDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NamedTagDto {
    pub(super) id: String,
    pub(super) name: String,
}

/// Tag id to display name lookup.
pub(super) type TagNames = HashMap<String, String>;

pub(super) fn tag_names(tags: Vec<NamedTagDto>) -> TagNames {
    tags.into_iter().map(|tag| (tag.id, tag.name)).collect()
}

impl SearchResponseDto {
    /// Summaries of every game carrying a usable id.
    pub(super) fn into_summaries(self) -> Vec<GameSummary> {
        self.games
            .into_iter()
            .filter_map(GameDto::into_summary)
            .collect()
    }
}

impl GameDto {
    fn into_summary(self) -> Option<GameSummary> {
        Some(GameSummary {
            id: GameId::new(self.id).ok()?,
            name: self.name,
            image_url: self.image_url.unwrap_or_default(),
        })
    }

    /// Full game with tag ids resolved to names; unknown ids are dropped.
    pub(super) fn into_game(self, mechanics: &TagNames, categories: &TagNames) -> Option<Game> {
        let resolve = |refs: Vec<TagRefDto>, names: &TagNames| -> Vec<String> {
            refs.into_iter()
                .filter_map(|tag| names.get(&tag.id).cloned())
                .collect()
        };
        Some(Game {
            id: GameId::new(self.id).ok()?,
            name: self.name,
            description: self.description.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
            mechanics: resolve(self.mechanics, mechanics),
            categories: resolve(self.categories, categories),
        })
    }
}
