//! Driving port for a user's groups and their games.
//!
//! Tokens, group ids and game ids arrive raw. Every operation rejects a
//! missing or malformed token before anything else is checked.

use async_trait::async_trait;

use crate::domain::{Error, GameSummary, GroupDetails, GroupInput, GroupSummary};

#[async_trait]
pub trait GroupsCommand: Send + Sync {
    async fn create_group(
        &self,
        token: Option<&str>,
        group: &GroupInput,
    ) -> Result<GroupSummary, Error>;

    async fn update_group(
        &self,
        token: Option<&str>,
        group_id: Option<&str>,
        patch: &GroupInput,
    ) -> Result<GroupSummary, Error>;

    async fn groups(&self, token: Option<&str>) -> Result<Vec<GroupSummary>, Error>;

    async fn delete_group(
        &self,
        token: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<GroupSummary, Error>;

    async fn group_details(
        &self,
        token: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<GroupDetails, Error>;

    /// Add a game, fetching it from the catalogue when it is not cached.
    async fn add_game_to_group(
        &self,
        token: Option<&str>,
        group_id: Option<&str>,
        game_id: Option<&str>,
    ) -> Result<GameSummary, Error>;

    async fn delete_group_game(
        &self,
        token: Option<&str>,
        group_id: Option<&str>,
        game_id: Option<&str>,
    ) -> Result<GameSummary, Error>;
}
