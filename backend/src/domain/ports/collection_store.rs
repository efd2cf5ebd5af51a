//! Driven port for user, group and game persistence.
//!
//! Two adapters satisfy this contract: a process-local store and a
//! document-store adapter talking to Elasticsearch. Both must behave the same
//! way for every operation, including which error they report and in which
//! order checks happen.

use async_trait::async_trait;

use crate::domain::{
    Game, GameId, GameSummary, GroupDetails, GroupId, GroupPatch, GroupSummary, LoginCredentials,
    NewGroup, NewUser, UserProfile, UserToken,
};

use super::define_port_error;

define_port_error! {
    /// Failures reported by collection store adapters.
    pub enum StoreError {
        /// No user owns the token.
        TokenNotFound => "no user owns the supplied token" => TokenNotFound,
        /// The user has no group with the requested id.
        GroupNotFound => "group does not exist for this user" => GroupNotFound,
        /// The game is not cached, or not a member of the group.
        GameNotFound => "game is not present" => GameNotFound,
        /// Another credential already uses the username.
        UsernameNotUnique => "username is already registered" => UsernameNotUnique,
        /// Unknown username or wrong password.
        InvalidCredentials => "credentials do not match" => InvalidCredentials,
        /// The backend could not complete the operation.
        Backend { message: String } => "store backend failed: {message}" => StoreOperationFailed,
    }
}

/// Persistence contract for users, credentials, groups and cached games.
///
/// Group ids are assigned per user from a counter that only grows; a deleted
/// group's id is never handed out again. Every group operation reports
/// [`StoreError::TokenNotFound`] before [`StoreError::GroupNotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Register a user with a freshly issued token.
    ///
    /// Fails with [`StoreError::UsernameNotUnique`] when the username is taken.
    async fn create_user(&self, user: NewUser) -> Result<UserProfile, StoreError>;

    async fn user_details(&self, token: &UserToken) -> Result<UserProfile, StoreError>;

    /// Create an empty group under the next id of the user's namespace.
    async fn create_group(
        &self,
        token: &UserToken,
        group: NewGroup,
    ) -> Result<GroupSummary, StoreError>;

    /// Apply the fields present in `patch`.
    async fn update_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
        patch: GroupPatch,
    ) -> Result<GroupSummary, StoreError>;

    /// All groups of the user in creation order.
    ///
    /// A user without groups yields [`StoreError::GroupNotFound`], never an
    /// empty list.
    async fn groups(&self, token: &UserToken) -> Result<Vec<GroupSummary>, StoreError>;

    /// Remove a group and return its summary as it was before removal.
    async fn delete_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
    ) -> Result<GroupSummary, StoreError>;

    async fn group_details(
        &self,
        token: &UserToken,
        group_id: GroupId,
    ) -> Result<GroupDetails, StoreError>;

    /// Ensure `game` is a member of the group.
    ///
    /// A game already cached keeps its stored record and `game` is ignored;
    /// otherwise `game` becomes the cached record. Adding a member twice is a
    /// no-op.
    async fn add_game_to_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
        game: Game,
    ) -> Result<GameSummary, StoreError>;

    /// Remove a member game; [`StoreError::GameNotFound`] if it is not one.
    async fn delete_group_game(
        &self,
        token: &UserToken,
        group_id: GroupId,
        game_id: &GameId,
    ) -> Result<GameSummary, StoreError>;

    /// Cached game record, or [`StoreError::GameNotFound`] on a cache miss.
    async fn game_details(&self, game_id: &GameId) -> Result<Game, StoreError>;

    async fn exists_game(&self, game_id: &GameId) -> Result<Game, StoreError>;

    /// Token existence followed by group existence.
    async fn verify_token_and_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
    ) -> Result<(), StoreError>;

    /// Resolve the token owning the credentials.
    async fn validate_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserToken, StoreError>;
}
