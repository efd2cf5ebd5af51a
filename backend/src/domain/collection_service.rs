//! Collection service: validation and ownership rules for games and groups.
//!
//! Every operation validates its raw input before any port is touched, then
//! delegates to the [`CollectionStore`] and, for games, the [`GameCatalog`].
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. access token (missing or malformed → `invalid_access_token`),
//! 2. group id (not a non-negative integer → `invalid_group_id`),
//! 3. payload or game id,
//! 4. store existence checks (token, then group, then game).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Span, debug, info, instrument};

use crate::domain::ports::{
    AccountsCommand, CatalogError, CollectionStore, GameCatalog, GamesQuery, GroupsCommand,
    StoreError,
};
use crate::domain::validation::present;
use crate::domain::{
    Error, ErrorCode, Game, GameId, GameSummary, GroupDetails, GroupId, GroupInput, GroupSummary,
    LoginCredentials, PageWindow, UserProfile, UserRegistration, UserToken,
};

/// Longest game name accepted by [`GamesQuery::search_games`].
pub const MAX_GAME_NAME_LEN: usize = 50;

/// Service implementing the driving ports over a store and a catalogue.
#[derive(Clone)]
pub struct CollectionService<S, C> {
    store: Arc<S>,
    catalog: Arc<C>,
}

impl<S, C> CollectionService<S, C> {
    /// Create a new service over the given adapters.
    pub fn new(store: Arc<S>, catalog: Arc<C>) -> Self {
        Self { store, catalog }
    }
}

impl<S, C> CollectionService<S, C>
where
    S: CollectionStore,
    C: GameCatalog,
{
    fn token(raw: Option<&str>) -> Result<UserToken, Error> {
        let token = raw
            .and_then(|value| UserToken::new(value).ok())
            .ok_or_else(Error::invalid_access_token)?;
        Span::current().record("token", token.redacted());
        Ok(token)
    }

    fn game_id(raw: Option<&str>, missing: ErrorCode) -> Result<GameId, Error> {
        present(raw)
            .and_then(|value| GameId::new(value).ok())
            .ok_or_else(|| Error::from_code(missing))
    }

    /// Cached game, or `None` on a cache miss.
    async fn cached_game(&self, game_id: &GameId) -> Result<Option<Game>, Error> {
        match self.store.exists_game(game_id).await {
            Ok(game) => Ok(Some(game)),
            Err(StoreError::GameNotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn catalog_game(&self, game_id: &GameId) -> Result<Game, Error> {
        self.catalog
            .game_by_id(game_id)
            .await
            .map_err(|err: CatalogError| {
                debug!(error = %err, "catalogue lookup failed");
                err.into()
            })
    }
}

#[async_trait]
impl<S, C> GamesQuery for CollectionService<S, C>
where
    S: CollectionStore,
    C: GameCatalog,
{
    #[instrument(name = "borga.service.popular_games", skip(self))]
    async fn popular_games(
        &self,
        skip: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Vec<GameSummary>, Error> {
        let window = PageWindow::from_query(skip, limit)?;
        Ok(self.catalog.popular_games(window).await?)
    }

    #[instrument(name = "borga.service.search_games", skip(self))]
    async fn search_games(&self, name: Option<&str>) -> Result<Vec<GameSummary>, Error> {
        let name = present(name)
            .filter(|value| value.chars().count() <= MAX_GAME_NAME_LEN)
            .ok_or_else(|| Error::from_code(ErrorCode::InvalidGameName))?;
        Ok(self.catalog.search_games(name).await?)
    }

    #[instrument(name = "borga.service.game_details", skip(self))]
    async fn game_details(&self, game_id: Option<&str>) -> Result<Game, Error> {
        let game_id = Self::game_id(game_id, ErrorCode::InvalidGameId)?;
        match self.store.game_details(&game_id).await {
            Ok(game) => Ok(game),
            Err(StoreError::GameNotFound) => {
                debug!("game not cached; asking catalogue");
                self.catalog_game(&game_id).await
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl<S, C> AccountsCommand for CollectionService<S, C>
where
    S: CollectionStore,
    C: GameCatalog,
{
    #[instrument(
        name = "borga.service.create_user",
        skip(self, registration),
        fields(username = registration.username.as_deref().unwrap_or_default())
    )]
    async fn create_user(&self, registration: &UserRegistration) -> Result<UserProfile, Error> {
        let user = registration.validate()?;
        let profile = self.store.create_user(user).await?;
        info!("user registered");
        Ok(profile)
    }

    #[instrument(
        name = "borga.service.user_details",
        skip_all,
        fields(token = tracing::field::Empty)
    )]
    async fn user_details(&self, token: Option<&str>) -> Result<UserProfile, Error> {
        let token = Self::token(token)?;
        Ok(self.store.user_details(&token).await?)
    }

    #[instrument(
        name = "borga.service.validate_credentials",
        skip_all,
        fields(username = credentials.username())
    )]
    async fn validate_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserToken, Error> {
        Ok(self.store.validate_credentials(credentials).await?)
    }
}

#[async_trait]
impl<S, C> GroupsCommand for CollectionService<S, C>
where
    S: CollectionStore,
    C: GameCatalog,
{
    #[instrument(
        name = "borga.service.create_group",
        skip_all,
        fields(token = tracing::field::Empty)
    )]
    async fn create_group(
        &self,
        token: Option<&str>,
        group: &GroupInput,
    ) -> Result<GroupSummary, Error> {
        let token = Self::token(token)?;
        let group = group.to_new_group()?;
        let summary = self.store.create_group(&token, group).await?;
        info!(group_id = %summary.id, "group created");
        Ok(summary)
    }

    #[instrument(
        name = "borga.service.update_group",
        skip(self, token, patch),
        fields(token = tracing::field::Empty)
    )]
    async fn update_group(
        &self,
        token: Option<&str>,
        group_id: Option<&str>,
        patch: &GroupInput,
    ) -> Result<GroupSummary, Error> {
        let token = Self::token(token)?;
        let group_id = GroupId::parse_raw(group_id)?;
        let patch = patch.to_patch()?;
        Ok(self.store.update_group(&token, group_id, patch).await?)
    }

    #[instrument(
        name = "borga.service.groups",
        skip_all,
        fields(token = tracing::field::Empty)
    )]
    async fn groups(&self, token: Option<&str>) -> Result<Vec<GroupSummary>, Error> {
        let token = Self::token(token)?;
        Ok(self.store.groups(&token).await?)
    }

    #[instrument(
        name = "borga.service.delete_group",
        skip(self, token),
        fields(token = tracing::field::Empty)
    )]
    async fn delete_group(
        &self,
        token: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<GroupSummary, Error> {
        let token = Self::token(token)?;
        let group_id = GroupId::parse_raw(group_id)?;
        let summary = self.store.delete_group(&token, group_id).await?;
        info!("group deleted");
        Ok(summary)
    }

    #[instrument(
        name = "borga.service.group_details",
        skip(self, token),
        fields(token = tracing::field::Empty)
    )]
    async fn group_details(
        &self,
        token: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<GroupDetails, Error> {
        let token = Self::token(token)?;
        let group_id = GroupId::parse_raw(group_id)?;
        Ok(self.store.group_details(&token, group_id).await?)
    }

    #[instrument(
        name = "borga.service.add_game_to_group",
        skip(self, token),
        fields(token = tracing::field::Empty)
    )]
    async fn add_game_to_group(
        &self,
        token: Option<&str>,
        group_id: Option<&str>,
        game_id: Option<&str>,
    ) -> Result<GameSummary, Error> {
        let token = Self::token(token)?;
        let group_id = GroupId::parse_raw(group_id)?;
        let game_id = Self::game_id(game_id, ErrorCode::InvalidGameInput)?;

        self.store.verify_token_and_group(&token, group_id).await?;

        let game = match self.cached_game(&game_id).await? {
            Some(game) => game,
            None => self.catalog_game(&game_id).await?,
        };
        Ok(self.store.add_game_to_group(&token, group_id, game).await?)
    }

    #[instrument(
        name = "borga.service.delete_group_game",
        skip(self, token),
        fields(token = tracing::field::Empty)
    )]
    async fn delete_group_game(
        &self,
        token: Option<&str>,
        group_id: Option<&str>,
        game_id: Option<&str>,
    ) -> Result<GameSummary, Error> {
        let token = Self::token(token)?;
        let group_id = GroupId::parse_raw(group_id)?;
        let game_id = Self::game_id(game_id, ErrorCode::InvalidGameId)?;
        Ok(self
            .store
            .delete_group_game(&token, group_id, &game_id)
            .await?)
    }
}

#[cfg(test)]
#[path = "collection_service_tests.rs"]
mod tests;
