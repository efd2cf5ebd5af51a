//! Process-local collection store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{CollectionStore, StoreError};
use crate::domain::{
    Game, GameId, GameSummary, GroupDetails, GroupId, GroupPatch, GroupSummary, LoginCredentials,
    NewGroup, NewUser, UserProfile, UserToken,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct StoredUser {
    pub(super) username: String,
    pub(super) name: String,
    pub(super) club: String,
}

#[derive(Debug, Clone)]
pub(super) struct StoredCredential {
    pub(super) password: Zeroizing<String>,
    pub(super) token: UserToken,
}

#[derive(Debug, Clone)]
pub(super) struct StoredGroup {
    pub(super) name: String,
    pub(super) description: String,
    pub(super) games: Vec<GameId>,
}

/// Groups of one user plus the next id to hand out.
#[derive(Debug, Clone, Default)]
pub(super) struct UserGroups {
    pub(super) next_id: GroupId,
    pub(super) groups: BTreeMap<GroupId, StoredGroup>,
}

#[derive(Debug, Default)]
pub(super) struct MemoryDatabase {
    pub(super) users: HashMap<UserToken, StoredUser>,
    pub(super) credentials: HashMap<String, StoredCredential>,
    pub(super) games: HashMap<GameId, Game>,
    pub(super) groups: HashMap<UserToken, UserGroups>,
}

impl MemoryDatabase {
    fn profile(&self, token: &UserToken) -> Result<UserProfile, StoreError> {
        let user = self.users.get(token).ok_or(StoreError::TokenNotFound)?;
        Ok(UserProfile {
            token: token.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            club: user.club.clone(),
        })
    }

    fn ensure_user(&self, token: &UserToken) -> Result<(), StoreError> {
        if self.users.contains_key(token) {
            Ok(())
        } else {
            Err(StoreError::TokenNotFound)
        }
    }

    fn group(&self, token: &UserToken, id: GroupId) -> Result<&StoredGroup, StoreError> {
        self.ensure_user(token)?;
        self.groups
            .get(token)
            .and_then(|owned| owned.groups.get(&id))
            .ok_or(StoreError::GroupNotFound)
    }

    fn group_mut(
        &mut self,
        token: &UserToken,
        id: GroupId,
    ) -> Result<&mut StoredGroup, StoreError> {
        self.ensure_user(token)?;
        self.groups
            .get_mut(token)
            .and_then(|owned| owned.groups.get_mut(&id))
            .ok_or(StoreError::GroupNotFound)
    }

    fn game_summary(&self, id: &GameId) -> Option<GameSummary> {
        self.games.get(id).map(Game::summary)
    }
}

fn summarise(id: GroupId, group: &StoredGroup) -> GroupSummary {
    GroupSummary {
        id,
        name: group.name.clone(),
        description: group.description.clone(),
        game_count: group.games.len(),
    }
}

/// Collection store keeping everything in one mutex-guarded map set.
///
/// Every operation takes the lock once and never holds it across an await,
/// so concurrent callers are serialised per operation.
#[derive(Debug, Default)]
pub struct InMemoryCollectionStore {
    db: Mutex<MemoryDatabase>,
}

impl InMemoryCollectionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the sample users, game and group.
    pub fn seeded() -> Self {
        Self {
            db: Mutex::new(super::seed::sample_database()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryDatabase>, StoreError> {
        self.db
            .lock()
            .map_err(|_| StoreError::backend("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl CollectionStore for InMemoryCollectionStore {
    async fn create_user(&self, user: NewUser) -> Result<UserProfile, StoreError> {
        let mut db = self.lock()?;
        if db.credentials.contains_key(user.username()) {
            return Err(StoreError::UsernameNotUnique);
        }

        let token = UserToken::random();
        db.credentials.insert(
            user.username().to_owned(),
            StoredCredential {
                password: Zeroizing::new(user.password().to_owned()),
                token: token.clone(),
            },
        );
        db.users.insert(
            token.clone(),
            StoredUser {
                username: user.username().to_owned(),
                name: user.name().to_owned(),
                club: user.club().to_owned(),
            },
        );
        Ok(user.into_profile(token))
    }

    async fn user_details(&self, token: &UserToken) -> Result<UserProfile, StoreError> {
        self.lock()?.profile(token)
    }

    async fn create_group(
        &self,
        token: &UserToken,
        group: NewGroup,
    ) -> Result<GroupSummary, StoreError> {
        let mut db = self.lock()?;
        db.ensure_user(token)?;

        let owned = db.groups.entry(token.clone()).or_default();
        let id = owned.next_id;
        owned.next_id = id
            .next()
            .ok_or_else(|| StoreError::backend("group id space exhausted"))?;

        let stored = StoredGroup {
            name: group.name,
            description: group.description,
            games: Vec::new(),
        };
        let summary = summarise(id, &stored);
        owned.groups.insert(id, stored);
        Ok(summary)
    }

    async fn update_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
        patch: GroupPatch,
    ) -> Result<GroupSummary, StoreError> {
        let mut db = self.lock()?;
        let group = db.group_mut(token, group_id)?;
        if let Some(name) = patch.name {
            group.name = name;
        }
        if let Some(description) = patch.description {
            group.description = description;
        }
        Ok(summarise(group_id, group))
    }

    async fn groups(&self, token: &UserToken) -> Result<Vec<GroupSummary>, StoreError> {
        let db = self.lock()?;
        db.ensure_user(token)?;
        let summaries: Vec<_> = db
            .groups
            .get(token)
            .map(|owned| {
                owned
                    .groups
                    .iter()
                    .map(|(id, group)| summarise(*id, group))
                    .collect()
            })
            .unwrap_or_default();
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
        let mut db = self.lock()?;
        db.ensure_user(token)?;
        let removed = db
            .groups
            .get_mut(token)
            .and_then(|owned| owned.groups.remove(&group_id))
            .ok_or(StoreError::GroupNotFound)?;
        Ok(summarise(group_id, &removed))
    }

    async fn group_details(
        &self,
        token: &UserToken,
        group_id: GroupId,
    ) -> Result<GroupDetails, StoreError> {
        let db = self.lock()?;
        let group = db.group(token, group_id)?;
        Ok(GroupDetails {
            id: group_id,
            name: group.name.clone(),
            description: group.description.clone(),
            games: group
                .games
                .iter()
                .filter_map(|id| db.game_summary(id))
                .collect(),
        })
    }

    async fn add_game_to_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
        game: Game,
    ) -> Result<GameSummary, StoreError> {
        let mut db = self.lock()?;
        db.group(token, group_id)?;

        let game_id = game.id.clone();
        let summary = db
            .games
            .entry(game_id.clone())
            .or_insert(game)
            .summary();

        let group = db.group_mut(token, group_id)?;
        if !group.games.contains(&game_id) {
            group.games.push(game_id);
        }
        Ok(summary)
    }

    async fn delete_group_game(
        &self,
        token: &UserToken,
        group_id: GroupId,
        game_id: &GameId,
    ) -> Result<GameSummary, StoreError> {
        let mut db = self.lock()?;
        if !db.group(token, group_id)?.games.contains(game_id) {
            return Err(StoreError::GameNotFound);
        }
        let summary = db.game_summary(game_id).ok_or(StoreError::GameNotFound)?;
        db.group_mut(token, group_id)?
            .games
            .retain(|member| member != game_id);
        Ok(summary)
    }

    async fn game_details(&self, game_id: &GameId) -> Result<Game, StoreError> {
        self.exists_game(game_id).await
    }

    async fn exists_game(&self, game_id: &GameId) -> Result<Game, StoreError> {
        self.lock()?
            .games
            .get(game_id)
            .cloned()
            .ok_or(StoreError::GameNotFound)
    }

    async fn verify_token_and_group(
        &self,
        token: &UserToken,
        group_id: GroupId,
    ) -> Result<(), StoreError> {
        self.lock()?.group(token, group_id).map(|_| ())
    }

    async fn validate_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserToken, StoreError> {
        let db = self.lock()?;
        db.credentials
            .get(credentials.username())
            .filter(|stored| stored.password.as_str() == credentials.password())
            .map(|stored| stored.token.clone())
            .ok_or(StoreError::InvalidCredentials)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
