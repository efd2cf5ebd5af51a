//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised without any network I/O.

use std::sync::Arc;

use crate::domain::CollectionService;
use crate::domain::ports::{
    AccountsCommand, CollectionStore, GameCatalog, GamesQuery, GroupsCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub games: Arc<dyn GamesQuery>,
    pub accounts: Arc<dyn AccountsCommand>,
    pub groups: Arc<dyn GroupsCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        games: Arc<dyn GamesQuery>,
        accounts: Arc<dyn AccountsCommand>,
        groups: Arc<dyn GroupsCommand>,
    ) -> Self {
        Self {
            games,
            accounts,
            groups,
        }
    }

    /// Serve every port from one collection service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use borga::domain::CollectionService;
    /// use borga::domain::ports::FixtureGameCatalog;
    /// use borga::inbound::http::state::HttpState;
    /// use borga::outbound::memory::InMemoryCollectionStore;
    ///
    /// let service = CollectionService::new(
    ///     Arc::new(InMemoryCollectionStore::seeded()),
    ///     Arc::new(FixtureGameCatalog),
    /// );
    /// let _state = HttpState::from_service(service);
    /// ```
    pub fn from_service<S, C>(service: CollectionService<S, C>) -> Self
    where
        S: CollectionStore + 'static,
        C: GameCatalog + 'static,
    {
        let service = Arc::new(service);
        Self::new(service.clone(), service.clone(), service)
    }
}
