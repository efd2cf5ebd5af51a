//! Driving port for registration, profile lookup and login.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserProfile, UserRegistration, UserToken};

#[async_trait]
pub trait AccountsCommand: Send + Sync {
    async fn create_user(&self, registration: &UserRegistration) -> Result<UserProfile, Error>;

    async fn user_details(&self, token: Option<&str>) -> Result<UserProfile, Error>;

    /// Resolve the token owning `credentials`.
    async fn validate_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserToken, Error>;
}
