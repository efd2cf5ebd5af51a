//! Users, their registration payload and login credentials.
//!
//! Passwords are kept in [`Zeroizing`] buffers so they are wiped when the
//! owning value is dropped. They are compared verbatim; no hashing happens in
//! this crate.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::validation::present;
use super::{Error, ErrorCode, UserToken};

/// Registration payload as received from a client.
///
/// Every field is optional at this stage; [`UserRegistration::validate`]
/// decides whether the payload is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
    #[schema(example = "diggynovo")]
    pub username: Option<String>,
    #[schema(example = "dslb")]
    pub password: Option<String>,
    #[schema(example = "dslb")]
    pub confirm_password: Option<String>,
    #[schema(example = "Diogo Novo")]
    pub name: Option<String>,
    #[schema(example = "SL Benfica")]
    pub club: Option<String>,
}

impl UserRegistration {
    /// Check completeness and password confirmation.
    ///
    /// Fails with [`ErrorCode::InvalidUserInput`] when any field is missing or
    /// empty, then with [`ErrorCode::PasswordMismatch`] when the two password
    /// fields differ.
    pub fn validate(&self) -> Result<NewUser, Error> {
        let (Some(username), Some(password), Some(confirm), Some(name), Some(club)) = (
            present(self.username.as_deref()),
            present(self.password.as_deref()),
            present(self.confirm_password.as_deref()),
            present(self.name.as_deref()),
            present(self.club.as_deref()),
        ) else {
            return Err(Error::from_code(ErrorCode::InvalidUserInput));
        };

        if password != confirm {
            return Err(Error::from_code(ErrorCode::PasswordMismatch));
        }

        Ok(NewUser {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            name: name.to_owned(),
            club: club.to_owned(),
        })
    }
}

/// Validated user ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    password: Zeroizing<String>,
    name: String,
    club: String,
}

impl NewUser {
    /// Build a user from already validated parts.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        club: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
            name: name.into(),
            club: club.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn club(&self) -> &str {
        &self.club
    }

    /// Attach the token issued by the store.
    pub fn into_profile(self, token: UserToken) -> UserProfile {
        UserProfile {
            token,
            username: self.username,
            name: self.name,
            club: self.club,
        }
    }
}

/// Public view of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[schema(value_type = String, example = "0f3edb9b-76eb-4fc3-a87b-a40980b9a922")]
    pub token: UserToken,
    #[schema(example = "diggynovo")]
    pub username: String,
    #[schema(example = "Diogo Novo")]
    pub name: String,
    #[schema(example = "SL Benfica")]
    pub club: String,
}

/// Username and password pair presented at login.
///
/// # Examples
/// ```
/// use borga::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("jarcs", "jslb");
/// assert_eq!(creds.username(), "jarcs");
/// assert_eq!(creds.password(), "jslb");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
