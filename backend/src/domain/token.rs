//! Access tokens identifying a registered user.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::is_well_formed_token;

/// Validation errors returned by [`UserToken::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenValidationError {
    /// Nothing was supplied.
    #[error("access token must not be empty")]
    Empty,
    /// The value does not follow the token grammar.
    #[error("access token must be a hyphenated hexadecimal identifier")]
    Malformed,
}

/// Opaque user token in canonical lowercase form.
///
/// ## Invariants
/// - Matches the 8-4-4-4-12 hexadecimal grammar.
/// - Stored lowercase, so tokens differing only in case are equal.
///
/// # Examples
/// ```
/// use borga::domain::UserToken;
///
/// let token = UserToken::new("AD903080-295C-4A84-A7C8-959DDA27236D").unwrap();
/// assert_eq!(token.as_ref(), "ad903080-295c-4a84-a7c8-959dda27236d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserToken(String);

impl UserToken {
    /// Validate and canonicalise a token.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TokenValidationError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(TokenValidationError::Empty);
        }
        if !is_well_formed_token(raw) {
            return Err(TokenValidationError::Malformed);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Issue a fresh random token.
    pub fn random() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Short prefix safe to record in logs.
    pub fn redacted(&self) -> &str {
        self.0.get(..8).unwrap_or_default()
    }
}

impl AsRef<str> for UserToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserToken> for String {
    fn from(value: UserToken) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserToken {
    type Error = TokenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
