//! Per-user game groups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::present;
use super::{Error, ErrorCode, GameSummary};

/// Group identifier, unique within one user's namespace.
///
/// # Examples
/// ```
/// use borga::domain::GroupId;
///
/// let id: GroupId = "3".parse().unwrap();
/// assert_eq!(id.get(), 3);
/// assert!("-1".parse::<GroupId>().is_err());
/// assert!("x".parse::<GroupId>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(transparent)]
pub struct GroupId(u64);

impl GroupId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one.
    ///
    /// Returns `None` once the namespace is exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Parse a raw path or query value.
    ///
    /// Fails with [`ErrorCode::InvalidGroupId`] unless the value is a
    /// non-negative integer.
    pub fn parse_raw(raw: Option<&str>) -> Result<Self, Error> {
        raw.map(str::trim)
            .and_then(|value| value.parse().ok())
            .ok_or_else(Error::invalid_group_id)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for GroupId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Group payload as received from a client, used for creation and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct GroupInput {
    #[schema(example = "Horror Games")]
    pub name: Option<String>,
    #[schema(example = "The scariest horror games in the planet D:")]
    pub description: Option<String>,
}

impl GroupInput {
    /// Both fields are required to create a group.
    pub fn to_new_group(&self) -> Result<NewGroup, Error> {
        match (
            present(self.name.as_deref()),
            present(self.description.as_deref()),
        ) {
            (Some(name), Some(description)) => Ok(NewGroup {
                name: name.to_owned(),
                description: description.to_owned(),
            }),
            _ => Err(Error::from_code(ErrorCode::InvalidGroupInput)),
        }
    }

    /// At least one field is required to update a group.
    pub fn to_patch(&self) -> Result<GroupPatch, Error> {
        let patch = GroupPatch {
            name: present(self.name.as_deref()).map(str::to_owned),
            description: present(self.description.as_deref()).map(str::to_owned),
        };
        if patch.is_empty() {
            return Err(Error::from_code(ErrorCode::InvalidGroupInput));
        }
        Ok(patch)
    }
}

/// Validated group creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub name: String,
    pub description: String,
}

/// Partial group update; `None` fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl GroupPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Listing projection of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    #[schema(value_type = u64, example = 0)]
    pub id: GroupId,
    pub name: String,
    pub description: String,
    #[serde(rename = "nrGames")]
    pub game_count: usize,
}

/// Group with the summaries of its member games, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetails {
    #[schema(value_type = u64, example = 0)]
    pub id: GroupId,
    pub name: String,
    pub description: String,
    pub games: Vec<GameSummary>,
}
