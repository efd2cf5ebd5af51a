//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope. Every failure is a fresh
//! value: nothing here is shared or mutated after construction.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Closed set of failure kinds raised by the collection service.
///
/// Each kind carries a stable numeric code and a default human message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Game name is missing, empty, or too long.
    InvalidGameName,
    /// Game is not cached locally or not a member of the group.
    GameNotFound,
    /// The remote catalogue does not know the game.
    GameNotFoundInCatalog,
    /// Paging parameters are out of range.
    InvalidQueryParameters,
    /// Game id missing from an add-to-group request.
    InvalidGameInput,
    /// Game id missing from a lookup or removal request.
    InvalidGameId,
    /// User creation payload is incomplete.
    InvalidUserInput,
    /// No user owns the supplied token.
    TokenNotFound,
    /// Group creation or update payload is incomplete.
    InvalidGroupInput,
    /// The user has no group with the supplied id.
    GroupNotFound,
    /// Group id is not a non-negative integer.
    InvalidGroupId,
    /// The user owns no groups at all.
    UserHasNoGroups,
    /// Username is already registered.
    UsernameNotUnique,
    /// Password and its confirmation differ.
    PasswordMismatch,
    /// Username unknown or password wrong.
    InvalidCredentials,
    /// The backing store could not complete the operation.
    StoreOperationFailed,
    /// Access token missing or malformed.
    InvalidAccessToken,
    /// The remote catalogue failed.
    CatalogServerError,
}

impl ErrorCode {
    /// Stable numeric code exposed to clients.
    ///
    /// # Examples
    /// ```
    /// use borga::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::GroupNotFound.number(), 21);
    /// ```
    pub const fn number(self) -> u16 {
        match self {
            Self::InvalidGameName => 1,
            Self::GameNotFound => 2,
            Self::GameNotFoundInCatalog => 3,
            Self::InvalidQueryParameters => 4,
            Self::InvalidGameInput => 5,
            Self::InvalidGameId => 6,
            Self::InvalidUserInput => 10,
            Self::TokenNotFound => 11,
            Self::InvalidGroupInput => 20,
            Self::GroupNotFound => 21,
            Self::InvalidGroupId => 22,
            Self::UserHasNoGroups => 23,
            Self::UsernameNotUnique => 50,
            Self::PasswordMismatch => 51,
            Self::InvalidCredentials => 60,
            Self::StoreOperationFailed => 80,
            Self::InvalidAccessToken => 90,
            Self::CatalogServerError => 100,
        }
    }

    /// Message used when no more specific text is supplied.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::InvalidGameName => "Game name is missing or invalid",
            Self::GameNotFound => "Game not found",
            Self::GameNotFoundInCatalog => "Game not found in the game catalog",
            Self::InvalidQueryParameters => "Invalid query parameters",
            Self::InvalidGameInput => "Invalid or missing game id",
            Self::InvalidGameId => "Game id is missing or invalid",
            Self::InvalidUserInput => "Invalid or missing object required for user creation",
            Self::TokenNotFound => "Token not found",
            Self::InvalidGroupInput => {
                "Invalid or missing object required for group creation/update"
            }
            Self::GroupNotFound => "Group not found",
            Self::InvalidGroupId => "Invalid or missing group id, it must be an integer >= 0",
            Self::UserHasNoGroups => "User does not have groups",
            Self::UsernameNotUnique => "Username already exists",
            Self::PasswordMismatch => "Passwords must be equal",
            Self::InvalidCredentials => "Invalid credentials",
            Self::StoreOperationFailed => {
                "It was not possible to conclude the operation. Please try again later"
            }
            Self::InvalidAccessToken => "Access token is missing or invalid",
            Self::CatalogServerError => {
                "Internal server error. Verify if the catalog client id is configured correctly"
            }
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use borga::domain::{Error, ErrorCode};
///
/// let err = Error::from_code(ErrorCode::GroupNotFound);
/// assert_eq!(err.code(), ErrorCode::GroupNotFound);
/// assert_eq!(err.message(), "Group not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    #[schema(example = "group_not_found")]
    code: ErrorCode,
    #[schema(example = "Group not found")]
    message: String,
    #[schema(value_type = Option<String>, example = "00000000-0000-0000-0000-000000000000")]
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The supplied message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// The supplied trace identifier was blank.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

impl Error {
    /// Create an error carrying the default message for `code`.
    ///
    /// The trace identifier in scope, if any, is captured.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_owned(),
            trace_id: current_trace_id(),
            details: None,
        }
    }

    /// Create an error with a custom message, falling back to the default
    /// message when the supplied one is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self::from_code(code))
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: current_trace_id(),
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use borga::domain::{Error, ErrorCode};
    /// use serde_json::json;
    ///
    /// let err = Error::from_code(ErrorCode::InvalidGroupId)
    ///     .with_details(json!({ "groupId": "abc" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach a trace identifier, replacing any captured one.
    ///
    /// Blank identifiers are ignored.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        let trace_id = trace_id.into();
        if !trace_id.trim().is_empty() {
            self.trace_id = Some(trace_id);
        }
        self
    }

    /// Fallible variant of [`Error::with_trace_id`].
    pub fn try_with_trace_id(
        mut self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(trace_id);
        Ok(self)
    }

    /// Shorthand for [`ErrorCode::InvalidAccessToken`].
    pub fn invalid_access_token() -> Self {
        Self::from_code(ErrorCode::InvalidAccessToken)
    }

    /// Shorthand for [`ErrorCode::InvalidGroupId`].
    pub fn invalid_group_id() -> Self {
        Self::from_code(ErrorCode::InvalidGroupId)
    }

    /// Shorthand for [`ErrorCode::StoreOperationFailed`].
    pub fn store_operation_failed() -> Self {
        Self::from_code(ErrorCode::StoreOperationFailed)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<ErrorCode> for Error {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code)
    }
}

fn current_trace_id() -> Option<String> {
    TraceId::current().map(|id| id.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    #[serde(default)]
    app_code: Option<u16>,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            app_code: Some(value.code.number()),
            message: value.message,
            trace_id: value.trace_id,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            trace_id,
            details,
            ..
        } = value;

        let mut error = Self::try_new(code, message)?;
        error.trace_id = None;
        if let Some(id) = trace_id {
            error = error.try_with_trace_id(id)?;
        }
        error.details = details;
        Ok(error)
    }
}
