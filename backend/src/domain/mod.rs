//! Domain primitives, ports and the collection service.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: the failure taxonomy shared by every layer.
//! - `UserToken`, `GameId`, `GroupId`: validated identifiers.
//! - `CollectionService`: validation and ownership rules over the driven
//!   ports in [`ports`].

pub mod collection_service;
pub mod error;
pub mod game;
pub mod group;
pub mod paging;
pub mod ports;
pub mod token;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::collection_service::CollectionService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::game::{Game, GameId, GameIdValidationError, GameSummary};
pub use self::group::{GroupDetails, GroupId, GroupInput, GroupPatch, GroupSummary, NewGroup};
pub use self::paging::PageWindow;
pub use self::token::{TokenValidationError, UserToken};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{LoginCredentials, NewUser, UserProfile, UserRegistration};
