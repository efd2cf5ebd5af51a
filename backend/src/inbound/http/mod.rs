//! JSON web API over the collection service.
//!
//! Handlers translate requests into driving-port calls on [`state::HttpState`]
//! and render domain errors through [`error`].

pub mod auth;
pub mod body;
pub mod error;
pub mod games;
pub mod groups;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
